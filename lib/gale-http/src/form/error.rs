/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use http::StatusCode;
use thiserror::Error;

use gale_types::net::FormDecodeError;

use crate::body::BodyReadError;
use crate::multipart::MultipartSyntaxError;

#[derive(Debug, Error)]
pub enum FormParseError {
    #[error("malformed multipart body: {0}")]
    MalformedMultipart(#[from] MultipartSyntaxError),
    #[error("invalid form encoding: {0}")]
    InvalidFormEncoding(#[from] FormDecodeError),
    #[error("form body size limit exceeded (> {0})")]
    SizeLimitExceeded(usize),
    #[error("request body already consumed")]
    AlreadyConsumed,
    #[error("unsupported content type")]
    UnsupportedContentType,
    #[error("io failed: {0:?}")]
    IoFailed(#[from] io::Error),
}

impl FormParseError {
    /// Get the status code that should be sent back when form decoding fails.
    ///
    /// Returns None if the connection is no good for a response.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            FormParseError::MalformedMultipart(_) | FormParseError::InvalidFormEncoding(_) => {
                Some(StatusCode::BAD_REQUEST)
            }
            FormParseError::SizeLimitExceeded(_) => Some(StatusCode::PAYLOAD_TOO_LARGE),
            FormParseError::AlreadyConsumed => Some(StatusCode::INTERNAL_SERVER_ERROR),
            FormParseError::UnsupportedContentType => Some(StatusCode::UNSUPPORTED_MEDIA_TYPE),
            FormParseError::IoFailed(_) => None,
        }
    }
}

impl From<BodyReadError> for FormParseError {
    fn from(e: BodyReadError) -> Self {
        match e {
            BodyReadError::SizeLimitExceeded(max) => FormParseError::SizeLimitExceeded(max),
            BodyReadError::IoFailed(e) => FormParseError::IoFailed(e),
        }
    }
}
