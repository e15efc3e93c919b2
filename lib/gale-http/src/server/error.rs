/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;

use http::{StatusCode, Version};
use thiserror::Error;

use crate::parse::LineParseError;

#[derive(Debug, Error)]
pub enum RequestParseError {
    #[error("client closed")]
    ClientClosed,
    #[error("too large header, should be less than {0}")]
    TooLargeHeader(usize),
    #[error("invalid request line: {0}")]
    InvalidRequestLine(LineParseError),
    #[error("unsupported method: {0}")]
    UnsupportedMethod(String),
    #[error("unsupported version {0:?}")]
    UnsupportedVersion(Version),
    #[error("invalid request target")]
    InvalidRequestTarget,
    #[error("invalid header line: {0}")]
    InvalidHeaderLine(LineParseError),
    #[error("invalid query string")]
    InvalidQueryString,
    #[error("invalid content length")]
    InvalidContentLength,
    #[error("chunked transfer encoding is not supported")]
    UnsupportedTransferEncoding,
    #[error("upgrade is not supported")]
    UpgradeIsNotSupported,
    #[error("io failed: {0:?}")]
    IoFailed(#[from] io::Error),
}

impl RequestParseError {
    /// Get the status code that should be sent back to the client.
    ///
    /// Returns None if the connection is no good for a response.
    pub fn status_code(&self) -> Option<StatusCode> {
        match self {
            RequestParseError::ClientClosed | RequestParseError::IoFailed(_) => None,
            RequestParseError::TooLargeHeader(_) => {
                Some(StatusCode::REQUEST_HEADER_FIELDS_TOO_LARGE)
            }
            RequestParseError::UnsupportedMethod(_)
            | RequestParseError::UnsupportedTransferEncoding
            | RequestParseError::UpgradeIsNotSupported => Some(StatusCode::NOT_IMPLEMENTED),
            RequestParseError::UnsupportedVersion(_) => Some(StatusCode::HTTP_VERSION_NOT_SUPPORTED),
            _ => Some(StatusCode::BAD_REQUEST),
        }
    }
}
