/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use thiserror::Error;

use crate::parse::LineParseError;

#[derive(Debug, Error)]
pub enum MultipartSyntaxError {
    #[error("no boundary parameter in content type")]
    MissingBoundary,
    #[error("invalid boundary line")]
    InvalidBoundaryLine,
    #[error("delimiter mismatch")]
    DelimiterMismatch,
    #[error("bare LF in line")]
    BareLineFeed,
    #[error("unexpected end of body")]
    UnexpectedEnd,
    #[error("invalid part header line: {0}")]
    InvalidHeaderLine(LineParseError),
    #[error("invalid content disposition")]
    InvalidContentDisposition,
    #[error("no content disposition in part header")]
    MissingContentDisposition,
    #[error("no name set in content disposition")]
    MissingName,
    #[error("invalid part content type")]
    InvalidContentType,
    #[error("part field value is not valid utf-8")]
    InvalidFieldEncoding,
}
