/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use bytes::Bytes;

use gale_types::net::ValueMap;

/// A single file part of a multipart/form-data body.
///
/// Parts without a filename attribute are decoded as simple form fields and
/// never show up here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Part {
    /// value of the name attribute of the Content-Disposition header
    pub name: String,
    /// value of the filename attribute, which may be an empty string
    pub filename: String,
    /// essence of the part Content-Type header, empty if the header is not set
    pub content_type: String,
    /// extra parameters of the part Content-Type header
    pub content_param: ValueMap,
    /// the raw part data
    pub data: Bytes,
}

impl Part {
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }
}
