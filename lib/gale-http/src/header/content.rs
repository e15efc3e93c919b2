/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use mime::Mime;

use gale_types::net::ValueMap;

/// Get the parsed Content-Type of the request headers, if any.
///
/// An unparsable value is treated the same as an absent one.
pub fn content_type(headers: &ValueMap) -> Option<Mime> {
    let value = headers.get("content-type")?;
    value.parse().ok()
}

pub fn is_form_urlencoded(mime: &Mime) -> bool {
    mime.type_() == mime::APPLICATION && mime.subtype() == mime::WWW_FORM_URLENCODED
}

pub fn is_multipart_form_data(mime: &Mime) -> bool {
    mime.type_() == mime::MULTIPART && mime.subtype() == mime::FORM_DATA
}

pub fn multipart_boundary(mime: &Mime) -> Option<&str> {
    if !is_multipart_form_data(mime) {
        return None;
    }
    let value = mime.get_param(mime::BOUNDARY)?.as_str();
    // the boundary token may come quoted, and '"' is not a boundary char
    let value = value
        .strip_prefix('"')
        .and_then(|v| v.strip_suffix('"'))
        .unwrap_or(value);
    Some(value)
}
