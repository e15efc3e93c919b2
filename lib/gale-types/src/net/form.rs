/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::borrow::Cow;
use std::fmt::{self, Write};

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use thiserror::Error;

use super::ValueMap;

const FORM_PCT_ENCODING_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

#[derive(Debug, Error)]
pub enum FormDecodeError {
    #[error("invalid utf-8 encoding: {0}")]
    InvalidUtf8Encoding(#[from] std::str::Utf8Error),
}

/// Percent-encode a single key or value for the `k=v&k=v` form encoding.
pub fn encode_value(s: &str) -> Cow<'_, str> {
    utf8_percent_encode(s, FORM_PCT_ENCODING_SET).into()
}

/// Percent-decode a single key or value, with `+` accepted as space.
pub fn decode_value(s: &str) -> Result<String, FormDecodeError> {
    let s = if s.contains('+') {
        Cow::Owned(s.replace('+', " "))
    } else {
        Cow::Borrowed(s)
    };
    let decoded = percent_decode_str(&s).decode_utf8()?;
    Ok(decoded.into_owned())
}

/// Parse a `k=v&k=v` encoded payload and append each pair to `map` in
/// appearance order. Empty fields are skipped, a field without `=` stores
/// the empty string.
pub fn parse_encoded(data: &str, map: &mut ValueMap) -> Result<(), FormDecodeError> {
    for field in data.split('&') {
        if field.is_empty() {
            continue;
        }
        match field.split_once('=') {
            Some((key, value)) => {
                let key = decode_value(key)?;
                let value = decode_value(value)?;
                map.add(key, value);
            }
            None => {
                let key = decode_value(field)?;
                map.add(key, String::new());
            }
        }
    }
    Ok(())
}

impl ValueMap {
    pub fn display_form_encoded(&self) -> DisplayFormEncoded<'_> {
        DisplayFormEncoded { inner: self }
    }

    /// Encode the map as `k=v&k=v`, iterating keys in stored order and,
    /// for each key, values in stored order.
    pub fn form_encode(&self) -> String {
        self.display_form_encoded().to_string()
    }
}

pub struct DisplayFormEncoded<'a> {
    inner: &'a ValueMap,
}

impl fmt::Display for DisplayFormEncoded<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, values) in self.inner.iter() {
            for value in values {
                if !first {
                    f.write_char('&')?;
                }
                fmt::Display::fmt(&utf8_percent_encode(key, FORM_PCT_ENCODING_SET), f)?;
                f.write_char('=')?;
                fmt::Display::fmt(&utf8_percent_encode(value, FORM_PCT_ENCODING_SET), f)?;
                first = false;
            }
        }
        Ok(())
    }
}
