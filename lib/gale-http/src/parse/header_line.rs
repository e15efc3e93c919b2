/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use super::LineParseError;

#[derive(Debug)]
pub struct HeaderLine<'a> {
    pub name: &'a str,
    pub value: &'a str,
}

impl<'a> HeaderLine<'a> {
    pub fn parse(buf: &'a [u8]) -> Result<HeaderLine<'a>, LineParseError> {
        let line = std::str::from_utf8(buf)?;
        let Some(p) = memchr::memchr(b':', line.as_bytes()) else {
            return Err(LineParseError::NoDelimiterFound(':'));
        };
        let name = line[0..p].trim();
        if name.is_empty() {
            return Err(LineParseError::InvalidHeaderName);
        }
        let value = line[p + 1..].trim();
        Ok(HeaderLine { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple() {
        let line = HeaderLine::parse(b"Host: example.net\r\n").unwrap();
        assert_eq!(line.name, "Host");
        assert_eq!(line.value, "example.net");
    }

    #[test]
    fn parse_empty_value() {
        let line = HeaderLine::parse(b"X-Empty:\r\n").unwrap();
        assert_eq!(line.name, "X-Empty");
        assert_eq!(line.value, "");
    }

    #[test]
    fn parse_no_colon() {
        let err = HeaderLine::parse(b"broken header\r\n").unwrap_err();
        assert_eq!(err, LineParseError::NoDelimiterFound(':'));
    }

    #[test]
    fn parse_empty_name() {
        let err = HeaderLine::parse(b": left out\r\n").unwrap_err();
        assert_eq!(err, LineParseError::InvalidHeaderName);
    }
}
