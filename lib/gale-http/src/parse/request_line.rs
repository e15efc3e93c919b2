/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use super::LineParseError;

const REQUEST_LINE_MINIMAL_LENGTH: usize = 14; // GET / HTTP/1.0

#[derive(Debug)]
pub struct RequestLine<'a> {
    pub method: &'a str,
    pub target: &'a str,
    pub version: u8,
}

impl<'a> RequestLine<'a> {
    pub fn parse(buf: &'a [u8]) -> Result<RequestLine<'a>, LineParseError> {
        if buf.len() < REQUEST_LINE_MINIMAL_LENGTH {
            return Err(LineParseError::NotLongEnough);
        }

        let line = std::str::from_utf8(buf)?;
        let Some(p) = memchr::memchr(b' ', line.as_bytes()) else {
            return Err(LineParseError::NoDelimiterFound(' '));
        };
        let method = &line[0..p];
        let left = &line[p + 1..];

        let Some(p) = memchr::memchr(b' ', left.as_bytes()) else {
            return Err(LineParseError::NoDelimiterFound(' '));
        };
        let target = &left[0..p];

        let version = match left[p + 1..].trim_end() {
            "HTTP/1.0" => 0,
            "HTTP/1.1" => 1,
            "HTTP/2.0" | "HTTP/2" => 2,
            _ => return Err(LineParseError::InvalidVersion),
        };

        Ok(RequestLine {
            method,
            target,
            version,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_get() {
        let line = RequestLine::parse(b"GET /index.html HTTP/1.1\r\n").unwrap();
        assert_eq!(line.method, "GET");
        assert_eq!(line.target, "/index.html");
        assert_eq!(line.version, 1);
    }

    #[test]
    fn parse_http10() {
        let line = RequestLine::parse(b"HEAD / HTTP/1.0\r\n").unwrap();
        assert_eq!(line.method, "HEAD");
        assert_eq!(line.target, "/");
        assert_eq!(line.version, 0);
    }

    #[test]
    fn parse_bad_version() {
        let err = RequestLine::parse(b"GET / HTTP/9.9\r\n").unwrap_err();
        assert_eq!(err, LineParseError::InvalidVersion);
    }

    #[test]
    fn parse_missing_target() {
        let err = RequestLine::parse(b"GET HTTP/1.1 junk\r\n").unwrap_err();
        assert_eq!(err, LineParseError::InvalidVersion);
    }

    #[test]
    fn parse_short() {
        let err = RequestLine::parse(b"GET /\r\n").unwrap_err();
        assert_eq!(err, LineParseError::NotLongEnough);
    }
}
