/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::str::FromStr;

use http::{Method, Uri, Version};
use tokio::io::AsyncBufRead;

use gale_types::net::{ValueMap, parse_cookie_header, parse_encoded};

use super::RequestParseError;
use crate::body::Body;
use crate::io::LimitedLineReadExt;
use crate::multipart::Part;
use crate::parse::{HeaderLine, RequestLine};

#[derive(Debug)]
pub struct Request {
    pub version: Version,
    pub method: Method,
    pub uri: Uri,
    pub headers: ValueMap,
    content_length: u64,
    header_size: usize,
    param: ValueMap,
    cookie: Option<ValueMap>,
    parts: Vec<Part>,
    body: Body,
}

impl Request {
    pub fn new(method: Method, uri: Uri, version: Version) -> Self {
        Request {
            version,
            method,
            uri,
            headers: ValueMap::for_headers(),
            content_length: 0,
            header_size: 0,
            param: ValueMap::new(),
            cookie: None,
            parts: Vec::new(),
            body: Body::empty(),
        }
    }

    /// Read and parse a full request head from the reader.
    ///
    /// The reader is moved into the returned request, where the remaining
    /// bytes make up the body according to the Content-Length header. Query
    /// string pairs are decoded into the param map.
    pub async fn parse<R>(
        mut reader: R,
        max_header_size: usize,
    ) -> Result<Request, RequestParseError>
    where
        R: AsyncBufRead + Send + Unpin + 'static,
    {
        let mut line_buf = Vec::<u8>::with_capacity(1024);
        let mut header_size: usize = 0;

        let (found, nr) = reader
            .limited_read_until(b'\n', max_header_size, &mut line_buf)
            .await?;
        if nr == 0 {
            return Err(RequestParseError::ClientClosed);
        }
        if !found {
            return if nr < max_header_size {
                Err(RequestParseError::ClientClosed)
            } else {
                Err(RequestParseError::TooLargeHeader(max_header_size))
            };
        }
        header_size += nr;
        let mut req = Request::build_from_request_line(line_buf.as_ref())?;

        let mut content_length: Option<u64> = None;
        loop {
            if header_size >= max_header_size {
                return Err(RequestParseError::TooLargeHeader(max_header_size));
            }
            line_buf.clear();
            let max_len = max_header_size - header_size;
            let (found, nr) = reader
                .limited_read_until(b'\n', max_len, &mut line_buf)
                .await?;
            if nr == 0 {
                return Err(RequestParseError::ClientClosed);
            }
            if !found {
                return if nr < max_len {
                    Err(RequestParseError::ClientClosed)
                } else {
                    Err(RequestParseError::TooLargeHeader(max_header_size))
                };
            }
            header_size += nr;
            if (line_buf.len() == 1 && line_buf[0] == b'\n')
                || (line_buf.len() == 2 && line_buf[0] == b'\r' && line_buf[1] == b'\n')
            {
                // header end line
                break;
            }
            req.parse_header_line(line_buf.as_ref(), &mut content_length)?;
        }
        req.header_size = header_size;

        if let Some(query) = req.uri.query() {
            parse_encoded(query, &mut req.param)
                .map_err(|_| RequestParseError::InvalidQueryString)?;
        }

        let content_length = content_length.unwrap_or(0);
        req.content_length = content_length;
        req.body = Body::new(reader, content_length);
        Ok(req)
    }

    fn build_from_request_line(line_buf: &[u8]) -> Result<Self, RequestParseError> {
        let req_line =
            RequestLine::parse(line_buf).map_err(RequestParseError::InvalidRequestLine)?;

        let version = match req_line.version {
            0 => Version::HTTP_10,
            1 => Version::HTTP_11,
            2 => return Err(RequestParseError::UnsupportedVersion(Version::HTTP_2)),
            _ => unreachable!(),
        };
        let method = Method::from_str(req_line.method)
            .map_err(|_| RequestParseError::UnsupportedMethod(req_line.method.to_string()))?;
        let uri =
            Uri::from_str(req_line.target).map_err(|_| RequestParseError::InvalidRequestTarget)?;

        Ok(Request::new(method, uri, version))
    }

    fn parse_header_line(
        &mut self,
        line_buf: &[u8],
        content_length: &mut Option<u64>,
    ) -> Result<(), RequestParseError> {
        let header = HeaderLine::parse(line_buf).map_err(RequestParseError::InvalidHeaderLine)?;

        match header.name.to_ascii_lowercase().as_str() {
            "content-length" => {
                let len =
                    u64::from_str(header.value).map_err(|_| RequestParseError::InvalidContentLength)?;
                if let Some(previous) = *content_length {
                    if previous != len {
                        return Err(RequestParseError::InvalidContentLength);
                    }
                } else {
                    *content_length = Some(len);
                }
            }
            "transfer-encoding" => {
                // only fixed length bodies are taken
                return Err(RequestParseError::UnsupportedTransferEncoding);
            }
            "upgrade" => return Err(RequestParseError::UpgradeIsNotSupported),
            _ => {}
        }

        self.headers.add(header.name, header.value);
        Ok(())
    }

    #[inline]
    pub fn header_size(&self) -> usize {
        self.header_size
    }

    #[inline]
    pub fn content_length(&self) -> u64 {
        self.content_length
    }

    /// Decoded query string and form pairs, in arrival order.
    #[inline]
    pub fn param(&self) -> &ValueMap {
        &self.param
    }

    #[inline]
    pub fn param_mut(&mut self) -> &mut ValueMap {
        &mut self.param
    }

    /// Pairs of the Cookie header, parsed on first use.
    pub fn cookie(&mut self) -> &ValueMap {
        let headers = &self.headers;
        self.cookie.get_or_insert_with(|| {
            headers
                .get("cookie")
                .map(parse_cookie_header)
                .unwrap_or_default()
        })
    }

    /// File parts of a decoded multipart/form-data body.
    #[inline]
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub(crate) fn set_parts(&mut self, parts: Vec<Part>) {
        self.parts = parts;
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }
}
