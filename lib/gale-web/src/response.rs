/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io::Write;

use bytes::Bytes;
use http::{StatusCode, Version};

use gale_types::net::{SetCookie, ValueMap};

const RESERVED_LEN_FOR_HEAD: usize = 256;

pub struct Response {
    status: StatusCode,
    headers: ValueMap,
    body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Response {
            status,
            headers: ValueMap::for_headers(),
            body: Bytes::new(),
        }
    }

    pub fn text<B: Into<String>>(body: B) -> Self {
        let mut rsp = Response::new(StatusCode::OK);
        rsp.headers.set("content-type", "text/plain; charset=utf-8");
        rsp.body = Bytes::from(body.into());
        rsp
    }

    pub fn html<B: Into<String>>(body: B) -> Self {
        let mut rsp = Response::new(StatusCode::OK);
        rsp.headers.set("content-type", "text/html; charset=utf-8");
        rsp.body = Bytes::from(body.into());
        rsp
    }

    pub fn redirect(location: &str) -> Self {
        let mut rsp = Response::new(StatusCode::FOUND);
        rsp.headers.set("location", location);
        rsp
    }

    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[inline]
    pub fn headers(&self) -> &ValueMap {
        &self.headers
    }

    #[inline]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn set_header<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.set(name, value);
    }

    pub fn add_header<K, V>(&mut self, name: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.headers.add(name, value);
    }

    /// Add a Set-Cookie header. Each added cookie goes out on its own line.
    pub fn add_set_cookie(&mut self, cookie: &SetCookie) {
        self.headers.add("set-cookie", cookie.to_string());
    }

    pub fn set_body<B: Into<Bytes>>(&mut self, body: B) {
        self.body = body.into();
    }

    /// Write out the full response message for the given request version.
    ///
    /// Content-Length and Connection are always emitted by the server, so
    /// those keys are skipped if present in the header map.
    pub fn serialize(&self, version: Version) -> Vec<u8> {
        let mut buf = Vec::<u8>::with_capacity(self.body.len() + RESERVED_LEN_FOR_HEAD);
        let _ = write!(buf, "{:?} {}\r\n", version, self.status);
        for (name, values) in self.headers.iter() {
            if name == "content-length" || name == "connection" {
                continue;
            }
            for value in values {
                let _ = write!(buf, "{name}: {value}\r\n");
            }
        }
        let _ = write!(buf, "content-length: {}\r\n", self.body.len());
        buf.extend_from_slice(b"connection: close\r\n\r\n");
        buf.extend_from_slice(&self.body);
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn serialize_text() {
        let rsp = Response::text("hello");
        let buf = rsp.serialize(Version::HTTP_11);
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text,
            "HTTP/1.1 200 OK\r\n\
             content-type: text/plain; charset=utf-8\r\n\
             content-length: 5\r\n\
             connection: close\r\n\
             \r\n\
             hello"
        );
    }

    #[test]
    fn serialize_empty() {
        let rsp = Response::new(StatusCode::NOT_FOUND);
        let text = String::from_utf8(rsp.serialize(Version::HTTP_10)).unwrap();
        assert_eq!(
            text,
            "HTTP/1.0 404 Not Found\r\ncontent-length: 0\r\nconnection: close\r\n\r\n"
        );
    }

    #[test]
    fn serialize_set_cookies() {
        let mut rsp = Response::text("ok");
        rsp.add_set_cookie(&SetCookie::new("session", "abc").max_age(Duration::from_secs(60)));
        rsp.add_set_cookie(&SetCookie::new("gone", "").expired());
        let text = String::from_utf8(rsp.serialize(Version::HTTP_11)).unwrap();
        assert!(text.contains("set-cookie: session=abc; Max-Age=60\r\n"));
        assert!(text.contains("set-cookie: gone=; Max-Age=0\r\n"));
    }

    #[test]
    fn serialize_skips_reserved_headers() {
        let mut rsp = Response::text("data");
        rsp.set_header("Content-Length", "9999");
        rsp.set_header("Connection", "keep-alive");
        let text = String::from_utf8(rsp.serialize(Version::HTTP_11)).unwrap();
        assert!(text.contains("content-length: 4\r\n"));
        assert!(!text.contains("9999"));
        assert!(!text.contains("keep-alive"));
    }

    #[test]
    fn redirect_location() {
        let rsp = Response::redirect("/next");
        assert_eq!(rsp.status(), StatusCode::FOUND);
        assert_eq!(rsp.headers().get("location"), Some("/next"));
    }
}
