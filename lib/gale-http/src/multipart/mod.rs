/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use crate::form::FormParseError;
use crate::header;
use crate::server::Request;

mod error;
pub use error::MultipartSyntaxError;

mod part;
pub use part::Part;

mod disposition;

mod parser;
pub use parser::{MultipartForm, MultipartParser};

/// Decode the multipart/form-data body of the request.
///
/// Simple form fields are merged into the request param map and the file
/// parts are returned. Nothing is merged if decoding fails. The body reader
/// is consumed by this call.
pub async fn parse_multipart_form(
    req: &mut Request,
    max_body_len: Option<usize>,
) -> Result<Vec<Part>, FormParseError> {
    let Some(mime) = header::content_type(&req.headers) else {
        return Err(FormParseError::UnsupportedContentType);
    };
    if !header::is_multipart_form_data(&mime) {
        return Err(FormParseError::UnsupportedContentType);
    }
    let boundary = match header::multipart_boundary(&mime) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => return Err(MultipartSyntaxError::MissingBoundary.into()),
    };

    let Some(reader) = req.body_mut().take_reader() else {
        return Err(FormParseError::AlreadyConsumed);
    };
    let form = MultipartParser::new(reader, &boundary, max_body_len)
        .parse()
        .await?;
    for (name, value) in form.fields {
        req.param_mut().add(name, value);
    }
    Ok(form.parts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::io;
    use tokio::io::BufReader;
    use tokio_util::io::StreamReader;

    async fn request_for(msg: String) -> Request {
        let stream = tokio_stream::iter(vec![io::Result::Ok(Bytes::from(msg))]);
        let reader = BufReader::new(StreamReader::new(stream));
        Request::parse(reader, 8192).await.unwrap()
    }

    fn post_with_type(content_type: &str, body: &str) -> String {
        format!(
            "POST /upload HTTP/1.1\r\n\
             Host: example.net\r\n\
             Content-Type: {content_type}\r\n\
             Content-Length: {}\r\n\
             \r\n\
             {body}",
            body.len()
        )
    }

    #[tokio::test]
    async fn decode_from_request() {
        let body = "--deadbeef\r\n\
            Content-Disposition: form-data; name=\"a\"\r\n\
            \r\n\
            v\r\n\
            --deadbeef\r\n\
            Content-Disposition: form-data; name=\"f\"; filename=\"x.bin\"\r\n\
            \r\n\
            data\r\n\
            --deadbeef--\r\n";
        let msg = post_with_type("multipart/form-data; boundary=deadbeef", body);
        let mut req = request_for(msg).await;

        let parts = parse_multipart_form(&mut req, None).await.unwrap();
        assert_eq!(req.param().get("a"), Some("v"));
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].name, "f");
        assert_eq!(parts[0].data.as_ref(), b"data");
        assert!(req.body_mut().take_reader().is_none());
    }

    #[tokio::test]
    async fn wrong_content_type() {
        let msg = post_with_type("text/plain", "not a form");
        let mut req = request_for(msg).await;

        let err = parse_multipart_form(&mut req, None).await.unwrap_err();
        assert!(matches!(err, FormParseError::UnsupportedContentType));
        // the body is left for the handler
        assert!(req.body_mut().take_reader().is_some());
    }

    #[tokio::test]
    async fn missing_boundary() {
        let msg = post_with_type("multipart/form-data", "--x--\r\n");
        let mut req = request_for(msg).await;

        let err = parse_multipart_form(&mut req, None).await.unwrap_err();
        assert!(matches!(
            err,
            FormParseError::MalformedMultipart(MultipartSyntaxError::MissingBoundary)
        ));
    }

    #[tokio::test]
    async fn consumed_body() {
        let body = "--deadbeef\r\n--deadbeef--\r\n";
        let msg = post_with_type("multipart/form-data; boundary=deadbeef", body);
        let mut req = request_for(msg).await;
        req.body_mut().discard();

        let err = parse_multipart_form(&mut req, None).await.unwrap_err();
        assert!(matches!(err, FormParseError::AlreadyConsumed));
    }

    #[tokio::test]
    async fn failed_decode_merges_nothing() {
        let body = "--deadbeef\r\n\
            Content-Disposition: form-data; name=\"a\"\r\n\
            \r\n\
            v\r\n\
            --deadbeef\r\n\
            Content-Disposition: form-data; filename=\"no-name\"\r\n\
            \r\n\
            v2\r\n\
            --deadbeef--\r\n";
        let msg = post_with_type("multipart/form-data; boundary=deadbeef", body);
        let mut req = request_for(msg).await;

        let err = parse_multipart_form(&mut req, None).await.unwrap_err();
        assert!(matches!(
            err,
            FormParseError::MalformedMultipart(MultipartSyntaxError::MissingName)
        ));
        assert!(req.param().is_empty());
    }
}
