/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use super::MultipartSyntaxError;

/// Borrowed view of a Content-Disposition header value in form-data style.
///
/// Attribute values are taken as opaque text. Surrounding double quotes are
/// stripped but no unescaping is done.
pub(super) struct ContentDisposition<'a> {
    pub(super) name: Option<&'a str>,
    pub(super) filename: Option<&'a str>,
}

impl<'a> ContentDisposition<'a> {
    pub(super) fn parse(value: &'a str) -> Result<ContentDisposition<'a>, MultipartSyntaxError> {
        let mut fields = value.split(';');
        let dtype = fields.next().unwrap_or_default();
        if !dtype.trim().eq_ignore_ascii_case("form-data") {
            return Err(MultipartSyntaxError::InvalidContentDisposition);
        }

        let mut name = None;
        let mut filename = None;
        for field in fields {
            let Some((k, v)) = field.split_once('=') else {
                continue;
            };
            let k = k.trim();
            let v = strip_quotes(v.trim());
            if k.eq_ignore_ascii_case("name") {
                name = Some(v);
            } else if k.eq_ignore_ascii_case("filename") {
                filename = Some(v);
            }
        }

        Ok(ContentDisposition { name, filename })
    }
}

fn strip_quotes(v: &str) -> &str {
    if v.len() >= 2 && v.starts_with('"') && v.ends_with('"') {
        &v[1..v.len() - 1]
    } else {
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_field() {
        let d = ContentDisposition::parse("form-data; name=\"hello\"").unwrap();
        assert_eq!(d.name, Some("hello"));
        assert!(d.filename.is_none());
    }

    #[test]
    fn parse_file() {
        let d = ContentDisposition::parse("form-data; name=\"file\"; filename=\"a.txt\"").unwrap();
        assert_eq!(d.name, Some("file"));
        assert_eq!(d.filename, Some("a.txt"));
    }

    #[test]
    fn parse_unquoted_and_swapped() {
        let d = ContentDisposition::parse("FORM-DATA; filename=a.txt; name=file").unwrap();
        assert_eq!(d.name, Some("file"));
        assert_eq!(d.filename, Some("a.txt"));
    }

    #[test]
    fn parse_empty_filename() {
        let d = ContentDisposition::parse("form-data; name=\"file\"; filename=\"\"").unwrap();
        assert_eq!(d.filename, Some(""));
    }

    #[test]
    fn parse_no_name() {
        let d = ContentDisposition::parse("form-data").unwrap();
        assert!(d.name.is_none());
        assert!(d.filename.is_none());
    }

    #[test]
    fn parse_wrong_type() {
        assert!(ContentDisposition::parse("attachment; name=\"x\"").is_err());
    }
}
