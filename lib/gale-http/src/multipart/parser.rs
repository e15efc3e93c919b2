/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use bytes::{Buf, Bytes, BytesMut};
use memchr::memmem;
use mime::Mime;
use tokio::io::{AsyncRead, AsyncReadExt};

use gale_types::net::ValueMap;

use super::disposition::ContentDisposition;
use super::{MultipartSyntaxError, Part};
use crate::form::FormParseError;
use crate::parse::HeaderLine;

const READ_BUF_SIZE: usize = 4096;

/// Everything decoded out of a multipart/form-data body.
#[derive(Debug, Default)]
pub struct MultipartForm {
    pub parts: Vec<Part>,
    pub fields: Vec<(String, String)>,
}

struct PartHead {
    name: String,
    filename: Option<String>,
    content_type: String,
    content_param: ValueMap,
}

/// Incremental parser for a multipart/form-data body.
///
/// The parser reads the stream in chunks and attributes bytes to the current
/// part as soon as they can no longer be part of a delimiter, so memory use
/// stays bounded by the decoded content, not by the chunking of the stream.
///
/// `max_body_len` counts part header bytes and part data bytes, with the
/// delimiter lines excluded. Parsing stops with an error as soon as the count
/// passes the limit.
pub struct MultipartParser<R> {
    stream: R,
    delimiter: Vec<u8>,
    limit: Option<usize>,
    taken: usize,
    buf: BytesMut,
}

impl<R> MultipartParser<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(stream: R, boundary: &str, max_body_len: Option<usize>) -> Self {
        let mut delimiter = Vec::with_capacity(boundary.len() + 4);
        delimiter.extend_from_slice(b"\r\n--");
        delimiter.extend_from_slice(boundary.as_bytes());
        MultipartParser {
            stream,
            delimiter,
            limit: max_body_len,
            taken: 0,
            buf: BytesMut::with_capacity(READ_BUF_SIZE),
        }
    }

    pub async fn parse(mut self) -> Result<MultipartForm, FormParseError> {
        let mut form = MultipartForm::default();
        if self.read_initial_boundary().await? {
            return Ok(form);
        }

        loop {
            let head = self.read_part_head().await?;
            let (data, terminal) = self.read_part_body().await?;
            if let Some(filename) = head.filename {
                form.parts.push(Part {
                    name: head.name,
                    filename,
                    content_type: head.content_type,
                    content_param: head.content_param,
                    data,
                });
            } else {
                let value = String::from_utf8(data.into())
                    .map_err(|_| MultipartSyntaxError::InvalidFieldEncoding)?;
                form.fields.push((head.name, value));
            }
            if terminal {
                return Ok(form);
            }
        }
    }

    fn account(&mut self, n: usize) -> Result<(), FormParseError> {
        self.taken += n;
        if let Some(limit) = self.limit {
            if self.taken > limit {
                return Err(FormParseError::SizeLimitExceeded(limit));
            }
        }
        Ok(())
    }

    fn check_pending(&self, pending: usize) -> Result<(), FormParseError> {
        if let Some(limit) = self.limit {
            // an unfinished line may still turn out to be a delimiter line,
            // which is not counted
            let slack = self.delimiter.len() + 4;
            if self.taken + pending > limit + slack {
                return Err(FormParseError::SizeLimitExceeded(limit));
            }
        }
        Ok(())
    }

    async fn fill(&mut self) -> std::io::Result<usize> {
        self.stream.read_buf(&mut self.buf).await
    }

    /// Take the next CRLF ended line out of the buffer, without the CRLF.
    async fn next_line(&mut self) -> Result<Bytes, FormParseError> {
        let mut searched = 0;
        loop {
            if let Some(i) = memchr::memchr(b'\n', &self.buf[searched..]) {
                let end = searched + i;
                if end == 0 || self.buf[end - 1] != b'\r' {
                    return Err(MultipartSyntaxError::BareLineFeed.into());
                }
                let mut line = self.buf.split_to(end + 1);
                line.truncate(end - 1);
                return Ok(line.freeze());
            }

            searched = self.buf.len();
            self.check_pending(searched)?;
            if self.fill().await? == 0 {
                return Err(MultipartSyntaxError::UnexpectedEnd.into());
            }
        }
    }

    /// Read the line that opens the body. Returns true if it was the final
    /// boundary of a multipart body with no parts.
    async fn read_initial_boundary(&mut self) -> Result<bool, FormParseError> {
        let line = self.next_line().await?;
        let bare = &self.delimiter[2..];
        if line.as_ref() == bare {
            Ok(false)
        } else if line.len() == bare.len() + 2 && line.starts_with(bare) && line.ends_with(b"--") {
            Ok(true)
        } else {
            Err(MultipartSyntaxError::InvalidBoundaryLine.into())
        }
    }

    async fn read_part_head(&mut self) -> Result<PartHead, FormParseError> {
        let mut seen_disposition = false;
        let mut name: Option<String> = None;
        let mut filename: Option<String> = None;
        let mut content_type = String::new();
        let mut content_param = ValueMap::new();

        loop {
            let line = self.next_line().await?;
            self.account(line.len() + 2)?;
            if line.is_empty() {
                break;
            }

            let header =
                HeaderLine::parse(&line).map_err(MultipartSyntaxError::InvalidHeaderLine)?;
            if header.name.eq_ignore_ascii_case("content-disposition") {
                seen_disposition = true;
                let d = ContentDisposition::parse(header.value)?;
                name = d.name.map(str::to_string);
                filename = d.filename.map(str::to_string);
            } else if header.name.eq_ignore_ascii_case("content-type") {
                let mime = header
                    .value
                    .parse::<Mime>()
                    .map_err(|_| MultipartSyntaxError::InvalidContentType)?;
                content_type = mime.essence_str().to_string();
                for (param, value) in mime.params() {
                    content_param.set(param.as_str(), value.as_str());
                }
            }
        }

        if !seen_disposition {
            return Err(MultipartSyntaxError::MissingContentDisposition.into());
        }
        let Some(name) = name else {
            return Err(MultipartSyntaxError::MissingName.into());
        };
        Ok(PartHead {
            name,
            filename,
            content_type,
            content_param,
        })
    }

    /// Read data up to the next delimiter. Returns the data and whether the
    /// delimiter was the final one.
    async fn read_part_body(&mut self) -> Result<(Bytes, bool), FormParseError> {
        let mut data = BytesMut::new();
        loop {
            if let Some(i) = memmem::find(&self.buf, &self.delimiter) {
                if self.buf.len() < i + self.delimiter.len() + 2 {
                    // wait for the two bytes following the delimiter
                    if self.fill().await? == 0 {
                        return Err(MultipartSyntaxError::UnexpectedEnd.into());
                    }
                    continue;
                }

                self.account(i)?;
                data.extend_from_slice(&self.buf[0..i]);
                self.buf.advance(i + self.delimiter.len());

                let terminal = if self.buf[0] == b'\r' && self.buf[1] == b'\n' {
                    false
                } else if self.buf[0] == b'-' && self.buf[1] == b'-' {
                    true
                } else {
                    return Err(MultipartSyntaxError::DelimiterMismatch.into());
                };
                self.buf.advance(2);
                return Ok((data.freeze(), terminal));
            }

            // all bytes that can not open a delimiter belong to this part
            let keep = self.delimiter.len() - 1;
            if self.buf.len() > keep {
                let n = self.buf.len() - keep;
                self.account(n)?;
                data.extend_from_slice(&self.buf[0..n]);
                self.buf.advance(n);
            }
            if self.fill().await? == 0 {
                return Err(MultipartSyntaxError::UnexpectedEnd.into());
            }
        }
    }
}
