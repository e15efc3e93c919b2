/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::io;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use bytes::{Bytes, BytesMut};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, ReadBuf};

#[derive(Debug, Error)]
pub enum BodyReadError {
    #[error("body size limit exceeded (> {0})")]
    SizeLimitExceeded(usize),
    #[error("io failed: {0:?}")]
    IoFailed(#[from] io::Error),
}

/// Reader for a fixed length request body.
///
/// Reading stops after the declared number of bytes even if the underlying
/// stream has more data buffered. An early close of the stream is reported
/// as an [io::ErrorKind::UnexpectedEof] error.
pub struct BodyReader {
    stream: Box<dyn AsyncRead + Send + Unpin>,
    left: u64,
}

impl std::fmt::Debug for BodyReader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BodyReader")
            .field("left", &self.left)
            .finish_non_exhaustive()
    }
}

impl BodyReader {
    pub(crate) fn new<R>(stream: R, content_length: u64) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        BodyReader {
            stream: Box::new(stream),
            left: content_length,
        }
    }

    #[inline]
    pub fn left(&self) -> u64 {
        self.left
    }

    #[inline]
    pub fn finished(&self) -> bool {
        self.left == 0
    }

    /// Read the remaining body bytes into a single buffer.
    ///
    /// If `max_size` is set and the remaining length exceeds it, no bytes are
    /// read and the body is left untouched.
    pub async fn read_all(&mut self, max_size: Option<usize>) -> Result<Bytes, BodyReadError> {
        if let Some(max_size) = max_size {
            if self.left > max_size as u64 {
                return Err(BodyReadError::SizeLimitExceeded(max_size));
            }
        }

        let mut buf = BytesMut::with_capacity(self.left.min(8192) as usize);
        while self.left > 0 {
            self.read_buf(&mut buf).await?;
        }
        Ok(buf.freeze())
    }
}

impl AsyncRead for BodyReader {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        let this = self.get_mut();
        if this.left == 0 {
            return Poll::Ready(Ok(()));
        }

        let len = (buf.remaining() as u64).min(this.left) as usize;
        let mut limited_buf = ReadBuf::new(buf.initialize_unfilled_to(len));
        ready!(Pin::new(&mut this.stream).poll_read(cx, &mut limited_buf))?;
        let nr = limited_buf.filled().len();
        if nr == 0 {
            return Poll::Ready(Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "reader closed while reading fixed length body",
            )));
        }

        buf.advance(nr);
        this.left -= nr as u64;
        Poll::Ready(Ok(()))
    }
}

#[derive(Debug)]
enum BodyState {
    Pending(BodyReader),
    Consumed,
}

/// Single use handle to a request body.
///
/// The reader can be taken out exactly once. Form decoding takes it when it
/// runs, so a handler that wants the raw bytes has to get there first.
#[derive(Debug)]
pub struct Body {
    state: BodyState,
}

impl Body {
    pub fn new<R>(stream: R, content_length: u64) -> Self
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        Body {
            state: BodyState::Pending(BodyReader::new(stream, content_length)),
        }
    }

    pub fn empty() -> Self {
        Body::new(tokio::io::empty(), 0)
    }

    #[inline]
    pub fn is_consumed(&self) -> bool {
        matches!(self.state, BodyState::Consumed)
    }

    pub fn take_reader(&mut self) -> Option<BodyReader> {
        match std::mem::replace(&mut self.state, BodyState::Consumed) {
            BodyState::Pending(reader) => Some(reader),
            BodyState::Consumed => None,
        }
    }

    pub fn discard(&mut self) {
        self.state = BodyState::Consumed;
    }
}
