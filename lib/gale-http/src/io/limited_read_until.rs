/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::future::Future;
use std::io;
use std::mem;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use tokio::io::AsyncBufRead;

pub struct LimitedReadUntil<'a, R: ?Sized> {
    reader: &'a mut R,
    delimiter: u8,
    read: usize,
    max_len: usize,
    buf: &'a mut Vec<u8>,
}

impl<R: ?Sized + Unpin> Unpin for LimitedReadUntil<'_, R> {}

impl<'a, R: AsyncBufRead + ?Sized + Unpin> LimitedReadUntil<'a, R> {
    pub(super) fn new(reader: &'a mut R, delimiter: u8, max_len: usize, buf: &'a mut Vec<u8>) -> Self {
        LimitedReadUntil {
            reader,
            delimiter,
            read: 0,
            max_len,
            buf,
        }
    }
}

/// Read bytes into `buf` until `delimiter` is seen, eof is reached, or at least
/// `max_len` bytes have been taken from the reader.
///
/// Returns whether the delimiter was found within the limit, and the number of
/// bytes moved into `buf`.
pub(super) fn read_until_internal<R: AsyncBufRead + ?Sized>(
    mut reader: Pin<&mut R>,
    cx: &mut Context<'_>,
    delimiter: u8,
    buf: &mut Vec<u8>,
    read: &mut usize,
    max_len: usize,
) -> Poll<io::Result<(bool, usize)>> {
    loop {
        let (done, used) = {
            let available = ready!(reader.as_mut().poll_fill_buf(cx))?;
            if let Some(i) = memchr::memchr(delimiter, available) {
                buf.extend_from_slice(&available[0..=i]);
                (true, i + 1)
            } else {
                buf.extend_from_slice(available);
                (false, available.len())
            }
        };
        reader.as_mut().consume(used);
        *read += used;
        if done || used == 0 || *read >= max_len {
            let found = done && *read <= max_len;
            return Poll::Ready(Ok((found, mem::replace(read, 0))));
        }
    }
}

impl<R: AsyncBufRead + ?Sized + Unpin> Future for LimitedReadUntil<'_, R> {
    type Output = io::Result<(bool, usize)>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Self {
            reader,
            delimiter,
            read,
            max_len,
            buf,
        } = &mut *self;
        read_until_internal(Pin::new(reader), cx, *delimiter, buf, read, *max_len)
    }
}
