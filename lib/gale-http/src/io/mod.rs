/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use tokio::io::AsyncBufRead;

mod limited_read_until;
pub use limited_read_until::LimitedReadUntil;

pub trait LimitedLineReadExt: AsyncBufRead {
    /// Read bytes into `buf` until `delimiter` is found, taking at most
    /// `max_len` bytes from the reader.
    fn limited_read_until<'a>(
        &'a mut self,
        delimiter: u8,
        max_len: usize,
        buf: &'a mut Vec<u8>,
    ) -> LimitedReadUntil<'a, Self>
    where
        Self: Unpin,
    {
        LimitedReadUntil::new(self, delimiter, max_len, buf)
    }
}

impl<R: AsyncBufRead + ?Sized> LimitedLineReadExt for R {}
