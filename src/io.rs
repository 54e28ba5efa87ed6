// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Byte cursors.
//!
//! [`Reader`] walks a borrowed slice front to back. Every read is bounds-checked
//! and a short read is [`Error::Truncated`] carrying the offset. A decoder
//! never pads a short input. The reader also carries the [`DecodeOptions`] for
//! the call and a nesting counter bounded by `max_depth`.
//!
//! [`Output`] is the write side. Writes are infallible into growable sinks;
//! fixed-size destinations go through [`SliceOutput`], which refuses to write
//! past its end and remembers that it had to.

use crate::error::{Error, Result};
use crate::options::DecodeOptions;

// ============================================================================
// OUTPUT
// ============================================================================

/// A byte sink.
pub trait Output {
    fn write(&mut self, bytes: &[u8]);

    fn push_byte(&mut self, byte: u8) {
        self.write(&[byte]);
    }
}

impl Output for Vec<u8> {
    fn write(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }

    fn push_byte(&mut self, byte: u8) {
        self.push(byte);
    }
}

/// Counts bytes without storing them. Used to cross-check `encoded_size`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SizeCounter(pub usize);

impl Output for SizeCounter {
    fn write(&mut self, bytes: &[u8]) {
        self.0 += bytes.len();
    }
}

/// Writes into a fixed slice. Overflowing writes are dropped and flagged.
#[derive(Debug)]
pub struct SliceOutput<'a> {
    buf: &'a mut [u8],
    pos: usize,
    overflowed: bool,
}

impl<'a> SliceOutput<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            overflowed: false,
        }
    }

    pub fn written(&self) -> usize {
        self.pos
    }

    pub fn overflowed(&self) -> bool {
        self.overflowed
    }
}

impl Output for SliceOutput<'_> {
    fn write(&mut self, bytes: &[u8]) {
        let end = self.pos + bytes.len();
        match self.buf.get_mut(self.pos..end) {
            Some(dst) if !self.overflowed => {
                dst.copy_from_slice(bytes);
                self.pos = end;
            }
            _ => self.overflowed = true,
        }
    }
}

// ============================================================================
// READER
// ============================================================================

/// Sequential reader over a borrowed byte slice.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
    options: DecodeOptions,
    depth: usize,
    zero_width: usize,
}

impl<'a> Reader<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self::with_options(bytes, DecodeOptions::default())
    }

    pub fn with_options(bytes: &'a [u8], options: DecodeOptions) -> Self {
        Self {
            bytes,
            pos: 0,
            options,
            depth: 0,
            zero_width: 0,
        }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Offset of the next unread byte.
    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    pub fn peek_byte(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    pub fn read_byte(&mut self) -> Result<u8> {
        let byte = self.peek_byte().ok_or_else(|| self.truncated(1))?;
        self.pos += 1;
        Ok(byte)
    }

    pub fn read_slice(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.bytes.len())
            .ok_or_else(|| self.truncated(len))?;
        let slice = &self.bytes[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_slice(N)?);
        Ok(out)
    }

    /// Fails with `TrailingBytes` unless the input is exhausted.
    pub fn finish(&self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(Error::TrailingBytes {
                offset: self.pos,
                remaining: self.remaining(),
            })
        }
    }

    /// Run `f` one nesting level deeper, failing if that exceeds `max_depth`.
    pub fn descend<T>(&mut self, f: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        if self.depth >= self.options.max_depth {
            return Err(Error::DepthLimit {
                max: self.options.max_depth,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Account for one container element that started at `start`.
    ///
    /// Elements that consumed nothing draw on the `max_zero_width` budget,
    /// which is shared by the whole decode.
    pub(crate) fn note_element(&mut self, start: usize) -> Result<()> {
        if self.pos != start {
            return Ok(());
        }
        self.zero_width += 1;
        if self.zero_width > self.options.max_zero_width {
            return Err(Error::ZeroWidthLimit {
                offset: self.pos,
                max: self.options.max_zero_width,
            });
        }
        Ok(())
    }

    /// Capacity hint for a decoded element count: never more than the bytes
    /// left, so a hostile length prefix can't force a huge allocation.
    pub(crate) fn capacity_hint(&self, count: usize) -> usize {
        count.min(self.remaining())
    }

    pub(crate) fn truncated(&self, needed: usize) -> Error {
        Error::Truncated {
            offset: self.pos,
            needed,
            remaining: self.remaining(),
        }
    }
}
