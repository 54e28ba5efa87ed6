// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The Encodable capability and the top-level entry points.
//!
//! Every wire shape implements both halves of [`Encode`]: write yourself, and
//! say how many bytes that takes. Neither half has a default, and the two must
//! agree byte for byte.
//!
//! [`Decode`] is the static dispatch table. The compiler picks the decoder from
//! the target type, so a typed call site can never ask for a shape the crate
//! doesn't know. The dynamic side of the same idea lives in
//! [`dispatch`](crate::dispatch).

use crate::error::{Error, Result};
use crate::io::{Output, Reader, SliceOutput};
use crate::options::DecodeOptions;

/// Serialize self; report serialized length.
pub trait Encode {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O);

    fn encoded_size(&self) -> usize;

    fn encode(&self) -> Vec<u8> {
        let mut buf = Vec::with_capacity(self.encoded_size());
        self.encode_to(&mut buf);
        buf
    }
}

/// Materialize a value from a cursor.
pub trait Decode: Sized {
    fn decode(input: &mut Reader<'_>) -> Result<Self>;
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        (**self).encode_to(dest);
    }

    fn encoded_size(&self) -> usize {
        (**self).encoded_size()
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        (**self).encode_to(dest);
    }

    fn encoded_size(&self) -> usize {
        (**self).encoded_size()
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        input.descend(T::decode).map(Box::new)
    }
}

// ============================================================================
// ENTRY POINTS
// ============================================================================

/// Encode a value to a fresh buffer.
pub fn encode<T: Encode + ?Sized>(value: &T) -> Vec<u8> {
    value.encode()
}

/// Encode into a caller-provided slice, returning the byte count.
///
/// Nothing is written if the slice is too small.
pub fn encode_into_slice<T: Encode + ?Sized>(value: &T, buf: &mut [u8]) -> Result<usize> {
    let needed = value.encoded_size();
    if needed > buf.len() {
        return Err(Error::BufferTooSmall {
            needed,
            available: buf.len(),
        });
    }
    let available = buf.len();
    let mut out = SliceOutput::new(buf);
    value.encode_to(&mut out);
    if out.overflowed() {
        return Err(Error::BufferTooSmall { needed, available });
    }
    Ok(out.written())
}

/// Decode a value that must span the whole input.
pub fn decode<T: Decode>(bytes: &[u8]) -> Result<T> {
    decode_with(bytes, &DecodeOptions::default())
}

/// [`decode`] under explicit options.
pub fn decode_with<T: Decode>(bytes: &[u8], options: &DecodeOptions) -> Result<T> {
    let mut reader = Reader::with_options(bytes, *options);
    let value = T::decode(&mut reader)?;
    reader.finish()?;
    Ok(value)
}

/// Decode a value from the front of `bytes`, returning it with the number of
/// bytes it occupied.
pub fn decode_prefix<T: Decode>(bytes: &[u8]) -> Result<(T, usize)> {
    let mut reader = Reader::new(bytes);
    let value = T::decode(&mut reader)?;
    Ok((value, reader.position()))
}
