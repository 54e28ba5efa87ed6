// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sequences, strings, byte strings and fixed-length arrays.

use crate::codec::{Decode, Encode};
use crate::compact::{decode_len, encode_len, len_prefix_size};
use crate::error::{Error, Result};
use crate::io::{Output, Reader};

// ============================================================================
// SEQUENCE<T>
// ============================================================================

impl<T: Encode> Encode for [T] {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_len(self.len(), dest);
        for item in self {
            item.encode_to(dest);
        }
    }

    fn encoded_size(&self) -> usize {
        len_prefix_size(self.len()) + self.iter().map(Encode::encoded_size).sum::<usize>()
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        self.as_slice().encode_to(dest);
    }

    fn encoded_size(&self) -> usize {
        self.as_slice().encoded_size()
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        let len = decode_len(input)?;
        decode_elements(input, len)
    }
}

/// Decode exactly `count` elements, one nesting level down.
pub(crate) fn decode_elements<T: Decode>(input: &mut Reader<'_>, count: usize) -> Result<Vec<T>> {
    input.descend(|input| {
        let mut items = Vec::with_capacity(input.capacity_hint(count));
        for _ in 0..count {
            let start = input.position();
            items.push(T::decode(input)?);
            input.note_element(start)?;
        }
        Ok(items)
    })
}

// ============================================================================
// FIXED LENGTH
// ============================================================================

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        for item in self {
            item.encode_to(dest);
        }
    }

    fn encoded_size(&self) -> usize {
        self.iter().map(Encode::encoded_size).sum()
    }
}

impl<T: Decode, const N: usize> Decode for [T; N] {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        let items = decode_elements::<T>(input, N)?;
        <[T; N]>::try_from(items).map_err(|items| Error::out_of_range("array length", items.len()))
    }
}

/// A homogeneous run whose length comes from context, not the stream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FixedSequence<T>(pub Vec<T>);

impl<T> FixedSequence<T> {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T: Decode> FixedSequence<T> {
    /// Decode exactly `len` elements with no prefix.
    pub fn decode_exact(input: &mut Reader<'_>, len: usize) -> Result<Self> {
        decode_elements(input, len).map(FixedSequence)
    }
}

impl<T> From<Vec<T>> for FixedSequence<T> {
    fn from(items: Vec<T>) -> Self {
        FixedSequence(items)
    }
}

impl<T: Encode> Encode for FixedSequence<T> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        for item in &self.0 {
            item.encode_to(dest);
        }
    }

    fn encoded_size(&self) -> usize {
        self.0.iter().map(Encode::encoded_size).sum()
    }
}

// ============================================================================
// STRINGS AND BYTES
// ============================================================================

/// Length-prefixed raw bytes, read and written as one slice.
///
/// Same wire form as `Vec<u8>`, without the per-element decode loop.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Bytes(pub Vec<u8>);

impl From<Vec<u8>> for Bytes {
    fn from(bytes: Vec<u8>) -> Self {
        Bytes(bytes)
    }
}

impl From<&[u8]> for Bytes {
    fn from(bytes: &[u8]) -> Self {
        Bytes(bytes.to_vec())
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

pub(crate) fn encode_raw<O: Output + ?Sized>(bytes: &[u8], dest: &mut O) {
    encode_len(bytes.len(), dest);
    dest.write(bytes);
}

pub(crate) fn raw_size(bytes: &[u8]) -> usize {
    len_prefix_size(bytes.len()) + bytes.len()
}

impl Encode for Bytes {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_raw(&self.0, dest);
    }

    fn encoded_size(&self) -> usize {
        raw_size(&self.0)
    }
}

impl Decode for Bytes {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        read_prefixed_bytes(input).map(|raw| Bytes(raw.to_vec()))
    }
}

pub(crate) fn read_prefixed_bytes<'a>(input: &mut Reader<'a>) -> Result<&'a [u8]> {
    let len = decode_len(input)?;
    input.read_slice(len)
}

pub(crate) fn read_string(input: &mut Reader<'_>) -> Result<String> {
    let len = decode_len(input)?;
    let start = input.position();
    let raw = input.read_slice(len)?;
    std::str::from_utf8(raw)
        .map(str::to_owned)
        .map_err(|err| Error::InvalidUtf8 {
            offset: start + err.valid_up_to(),
            detail: err.to_string(),
        })
}

impl Encode for str {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_raw(self.as_bytes(), dest);
    }

    fn encoded_size(&self) -> usize {
        raw_size(self.as_bytes())
    }
}

impl Encode for String {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        self.as_str().encode_to(dest);
    }

    fn encoded_size(&self) -> usize {
        self.as_str().encoded_size()
    }
}

impl Decode for String {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        read_string(input)
    }
}
