// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fixed-width primitives: little-endian bytes, exactly as wide as the type.
//!
//! ```text
//! bool  1 byte   0x00 | 0x01 (decode: any nonzero is true unless strict)
//! u8    1 byte
//! u16   2 bytes  LE
//! u32   4 bytes  LE
//! u64   8 bytes  LE
//! u128 16 bytes  LE (low word first)
//! ()    0 bytes
//! ```

use tracing::debug;

use crate::codec::{Decode, Encode};
use crate::error::{Error, Result};
use crate::io::{Output, Reader};
use crate::options::BoolPolicy;

macro_rules! impl_fixed_width {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Encode for $ty {
                #[inline]
                fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
                    dest.write(&self.to_le_bytes());
                }

                #[inline]
                fn encoded_size(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }
            }

            impl Decode for $ty {
                #[inline]
                fn decode(input: &mut Reader<'_>) -> Result<Self> {
                    Ok(<$ty>::from_le_bytes(input.read_array()?))
                }
            }
        )*
    };
}

impl_fixed_width!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl Encode for bool {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        dest.push_byte(u8::from(*self));
    }

    fn encoded_size(&self) -> usize {
        1
    }
}

impl Decode for bool {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        read_flag(input)
    }
}

/// Read a boolean / presence byte under the reader's [`BoolPolicy`].
pub(crate) fn read_flag(input: &mut Reader<'_>) -> Result<bool> {
    let offset = input.position();
    let byte = input.read_byte()?;
    match (byte, input.options().booleans) {
        (0, _) => Ok(false),
        (1, _) => Ok(true),
        (_, BoolPolicy::Lenient) => {
            debug!(offset, byte, "accepted non-canonical boolean byte");
            Ok(true)
        }
        (_, BoolPolicy::Strict) => Err(Error::InvalidBool { offset, byte }),
    }
}

impl Encode for () {
    fn encode_to<O: Output + ?Sized>(&self, _dest: &mut O) {}

    fn encoded_size(&self) -> usize {
        0
    }
}

impl Decode for () {
    fn decode(_input: &mut Reader<'_>) -> Result<Self> {
        Ok(())
    }
}
