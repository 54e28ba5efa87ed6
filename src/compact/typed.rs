// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Typed compact wrappers.
//!
//! `Compact<T>` widens `T` to a [`U128`] magnitude before encoding and range
//! checks on the way back. Signed values encode their absolute value, so
//! `Compact(-5i32)` and `Compact(5i32)` share a wire form and decode to `5`.

use std::fmt;

use malachite::base::num::logic::traits::SignificantBits;
use malachite::Natural;

use super::{
    compact_len, compact_len_natural, decode_compact, decode_compact_natural, encode_compact,
    encode_compact_natural,
};
use crate::codec::{Decode, Encode};
use crate::error::{Error, Result};
use crate::io::{Output, Reader};
use crate::options::COMPACT_MAX_BYTES;
use crate::wide::{I128, U128};

/// Integers that can go through the compact encoding.
pub trait CompactInt: Copy {
    const NAME: &'static str;

    fn to_magnitude(self) -> U128;

    fn from_magnitude(magnitude: U128) -> Result<Self>;
}

macro_rules! compact_unsigned {
    ($($ty:ty),*) => {
        $(
            impl CompactInt for $ty {
                const NAME: &'static str = stringify!($ty);

                fn to_magnitude(self) -> U128 {
                    U128::from(self)
                }

                fn from_magnitude(magnitude: U128) -> Result<Self> {
                    <$ty>::try_from(u128::from(magnitude))
                        .map_err(|_| Error::out_of_range(Self::NAME, magnitude))
                }
            }
        )*
    };
}

macro_rules! compact_signed {
    ($($ty:ty),*) => {
        $(
            impl CompactInt for $ty {
                const NAME: &'static str = stringify!($ty);

                fn to_magnitude(self) -> U128 {
                    U128::from(self.unsigned_abs())
                }

                fn from_magnitude(magnitude: U128) -> Result<Self> {
                    <$ty>::try_from(u128::from(magnitude))
                        .map_err(|_| Error::out_of_range(Self::NAME, magnitude))
                }
            }
        )*
    };
}

compact_unsigned!(u8, u16, u32, u64, u128, usize);
compact_signed!(i8, i16, i32, i64, i128);

impl CompactInt for U128 {
    const NAME: &'static str = "U128";

    fn to_magnitude(self) -> U128 {
        self
    }

    fn from_magnitude(magnitude: U128) -> Result<Self> {
        Ok(magnitude)
    }
}

impl CompactInt for I128 {
    const NAME: &'static str = "I128";

    fn to_magnitude(self) -> U128 {
        self.unsigned_abs()
    }

    fn from_magnitude(magnitude: U128) -> Result<Self> {
        I128::try_from(magnitude)
    }
}

/// An integer on the wire in compact form.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Compact<T>(pub T);

impl<T> From<T> for Compact<T> {
    fn from(value: T) -> Self {
        Compact(value)
    }
}

impl<T: fmt::Debug> fmt::Debug for Compact<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Compact({:?})", self.0)
    }
}

impl<T: fmt::Display> fmt::Display for Compact<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl<T: CompactInt> Encode for Compact<T> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_compact(self.0.to_magnitude(), dest);
    }

    fn encoded_size(&self) -> usize {
        compact_len(self.0.to_magnitude())
    }
}

impl<T: CompactInt> Decode for Compact<T> {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        decode_compact(input).and_then(T::from_magnitude).map(Compact)
    }
}

// ============================================================================
// ARBITRARY PRECISION
// ============================================================================

/// A compact natural over the whole mode-3 range, `[0, 2^536)`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CompactBig(Natural);

impl CompactBig {
    /// Wrap `value`, rejecting anything 67 bytes can't hold.
    pub fn new(value: Natural) -> Result<Self> {
        let bits = value.significant_bits();
        if bits > (COMPACT_MAX_BYTES as u64) * 8 {
            return Err(Error::out_of_range("CompactBig", value));
        }
        Ok(CompactBig(value))
    }

    pub fn value(&self) -> &Natural {
        &self.0
    }

    pub fn into_inner(self) -> Natural {
        self.0
    }
}

impl From<U128> for CompactBig {
    fn from(value: U128) -> Self {
        CompactBig(value.to_natural())
    }
}

impl fmt::Display for CompactBig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl Encode for CompactBig {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_compact_natural(&self.0, dest);
    }

    fn encoded_size(&self) -> usize {
        compact_len_natural(&self.0)
    }
}

impl Decode for CompactBig {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        decode_compact_natural(input).map(CompactBig)
    }
}
