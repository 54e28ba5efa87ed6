// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Unsigned 128-bit integer.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Not, Rem, Shl, Shr, Sub};
use std::str::FromStr;

use malachite::Natural;

use super::{borrowing_sub, carrying_add, parse_decimal, widening_mul};
use crate::codec::{Decode, Encode};
use crate::error::{Error, Result};
use crate::io::{Output, Reader};

const NAME: &str = "U128";

/// Unsigned 128-bit integer stored as `[low, high]` 64-bit words.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct U128 {
    lo: u64,
    hi: u64,
}

impl U128 {
    pub const ZERO: Self = Self::from_words(0, 0);
    pub const ONE: Self = Self::from_words(1, 0);
    pub const MAX: Self = Self::from_words(u64::MAX, u64::MAX);
    pub const BITS: u32 = 128;

    pub const fn from_words(lo: u64, hi: u64) -> Self {
        Self { lo, hi }
    }

    /// `[low, high]`.
    pub const fn words(self) -> [u64; 2] {
        [self.lo, self.hi]
    }

    pub const fn low(self) -> u64 {
        self.lo
    }

    pub const fn high(self) -> u64 {
        self.hi
    }

    pub const fn is_zero(self) -> bool {
        self.lo == 0 && self.hi == 0
    }

    pub const fn leading_zeros(self) -> u32 {
        if self.hi == 0 {
            64 + self.lo.leading_zeros()
        } else {
            self.hi.leading_zeros()
        }
    }

    /// Number of significant bits (0 for zero).
    pub const fn bits(self) -> u32 {
        Self::BITS - self.leading_zeros()
    }

    /// Minimal little-endian byte length (0 for zero).
    pub const fn byte_len(self) -> usize {
        self.bits().div_ceil(8) as usize
    }

    pub fn to_le_bytes(self) -> [u8; 16] {
        let mut out = [0u8; 16];
        out[..8].copy_from_slice(&self.lo.to_le_bytes());
        out[8..].copy_from_slice(&self.hi.to_le_bytes());
        out
    }

    pub fn from_le_bytes(bytes: [u8; 16]) -> Self {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&bytes[..8]);
        hi.copy_from_slice(&bytes[8..]);
        Self::from_words(u64::from_le_bytes(lo), u64::from_le_bytes(hi))
    }

    // ------------------------------------------------------------------------
    // Add / Sub / Mul
    // ------------------------------------------------------------------------

    pub const fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let (lo, carry) = carrying_add(self.lo, rhs.lo, false);
        let (hi, overflow) = carrying_add(self.hi, rhs.hi, carry);
        (Self::from_words(lo, hi), overflow)
    }

    pub const fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let (lo, borrow) = borrowing_sub(self.lo, rhs.lo, false);
        let (hi, underflow) = borrowing_sub(self.hi, rhs.hi, borrow);
        (Self::from_words(lo, hi), underflow)
    }

    /// Schoolbook multiply: the full low x low product plus both cross terms
    /// folded into the high word. `hi x hi` only ever contributes overflow.
    pub const fn overflowing_mul(self, rhs: Self) -> (Self, bool) {
        let (lo, carry_hi) = widening_mul(self.lo, rhs.lo);
        let (cross_a, cross_a_hi) = widening_mul(self.lo, rhs.hi);
        let (cross_b, cross_b_hi) = widening_mul(self.hi, rhs.lo);

        let (hi, c1) = carry_hi.overflowing_add(cross_a);
        let (hi, c2) = hi.overflowing_add(cross_b);

        let overflow =
            (self.hi != 0 && rhs.hi != 0) || cross_a_hi != 0 || cross_b_hi != 0 || c1 || c2;
        (Self::from_words(lo, hi), overflow)
    }

    pub const fn wrapping_add(self, rhs: Self) -> Self {
        self.overflowing_add(rhs).0
    }

    pub const fn wrapping_sub(self, rhs: Self) -> Self {
        self.overflowing_sub(rhs).0
    }

    pub const fn wrapping_mul(self, rhs: Self) -> Self {
        self.overflowing_mul(rhs).0
    }

    /// Two's complement: complement both words, then add one.
    pub const fn wrapping_neg(self) -> Self {
        Self::from_words(!self.lo, !self.hi).wrapping_add(Self::ONE)
    }

    pub fn checked_add(self, rhs: Self) -> Result<Self> {
        match self.overflowing_add(rhs) {
            (sum, false) => Ok(sum),
            (_, true) => Err(overflow("add")),
        }
    }

    pub fn checked_sub(self, rhs: Self) -> Result<Self> {
        match self.overflowing_sub(rhs) {
            (diff, false) => Ok(diff),
            (_, true) => Err(overflow("sub")),
        }
    }

    pub fn checked_mul(self, rhs: Self) -> Result<Self> {
        match self.overflowing_mul(rhs) {
            (product, false) => Ok(product),
            (_, true) => Err(overflow("mul")),
        }
    }

    pub const fn saturating_add(self, rhs: Self) -> Self {
        match self.overflowing_add(rhs) {
            (sum, false) => sum,
            (_, true) => Self::MAX,
        }
    }

    pub const fn saturating_sub(self, rhs: Self) -> Self {
        match self.overflowing_sub(rhs) {
            (diff, false) => diff,
            (_, true) => Self::ZERO,
        }
    }

    pub const fn saturating_mul(self, rhs: Self) -> Self {
        match self.overflowing_mul(rhs) {
            (product, false) => product,
            (_, true) => Self::MAX,
        }
    }

    // ------------------------------------------------------------------------
    // Div / Rem (arbitrary precision)
    // ------------------------------------------------------------------------

    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Self::try_from(&(self.to_natural() / rhs.to_natural()))
    }

    pub fn checked_rem(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Self::try_from(&(self.to_natural() % rhs.to_natural()))
    }

    // ------------------------------------------------------------------------
    // Shifts
    // ------------------------------------------------------------------------

    /// Logical left shift; the amount is taken modulo 128.
    pub const fn wrapping_shl(self, n: u32) -> Self {
        let n = n & 127;
        if n == 0 {
            self
        } else if n >= 64 {
            Self::from_words(0, self.lo << (n - 64))
        } else {
            Self::from_words(self.lo << n, (self.hi << n) | (self.lo >> (64 - n)))
        }
    }

    /// Logical right shift; the amount is taken modulo 128.
    pub const fn wrapping_shr(self, n: u32) -> Self {
        let n = n & 127;
        if n == 0 {
            self
        } else if n >= 64 {
            Self::from_words(self.hi >> (n - 64), 0)
        } else {
            Self::from_words((self.lo >> n) | (self.hi << (64 - n)), self.hi >> n)
        }
    }

    // ------------------------------------------------------------------------
    // Arbitrary precision interop
    // ------------------------------------------------------------------------

    /// Pack the words big-endian (high then low) into a natural number.
    pub fn to_natural(self) -> Natural {
        Natural::from(u128::from(self))
    }
}

fn overflow(op: &'static str) -> Error {
    Error::Overflow { op, target: NAME }
}

// ============================================================================
// ORDERING / FORMATTING
// ============================================================================

impl Ord for U128 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.hi.cmp(&other.hi).then(self.lo.cmp(&other.lo))
    }
}

impl PartialOrd for U128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for U128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&u128::from(*self), f)
    }
}

impl fmt::Debug for U128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U128({})", self)
    }
}

impl fmt::LowerHex for U128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&u128::from(*self), f)
    }
}

impl FromStr for U128 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match parse_decimal(s, NAME)? {
            (true, _) => Err(Error::out_of_range(NAME, s)),
            (false, magnitude) => Ok(magnitude),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! from_unsigned {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for U128 {
                fn from(value: $ty) -> Self {
                    Self::from_words(value as u64, 0)
                }
            }
        )*
    };
}

macro_rules! try_from_signed {
    ($($ty:ty),*) => {
        $(
            impl TryFrom<$ty> for U128 {
                type Error = Error;

                fn try_from(value: $ty) -> Result<Self> {
                    u64::try_from(value)
                        .map(Self::from)
                        .map_err(|_| Error::out_of_range(NAME, value))
                }
            }
        )*
    };
}

from_unsigned!(u8, u16, u32, u64, usize);
try_from_signed!(i8, i16, i32, i64, isize);

impl From<u128> for U128 {
    fn from(value: u128) -> Self {
        Self::from_words(value as u64, (value >> 64) as u64)
    }
}

impl From<U128> for u128 {
    fn from(value: U128) -> Self {
        (u128::from(value.hi) << 64) | u128::from(value.lo)
    }
}

impl TryFrom<i128> for U128 {
    type Error = Error;

    fn try_from(value: i128) -> Result<Self> {
        u128::try_from(value)
            .map(Self::from)
            .map_err(|_| Error::out_of_range(NAME, value))
    }
}

impl TryFrom<&Natural> for U128 {
    type Error = Error;

    fn try_from(value: &Natural) -> Result<Self> {
        u128::try_from(value)
            .map(Self::from)
            .map_err(|_| Error::out_of_range(NAME, value))
    }
}

impl From<U128> for Natural {
    fn from(value: U128) -> Self {
        value.to_natural()
    }
}

// ============================================================================
// OPERATORS (wrapping)
// ============================================================================

impl Add for U128 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
}

impl Sub for U128 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }
}

impl Mul for U128 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }
}

impl Div for U128 {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero, like primitive integer division.
    fn div(self, rhs: Self) -> Self {
        match self.checked_div(rhs) {
            Ok(q) => q,
            Err(e) => panic!("U128 division failed: {e}"),
        }
    }
}

impl Rem for U128 {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero, like primitive integer remainder.
    fn rem(self, rhs: Self) -> Self {
        match self.checked_rem(rhs) {
            Ok(r) => r,
            Err(e) => panic!("U128 remainder failed: {e}"),
        }
    }
}

impl Not for U128 {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_words(!self.lo, !self.hi)
    }
}

impl BitAnd for U128 {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::from_words(self.lo & rhs.lo, self.hi & rhs.hi)
    }
}

impl BitOr for U128 {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_words(self.lo | rhs.lo, self.hi | rhs.hi)
    }
}

impl BitXor for U128 {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self::from_words(self.lo ^ rhs.lo, self.hi ^ rhs.hi)
    }
}

impl Shl<u32> for U128 {
    type Output = Self;

    fn shl(self, n: u32) -> Self {
        self.wrapping_shl(n)
    }
}

impl Shr<u32> for U128 {
    type Output = Self;

    fn shr(self, n: u32) -> Self {
        self.wrapping_shr(n)
    }
}

// ============================================================================
// WIRE
// ============================================================================

impl Encode for U128 {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        dest.write(&self.lo.to_le_bytes());
        dest.write(&self.hi.to_le_bytes());
    }

    fn encoded_size(&self) -> usize {
        16
    }
}

impl Decode for U128 {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        let lo = u64::decode(input)?;
        let hi = u64::decode(input)?;
        Ok(Self::from_words(lo, hi))
    }
}
