// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Signed 128-bit integer in two's complement.
//!
//! Same `[low, high]` words as [`U128`]; the top bit of `high` is the sign.
//! Addition and subtraction are the unsigned word ops, with overflow detected
//! from the operand and result signs. Multiplication multiplies magnitudes and
//! applies the XOR of the input signs, which also gives the right wrapped bits
//! since negation commutes with reduction mod 2^128.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub};
use std::str::FromStr;

use malachite::{Integer, Natural};

use super::{parse_decimal, U128};
use crate::codec::{Decode, Encode};
use crate::error::{Error, Result};
use crate::io::{Output, Reader};

const NAME: &str = "I128";
const SIGN_BIT: u64 = 1 << 63;

/// Signed 128-bit integer stored as `[low, high]` 64-bit words.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct I128 {
    bits: U128,
}

impl I128 {
    pub const ZERO: Self = Self::from_words(0, 0);
    pub const ONE: Self = Self::from_words(1, 0);
    pub const MINUS_ONE: Self = Self::from_words(u64::MAX, u64::MAX);
    pub const MAX: Self = Self::from_words(u64::MAX, u64::MAX >> 1);
    pub const MIN: Self = Self::from_words(0, SIGN_BIT);

    pub const fn from_words(lo: u64, hi: u64) -> Self {
        Self {
            bits: U128::from_words(lo, hi),
        }
    }

    /// Reinterpret the two's complement bit pattern.
    pub const fn from_bits(bits: U128) -> Self {
        Self { bits }
    }

    pub const fn to_bits(self) -> U128 {
        self.bits
    }

    /// `[low, high]`.
    pub const fn words(self) -> [u64; 2] {
        self.bits.words()
    }

    pub const fn is_negative(self) -> bool {
        self.bits.high() & SIGN_BIT != 0
    }

    pub const fn is_zero(self) -> bool {
        self.bits.is_zero()
    }

    /// -1, 0 or 1.
    pub const fn signum(self) -> i32 {
        if self.is_negative() {
            -1
        } else if self.is_zero() {
            0
        } else {
            1
        }
    }

    /// Two's complement negation. `MIN` negates to itself.
    pub const fn wrapping_neg(self) -> Self {
        Self::from_bits(self.bits.wrapping_neg())
    }

    /// Absolute value as the unsigned type; exact for `MIN` as well.
    pub const fn unsigned_abs(self) -> U128 {
        if self.is_negative() {
            self.bits.wrapping_neg()
        } else {
            self.bits
        }
    }

    /// Absolute value, wrapping `MIN` to itself.
    pub const fn wrapping_abs(self) -> Self {
        Self::from_bits(self.unsigned_abs())
    }

    /// Absolute value; `MIN` has none in range.
    pub fn checked_abs(self) -> Result<Self> {
        if self == Self::MIN {
            Err(overflow("abs"))
        } else {
            Ok(self.wrapping_abs())
        }
    }

    pub fn checked_neg(self) -> Result<Self> {
        if self == Self::MIN {
            Err(overflow("neg"))
        } else {
            Ok(self.wrapping_neg())
        }
    }

    // ------------------------------------------------------------------------
    // Add / Sub / Mul
    // ------------------------------------------------------------------------

    pub const fn overflowing_add(self, rhs: Self) -> (Self, bool) {
        let sum = Self::from_bits(self.bits.overflowing_add(rhs.bits).0);
        let overflow =
            self.is_negative() == rhs.is_negative() && sum.is_negative() != self.is_negative();
        (sum, overflow)
    }

    pub const fn overflowing_sub(self, rhs: Self) -> (Self, bool) {
        let diff = Self::from_bits(self.bits.overflowing_sub(rhs.bits).0);
        let overflow =
            self.is_negative() != rhs.is_negative() && diff.is_negative() != self.is_negative();
        (diff, overflow)
    }

    pub const fn overflowing_mul(self, rhs: Self) -> (Self, bool) {
        let negative = self.is_negative() != rhs.is_negative();
        let (magnitude, unsigned_overflow) =
            self.unsigned_abs().overflowing_mul(rhs.unsigned_abs());

        let product = if negative {
            magnitude.wrapping_neg()
        } else {
            magnitude
        };

        // Largest magnitude each sign can hold: 2^127 - 1 positive, 2^127 negative.
        let limit_hi = if negative { SIGN_BIT } else { SIGN_BIT - 1 };
        let limit_lo = if negative { 0 } else { u64::MAX };
        let exceeds = magnitude.high() > limit_hi
            || (magnitude.high() == limit_hi && magnitude.low() > limit_lo);

        (Self::from_bits(product), unsigned_overflow || exceeds)
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

    /// Overflow can only happen toward the sign of `rhs`.
    pub const fn saturating_add(self, rhs: Self) -> Self {
        match self.overflowing_add(rhs) {
            (sum, false) => sum,
            (_, true) if rhs.is_negative() => Self::MIN,
            (_, true) => Self::MAX,
        }
    }

    pub const fn saturating_sub(self, rhs: Self) -> Self {
        match self.overflowing_sub(rhs) {
            (diff, false) => diff,
            (_, true) if rhs.is_negative() => Self::MAX,
            (_, true) => Self::MIN,
        }
    }

    pub const fn saturating_mul(self, rhs: Self) -> Self {
        match self.overflowing_mul(rhs) {
            (product, false) => product,
            (_, true) if self.is_negative() != rhs.is_negative() => Self::MIN,
            (_, true) => Self::MAX,
        }
    }

    // ------------------------------------------------------------------------
    // Div / Rem (arbitrary precision, truncating toward zero)
    // ------------------------------------------------------------------------

    pub fn checked_div(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Self::try_from(&(self.to_integer() / rhs.to_integer())).map_err(|_| overflow("div"))
    }

    /// Remainder with the sign of the dividend.
    pub fn checked_rem(self, rhs: Self) -> Result<Self> {
        if rhs.is_zero() {
            return Err(Error::DivisionByZero);
        }
        Self::try_from(&(self.to_integer() % rhs.to_integer()))
    }

    /// Division where `MIN / -1` wraps to `MIN`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero, like `i128::wrapping_div`.
    pub fn wrapping_div(self, rhs: Self) -> Self {
        match self.checked_div(rhs) {
            Ok(quotient) => quotient,
            Err(Error::Overflow { .. }) => Self::MIN,
            Err(err) => panic!("I128 division failed: {err}"),
        }
    }

    // ------------------------------------------------------------------------
    // Shifts
    // ------------------------------------------------------------------------

    pub const fn wrapping_shl(self, n: u32) -> Self {
        Self::from_bits(self.bits.wrapping_shl(n))
    }

    /// Arithmetic right shift; the amount is taken modulo 128.
    pub const fn wrapping_shr(self, n: u32) -> Self {
        let n = n & 127;
        let logical = self.bits.wrapping_shr(n);
        if self.is_negative() && n != 0 {
            let fill = U128::MAX.wrapping_shl(128 - n);
            let [lo, hi] = logical.words();
            let [fill_lo, fill_hi] = fill.words();
            Self::from_words(lo | fill_lo, hi | fill_hi)
        } else {
            Self::from_bits(logical)
        }
    }

    // ------------------------------------------------------------------------
    // Arbitrary precision interop
    // ------------------------------------------------------------------------

    /// Negate if the sign bit is set, convert the magnitude, re-apply the sign.
    pub fn to_integer(self) -> Integer {
        let magnitude = Integer::from(self.unsigned_abs().to_natural());
        if self.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }
}

fn overflow(op: &'static str) -> Error {
    Error::Overflow { op, target: NAME }
}

// ============================================================================
// ORDERING / FORMATTING
// ============================================================================

impl Ord for I128 {
    /// Signed high word decides across the sign boundary; the low word is a
    /// plain unsigned tiebreak.
    fn cmp(&self, other: &Self) -> Ordering {
        let [a_lo, a_hi] = self.words();
        let [b_lo, b_hi] = other.words();
        (a_hi as i64).cmp(&(b_hi as i64)).then(a_lo.cmp(&b_lo))
    }
}

impl PartialOrd for I128 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for I128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&i128::from(*self), f)
    }
}

impl fmt::Debug for I128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I128({})", self)
    }
}

impl FromStr for I128 {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (negative, magnitude) = parse_decimal(s, NAME)?;
        let limit = if negative {
            Self::MIN.unsigned_abs()
        } else {
            Self::MAX.to_bits()
        };
        if magnitude > limit {
            return Err(Error::out_of_range(NAME, s));
        }
        let value = Self::from_bits(magnitude);
        Ok(if negative { value.wrapping_neg() } else { value })
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

macro_rules! from_native {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for I128 {
                fn from(value: $ty) -> Self {
                    Self::from(i128::from(value))
                }
            }
        )*
    };
}

from_native!(i8, i16, i32, i64, u8, u16, u32, u64);

impl From<i128> for I128 {
    fn from(value: i128) -> Self {
        Self::from_bits(U128::from(value as u128))
    }
}

impl From<I128> for i128 {
    fn from(value: I128) -> Self {
        u128::from(value.bits) as i128
    }
}

impl TryFrom<U128> for I128 {
    type Error = Error;

    fn try_from(value: U128) -> Result<Self> {
        if value > Self::MAX.to_bits() {
            Err(Error::out_of_range(NAME, value))
        } else {
            Ok(Self::from_bits(value))
        }
    }
}

impl TryFrom<I128> for U128 {
    type Error = Error;

    fn try_from(value: I128) -> Result<Self> {
        if value.is_negative() {
            Err(Error::out_of_range("U128", value))
        } else {
            Ok(value.bits)
        }
    }
}

impl TryFrom<&Integer> for I128 {
    type Error = Error;

    fn try_from(value: &Integer) -> Result<Self> {
        i128::try_from(value)
            .map(Self::from)
            .map_err(|_| Error::out_of_range(NAME, value))
    }
}

impl TryFrom<&Natural> for I128 {
    type Error = Error;

    fn try_from(value: &Natural) -> Result<Self> {
        U128::try_from(value)
            .and_then(Self::try_from)
            .map_err(|_| Error::out_of_range(NAME, value))
    }
}

impl From<I128> for Integer {
    fn from(value: I128) -> Self {
        value.to_integer()
    }
}

// ============================================================================
// OPERATORS (wrapping)
// ============================================================================

impl Add for I128 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }
}

impl Sub for I128 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self.wrapping_sub(rhs)
    }
}

impl Mul for I128 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }
}

impl Div for I128 {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero, like primitive integer division.
    fn div(self, rhs: Self) -> Self {
        self.wrapping_div(rhs)
    }
}

impl Rem for I128 {
    type Output = Self;

    /// # Panics
    ///
    /// Panics if `rhs` is zero, like primitive integer remainder.
    fn rem(self, rhs: Self) -> Self {
        match self.checked_rem(rhs) {
            Ok(r) => r,
            Err(e) => panic!("I128 remainder failed: {e}"),
        }
    }
}

impl Neg for I128 {
    type Output = Self;

    fn neg(self) -> Self {
        self.wrapping_neg()
    }
}

impl Not for I128 {
    type Output = Self;

    fn not(self) -> Self {
        Self::from_bits(!self.bits)
    }
}

impl BitAnd for I128 {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        Self::from_bits(self.bits & rhs.bits)
    }
}

impl BitOr for I128 {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_bits(self.bits | rhs.bits)
    }
}

impl BitXor for I128 {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        Self::from_bits(self.bits ^ rhs.bits)
    }
}

impl Shl<u32> for I128 {
    type Output = Self;

    fn shl(self, n: u32) -> Self {
        self.wrapping_shl(n)
    }
}

impl Shr<u32> for I128 {
    type Output = Self;

    fn shr(self, n: u32) -> Self {
        self.wrapping_shr(n)
    }
}

// ============================================================================
// WIRE
// ============================================================================

impl Encode for I128 {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        self.bits.encode_to(dest);
    }

    fn encoded_size(&self) -> usize {
        16
    }
}

impl Decode for I128 {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        U128::decode(input).map(Self::from_bits)
    }
}
