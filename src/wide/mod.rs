// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! 128-bit integers built from two 64-bit words.
//!
//! Both types store `[low, high]` with word 0 the least significant, and both
//! go on the wire as 16 little-endian bytes, low word first. Addition and
//! subtraction propagate a single carry/borrow bit from low to high. Signed
//! multiplication works on magnitudes and restores the sign at the end.
//! Division and remainder go through malachite's arbitrary-precision integers.
//!
//! The base operators wrap, like `Wrapping<T>` does. `saturating_*` clamp to
//! the type's bounds, `checked_*` return [`Error::Overflow`](crate::Error).
//!
//! # References
//!
//! - **Multi-word arithmetic**: Knuth, TAOCP Vol. 2 §4.3.1 "The Classical
//!   Algorithms" (carries, borrows, schoolbook multiply).
//! - **Two's complement**: negation is `!x + 1`; the top bit of the high word is
//!   the sign.

mod signed;
mod unsigned;

pub use signed::I128;
pub use unsigned::U128;

use crate::error::{Error, Result};

/// Add with carry-in, returning the word and carry-out.
#[inline]
pub(crate) const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, c1) = a.overflowing_add(b);
    let (sum, c2) = sum.overflowing_add(carry as u64);
    (sum, c1 | c2)
}

/// Subtract with borrow-in, returning the word and borrow-out.
#[inline]
pub(crate) const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, b1) = a.overflowing_sub(b);
    let (diff, b2) = diff.overflowing_sub(borrow as u64);
    (diff, b1 | b2)
}

/// 64x64 -> 128 multiply, returning `(low, high)` words.
#[inline]
pub(crate) const fn widening_mul(a: u64, b: u64) -> (u64, u64) {
    let product = (a as u128) * (b as u128);
    (product as u64, (product >> 64) as u64)
}

/// Parse an optionally signed decimal string into a sign and a magnitude.
///
/// Accepts an optional leading `+` or `-` followed by one or more ASCII
/// digits. Anything else (whitespace, underscores, hex prefixes) is rejected.
pub(crate) fn parse_decimal(input: &str, target: &'static str) -> Result<(bool, U128)> {
    let parse_error = |reason| Error::Parse {
        input: input.to_string(),
        target,
        reason,
    };

    let (negative, digits) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };
    if digits.is_empty() {
        return Err(parse_error("no digits"));
    }

    let ten = U128::from(10u8);
    let mut magnitude = U128::ZERO;
    for byte in digits.bytes() {
        if !byte.is_ascii_digit() {
            return Err(parse_error("invalid digit"));
        }
        magnitude = magnitude
            .checked_mul(ten)
            .and_then(|m| m.checked_add(U128::from(byte - b'0')))
            .map_err(|_| Error::out_of_range(target, input))?;
    }
    Ok((negative, magnitude))
}
