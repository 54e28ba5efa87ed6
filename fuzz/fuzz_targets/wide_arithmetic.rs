// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for two-word arithmetic and decimal parsing.
//!
//! Native u128/i128 is the oracle. Carry and sign bugs in the word-level code
//! show up as a mismatch here long before anything reaches the wire.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use scalewire::{I128, U128};

#[derive(Debug, Arbitrary)]
struct Input {
    a: u128,
    b: u128,
    shift: u32,
    text: String,
}

fuzz_target!(|input: Input| {
    let (a, b) = (input.a, input.b);
    let (x, y) = (U128::from(a), U128::from(b));
    assert_eq!(u128::from(x.wrapping_add(y)), a.wrapping_add(b));
    assert_eq!(u128::from(x.wrapping_sub(y)), a.wrapping_sub(b));
    assert_eq!(u128::from(x.wrapping_mul(y)), a.wrapping_mul(b));
    assert_eq!(x.checked_div(y).ok().map(u128::from), a.checked_div(b));
    assert_eq!(u128::from(x.wrapping_shl(input.shift)), a.wrapping_shl(input.shift));

    let (sa, sb) = (a as i128, b as i128);
    let (p, q) = (I128::from(sa), I128::from(sb));
    assert_eq!(i128::from(p.wrapping_mul(q)), sa.wrapping_mul(sb));
    assert_eq!(p.checked_mul(q).ok().map(i128::from), sa.checked_mul(sb));
    assert_eq!(p.checked_div(q).ok().map(i128::from), sa.checked_div(sb));
    assert_eq!(i128::from(p.saturating_sub(q)), sa.saturating_sub(sb));
    assert_eq!(i128::from(p.wrapping_shr(input.shift)), sa.wrapping_shr(input.shift));
    assert_eq!(p.cmp(&q), sa.cmp(&sb));

    // Parsing never panics and agrees with std on what it accepts
    assert_eq!(
        input.text.parse::<U128>().ok().map(u128::from),
        input.text.parse::<u128>().ok()
    );
    assert_eq!(
        input.text.parse::<I128>().ok().map(i128::from),
        input.text.parse::<i128>().ok()
    );
});
