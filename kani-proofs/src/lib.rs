// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Kani model checking proofs for scalewire's compact and two-word primitives.
//!
//! This standalone crate carries copies of the compact encoder/decoder (for
//! `u64` magnitudes) and the carry/borrow helpers, and proves them with Kani
//! without pulling in malachite or the rest of the main crate.
//!
//! Run with: `cargo kani`
//!
//! ## Verified Properties
//!
//! 1. **No panics**: encode_compact and decode_compact never panic
//! 2. **Roundtrip**: decode(encode(x)) == x for all x
//! 3. **Minimality**: the encoder's mode is the smallest one that fits
//! 4. **Carries**: two-word add/sub agree with native `u128`

/// A `u64` needs at most a header plus eight payload bytes.
pub const MAX_COMPACT_U64_BYTES: usize = 9;

// ============================================================================
// COMPACT ENCODING (copied from src/compact/mod.rs, u64 only)
// ============================================================================

pub fn encode_compact(value: u64, buf: &mut Vec<u8>) {
    if value <= 0x3f {
        buf.push((value as u8) << 2);
    } else if value <= 0x3fff {
        buf.extend_from_slice(&(((value as u16) << 2) | 0b01).to_le_bytes());
    } else if value <= 0x3fff_ffff {
        buf.extend_from_slice(&(((value as u32) << 2) | 0b10).to_le_bytes());
    } else {
        let bytes = value.to_le_bytes();
        let significant = (8 - value.leading_zeros() as usize / 8).max(4);
        buf.push((((significant - 4) as u8) << 2) | 0b11);
        buf.extend_from_slice(&bytes[..significant]);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    Truncated,
    /// Mode-3 payload with nonzero bytes past the eighth.
    TooLarge,
}

/// Decode a compact from the front of `bytes`, returning (value, consumed).
pub fn decode_compact(bytes: &[u8]) -> Result<(u64, usize), DecodeError> {
    let first = *bytes.first().ok_or(DecodeError::Truncated)?;
    match first & 0b11 {
        0b00 => Ok((u64::from(first >> 2), 1)),
        0b01 => {
            let second = *bytes.get(1).ok_or(DecodeError::Truncated)?;
            Ok(((u64::from(second) << 6) | u64::from(first >> 2), 2))
        }
        0b10 => {
            if bytes.len() < 4 {
                return Err(DecodeError::Truncated);
            }
            let word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            Ok((u64::from(word >> 2), 4))
        }
        _ => {
            let count = usize::from(first >> 2) + 4;
            let payload = bytes.get(1..1 + count).ok_or(DecodeError::Truncated)?;
            if payload.iter().skip(8).any(|&b| b != 0) {
                return Err(DecodeError::TooLarge);
            }
            let mut word = [0u8; 8];
            let kept = count.min(8);
            word[..kept].copy_from_slice(&payload[..kept]);
            Ok((u64::from_le_bytes(word), 1 + count))
        }
    }
}

/// Encoded length of the smallest mode for `value`.
pub fn minimal_len(value: u64) -> usize {
    match value {
        0..=0x3f => 1,
        0x40..=0x3fff => 2,
        0x4000..=0x3fff_ffff => 4,
        _ => 1 + (8 - value.leading_zeros() as usize / 8).max(4),
    }
}

// ============================================================================
// TWO-WORD CARRIES (copied from src/wide/mod.rs)
// ============================================================================

pub const fn carrying_add(a: u64, b: u64, carry: bool) -> (u64, bool) {
    let (sum, c1) = a.overflowing_add(b);
    let (sum, c2) = sum.overflowing_add(carry as u64);
    (sum, c1 | c2)
}

pub const fn borrowing_sub(a: u64, b: u64, borrow: bool) -> (u64, bool) {
    let (diff, b1) = a.overflowing_sub(b);
    let (diff, b2) = diff.overflowing_sub(borrow as u64);
    (diff, b1 | b2)
}

/// `[lo, hi]` addition with the carry propagated once.
pub fn add_words(a: [u64; 2], b: [u64; 2]) -> ([u64; 2], bool) {
    let (lo, carry) = carrying_add(a[0], b[0], false);
    let (hi, overflow) = carrying_add(a[1], b[1], carry);
    ([lo, hi], overflow)
}

pub fn sub_words(a: [u64; 2], b: [u64; 2]) -> ([u64; 2], bool) {
    let (lo, borrow) = borrowing_sub(a[0], b[0], false);
    let (hi, underflow) = borrowing_sub(a[1], b[1], borrow);
    ([lo, hi], underflow)
}

fn to_native(words: [u64; 2]) -> u128 {
    (u128::from(words[1]) << 64) | u128::from(words[0])
}

// ============================================================================
// KANI MODEL CHECKING PROOFS
// ============================================================================

#[cfg(kani)]
mod kani_proofs {
    use super::*;

    /// encode_compact never panics and always picks the smallest mode.
    #[kani::proof]
    #[kani::unwind(10)]
    fn verify_encode_compact_minimal() {
        let value: u64 = kani::any();
        let mut buf = Vec::new();
        encode_compact(value, &mut buf);

        kani::assert(!buf.is_empty(), "encode_compact must produce at least 1 byte");
        kani::assert(
            buf.len() <= MAX_COMPACT_U64_BYTES,
            "u64 compacts fit in MAX_COMPACT_U64_BYTES",
        );
        kani::assert(buf.len() == minimal_len(value), "encoder must use the smallest mode");
    }

    /// decode_compact never panics for any byte sequence.
    #[kani::proof]
    #[kani::unwind(12)]
    fn verify_decode_compact_no_panic() {
        let len: usize = kani::any_where(|&n| n <= 10);
        let mut bytes = [0u8; 10];
        for i in 0..len {
            bytes[i] = kani::any();
        }
        let slice = &bytes[..len];

        if let Ok((_, consumed)) = decode_compact(slice) {
            kani::assert(consumed > 0, "Must consume at least 1 byte on success");
            kani::assert(
                consumed <= slice.len(),
                "Cannot consume more bytes than available",
            );
        }
    }

    /// decode(encode(x)) == x for all x.
    #[kani::proof]
    #[kani::unwind(10)]
    fn verify_compact_roundtrip() {
        let original: u64 = kani::any();
        let mut buf = Vec::new();
        encode_compact(original, &mut buf);

        let result = decode_compact(&buf);
        kani::assert(result.is_ok(), "Decoding encoded value must succeed");
        if let Ok((decoded, consumed)) = result {
            kani::assert(decoded == original, "Roundtrip must preserve value");
            kani::assert(consumed == buf.len(), "Must consume exactly the encoded bytes");
        }
    }

    /// Two-word addition and subtraction agree with native u128, flags included.
    #[kani::proof]
    fn verify_word_carries() {
        let a: [u64; 2] = [kani::any(), kani::any()];
        let b: [u64; 2] = [kani::any(), kani::any()];
        let (x, y) = (to_native(a), to_native(b));

        let (sum, overflow) = add_words(a, b);
        let (native_sum, native_overflow) = x.overflowing_add(y);
        kani::assert(to_native(sum) == native_sum, "sum must match u128");
        kani::assert(overflow == native_overflow, "carry-out must match u128");

        let (diff, underflow) = sub_words(a, b);
        let (native_diff, native_underflow) = x.overflowing_sub(y);
        kani::assert(to_native(diff) == native_diff, "difference must match u128");
        kani::assert(underflow == native_underflow, "borrow-out must match u128");
    }
}
