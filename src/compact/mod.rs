// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Compact integers: the variable-length encoding every length prefix uses.
//!
//! The low two bits of the first byte pick the mode. The first three modes
//! keep the value shifted left by two in a 1, 2 or 4 byte little-endian word.
//! The fourth stores the byte count (minus four) in the upper six bits of the
//! first byte, then the magnitude itself, little-endian.
//!
//! ```text
//! mode  tag   range                     layout
//! 0     0b00  0 ..= 63                  [v << 2]
//! 1     0b01  64 ..= 16_383             u16 LE (v << 2) | 1
//! 2     0b10  16_384 ..= 1_073_741_823  u32 LE (v << 2) | 2
//! 3     0b11  2^30 ..= 2^536 - 1        [(n - 4) << 2 | 3] ++ n bytes LE
//! ```
//!
//! The encoder always picks the smallest mode, and in mode 3 the fewest bytes
//! (but never fewer than four). The decoder accepts every mode for every
//! magnitude unless the reader's [`CompactPolicy`] is `Canonical`.
//!
//! The generic magnitude here is [`U128`]. [`CompactBig`] goes through a
//! malachite `Natural` for the full mode-3 range.

mod typed;

pub use typed::{Compact, CompactBig, CompactInt};

use malachite::Natural;
use tracing::debug;

use crate::error::{Error, Result};
use crate::io::{Output, Reader};
use crate::options::CompactPolicy;
use crate::wide::U128;

// ============================================================================
// MODES
// ============================================================================

/// Largest value carried by mode 0.
pub const MAX_SINGLE_BYTE: u64 = 0x3f;
/// Largest value carried by mode 1.
pub const MAX_TWO_BYTE: u64 = 0x3fff;
/// Largest value carried by mode 2.
pub const MAX_FOUR_BYTE: u64 = 0x3fff_ffff;
/// Mode-3 payloads are at least this long.
pub const MIN_BIG_BYTES: usize = 4;

/// The four compact size modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CompactMode {
    SingleByte = 0,
    TwoByte = 1,
    FourByte = 2,
    BigInteger = 3,
}

impl CompactMode {
    /// Smallest mode able to carry `value`.
    pub fn for_magnitude(value: U128) -> Self {
        if value > U128::from(MAX_FOUR_BYTE) {
            CompactMode::BigInteger
        } else if value > U128::from(MAX_TWO_BYTE) {
            CompactMode::FourByte
        } else if value > U128::from(MAX_SINGLE_BYTE) {
            CompactMode::TwoByte
        } else {
            CompactMode::SingleByte
        }
    }

    /// Mode encoded in the low two bits of a header byte.
    pub fn from_header(byte: u8) -> Self {
        match byte & 0b11 {
            0 => CompactMode::SingleByte,
            1 => CompactMode::TwoByte,
            2 => CompactMode::FourByte,
            _ => CompactMode::BigInteger,
        }
    }

    pub fn tag(self) -> u8 {
        self as u8
    }
}

/// Payload byte count mode 3 uses for `value`.
fn big_payload_len(value: U128) -> usize {
    value.byte_len().max(MIN_BIG_BYTES)
}

// ============================================================================
// ENCODING
// ============================================================================

/// Encoded length of `value` in bytes.
pub fn compact_len(value: U128) -> usize {
    match CompactMode::for_magnitude(value) {
        CompactMode::SingleByte => 1,
        CompactMode::TwoByte => 2,
        CompactMode::FourByte => 4,
        CompactMode::BigInteger => 1 + big_payload_len(value),
    }
}

/// Write `value` in its minimal compact form.
pub fn encode_compact<O: Output + ?Sized>(value: U128, dest: &mut O) {
    let mode = CompactMode::for_magnitude(value);
    let small = value.low();
    match mode {
        CompactMode::SingleByte => dest.push_byte((small as u8) << 2),
        CompactMode::TwoByte => dest.write(&(((small as u16) << 2) | 0b01).to_le_bytes()),
        CompactMode::FourByte => dest.write(&(((small as u32) << 2) | 0b10).to_le_bytes()),
        CompactMode::BigInteger => {
            let len = big_payload_len(value);
            dest.push_byte((((len - MIN_BIG_BYTES) as u8) << 2) | 0b11);
            dest.write(&value.to_le_bytes()[..len]);
        }
    }
}

/// Compact-prefixed length, the framing used by every sequence.
pub fn encode_len<O: Output + ?Sized>(len: usize, dest: &mut O) {
    encode_compact(U128::from(len), dest);
}

pub fn len_prefix_size(len: usize) -> usize {
    compact_len(U128::from(len))
}

/// Minimal little-endian bytes of a natural (empty for zero).
fn natural_le_bytes(value: &Natural) -> Vec<u8> {
    let base = Natural::from(256u32);
    let mut bytes = Vec::new();
    let mut rest = value.clone();
    while rest != 0u32 {
        let digit = &rest % &base;
        // digit < 256
        bytes.push(u64::try_from(&digit).unwrap_or_default() as u8);
        rest /= &base;
    }
    bytes
}

pub(crate) fn compact_len_natural(value: &Natural) -> usize {
    match U128::try_from(value) {
        Ok(small) => compact_len(small),
        Err(_) => 1 + natural_le_bytes(value).len(),
    }
}

/// Write an arbitrary-precision magnitude. The caller guarantees it fits in
/// 67 bytes, which [`CompactBig::new`] checks.
pub(crate) fn encode_compact_natural<O: Output + ?Sized>(value: &Natural, dest: &mut O) {
    match U128::try_from(value) {
        Ok(small) => encode_compact(small, dest),
        Err(_) => {
            let bytes = natural_le_bytes(value);
            dest.push_byte((((bytes.len() - MIN_BIG_BYTES) as u8) << 2) | 0b11);
            dest.write(&bytes);
        }
    }
}

// ============================================================================
// DECODING
// ============================================================================

/// What the header says about the bytes that follow.
enum Header {
    /// Modes 0-2: value fully decoded.
    Small { value: u64, mode: CompactMode },
    /// Mode 3: payload bytes, little-endian.
    Big { payload: Vec<u8> },
}

fn read_header(input: &mut Reader<'_>) -> Result<(usize, Header)> {
    let offset = input.position();
    let first = input.read_byte()?;
    let mode = CompactMode::from_header(first);
    let header = match mode {
        CompactMode::SingleByte => Header::Small {
            value: u64::from(first >> 2),
            mode,
        },
        CompactMode::TwoByte => {
            let second = input.read_byte()?;
            Header::Small {
                value: (u64::from(second) << 6) | u64::from(first >> 2),
                mode,
            }
        }
        CompactMode::FourByte => {
            let rest: [u8; 3] = input.read_array()?;
            let word = u32::from_le_bytes([first, rest[0], rest[1], rest[2]]);
            Header::Small {
                value: u64::from(word >> 2),
                mode,
            }
        }
        CompactMode::BigInteger => {
            let byte_count = usize::from(first >> 2) + MIN_BIG_BYTES;
            let max = input.options().max_compact_bytes;
            if byte_count > max {
                return Err(Error::UnsupportedMagnitude { byte_count, max });
            }
            Header::Big {
                payload: input.read_slice(byte_count)?.to_vec(),
            }
        }
    };
    Ok((offset, header))
}

/// Flag (or, under the canonical policy, reject) a non-minimal encoding.
fn check_minimal(input: &Reader<'_>, offset: usize, minimal: bool, detail: String) -> Result<()> {
    if minimal {
        return Ok(());
    }
    match input.options().compact {
        CompactPolicy::Lenient => {
            debug!(offset, %detail, "accepted non-minimal compact encoding");
            Ok(())
        }
        CompactPolicy::Canonical => Err(Error::NonCanonical { offset, detail }),
    }
}

fn small_is_minimal(value: u64, mode: CompactMode) -> bool {
    CompactMode::for_magnitude(U128::from(value)) == mode
}

/// Payload length with high zero bytes trimmed.
fn significant_len(payload: &[u8]) -> usize {
    payload.iter().rposition(|&b| b != 0).map_or(0, |i| i + 1)
}

fn big_is_minimal(payload: &[u8]) -> bool {
    let significant = significant_len(payload);
    // Must need mode 3 at all (> 2^30 - 1) and use no padding bytes.
    let needs_big = significant > 4 || (significant == 4 && payload[3] >= 0x40);
    needs_big && payload.len() == significant.max(MIN_BIG_BYTES)
}

/// Decode a compact magnitude that must fit in 128 bits.
pub fn decode_compact(input: &mut Reader<'_>) -> Result<U128> {
    let (offset, header) = read_header(input)?;
    match header {
        Header::Small { value, mode } => {
            check_minimal(
                input,
                offset,
                small_is_minimal(value, mode),
                format!("{value} encoded in mode {}", mode.tag()),
            )?;
            Ok(U128::from(value))
        }
        Header::Big { payload } => {
            check_minimal(
                input,
                offset,
                big_is_minimal(&payload),
                format!("{}-byte big-integer payload", payload.len()),
            )?;
            let significant = significant_len(&payload);
            if significant > 16 {
                return Err(Error::out_of_range(
                    "U128",
                    format!("{significant}-byte compact magnitude"),
                ));
            }
            let mut bytes = [0u8; 16];
            bytes[..significant].copy_from_slice(&payload[..significant]);
            Ok(U128::from_le_bytes(bytes))
        }
    }
}

/// Decode a compact magnitude over the full mode-3 range.
pub fn decode_compact_natural(input: &mut Reader<'_>) -> Result<Natural> {
    let (offset, header) = read_header(input)?;
    match header {
        Header::Small { value, mode } => {
            check_minimal(
                input,
                offset,
                small_is_minimal(value, mode),
                format!("{value} encoded in mode {}", mode.tag()),
            )?;
            Ok(Natural::from(value))
        }
        Header::Big { payload } => {
            check_minimal(
                input,
                offset,
                big_is_minimal(&payload),
                format!("{}-byte big-integer payload", payload.len()),
            )?;
            let base = Natural::from(256u32);
            let mut value = Natural::from(0u32);
            for &byte in payload.iter().rev() {
                value = value * &base + Natural::from(byte);
            }
            Ok(value)
        }
    }
}

/// Decode a compact length prefix.
pub fn decode_len(input: &mut Reader<'_>) -> Result<usize> {
    let len = decode_compact(input)?;
    u64::try_from(u128::from(len))
        .ok()
        .and_then(|l| usize::try_from(l).ok())
        .ok_or_else(|| Error::out_of_range("usize", len))
}
