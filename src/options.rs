// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Decode policy.
//!
//! The decoder accepts two things the encoder never writes: compact integers
//! in a longer mode than necessary, and flag bytes other than 0x00/0x01. Each
//! is a switch here. The default accepts both.
//!
//! `max_depth`, `max_zero_width` and `max_compact_bytes` are resource limits.
//! The default compact ceiling is the format's own (6-bit length + 4 = 67
//! bytes); lower it if you only ever expect 128-bit quantities.
//!
//! `max_zero_width` bounds how many container elements may decode from zero
//! bytes over one whole decode. Every other element consumes input, so with it
//! a length prefix can never make the decoder loop or allocate past what the
//! input backs.

use serde::{Deserialize, Serialize};

/// Largest byte count a mode-3 compact header can express (`63 + 4`).
pub const COMPACT_MAX_BYTES: usize = 67;

/// Default nesting limit for dynamic and recursive decodes.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default budget of zero-byte elements (`()`, empty tuples, ...) per decode.
pub const DEFAULT_MAX_ZERO_WIDTH: usize = 1 << 16;

/// How strictly compact integers (and varying-data tag order) are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompactPolicy {
    /// Accept any of the four modes for any magnitude that fits.
    #[default]
    Lenient,
    /// Reject encodings that a smaller mode (or fewer mode-3 bytes) could carry.
    Canonical,
}

/// How boolean and presence-flag bytes are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BoolPolicy {
    /// Any nonzero byte is `true`.
    #[default]
    Lenient,
    /// Only 0x00 and 0x01 are valid.
    Strict,
}

/// Options in force for one decode call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    pub compact: CompactPolicy,
    pub booleans: BoolPolicy,
    pub max_depth: usize,
    pub max_zero_width: usize,
    pub max_compact_bytes: usize,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::lenient()
    }
}

impl DecodeOptions {
    /// Accept every well-formed encoding.
    pub const fn lenient() -> Self {
        Self {
            compact: CompactPolicy::Lenient,
            booleans: BoolPolicy::Lenient,
            max_depth: DEFAULT_MAX_DEPTH,
            max_zero_width: DEFAULT_MAX_ZERO_WIDTH,
            max_compact_bytes: COMPACT_MAX_BYTES,
        }
    }

    /// Only the canonical byte form of each value is accepted.
    pub const fn strict() -> Self {
        Self {
            compact: CompactPolicy::Canonical,
            booleans: BoolPolicy::Strict,
            max_depth: DEFAULT_MAX_DEPTH,
            max_zero_width: DEFAULT_MAX_ZERO_WIDTH,
            max_compact_bytes: COMPACT_MAX_BYTES,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_zero_width(mut self, max_zero_width: usize) -> Self {
        self.max_zero_width = max_zero_width;
        self
    }

    pub fn with_max_compact_bytes(mut self, max: usize) -> Self {
        self.max_compact_bytes = max.min(COMPACT_MAX_BYTES);
        self
    }

    pub fn is_canonical(&self) -> bool {
        self.compact == CompactPolicy::Canonical
    }
}
