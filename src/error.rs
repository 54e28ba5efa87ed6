// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types, split into two channels that never mix.
//!
//! [`Error`] is everything the bytes (or the numbers) can do wrong: truncation,
//! magnitudes that don't fit, malformed decimal strings, non-canonical forms in
//! strict mode. Every one of these is returned to the caller. Nothing is
//! swallowed, nothing is replaced by a default.
//!
//! [`KindError`] is a wiring bug: someone asked for a shape that the closed kind
//! set doesn't contain, or built a schema that can't be decoded. It surfaces when
//! a [`Kind`](crate::Kind) is parsed or derived from a witness, before any byte
//! is read. Once you hold a valid `Kind`, decoding can only fail with [`Error`].

use thiserror::Error;

/// Data errors: malformed input or out-of-range arithmetic.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The cursor ran out of bytes.
    #[error("truncated input at offset {offset}: needed {needed} bytes, {remaining} remaining")]
    Truncated {
        offset: usize,
        needed: usize,
        remaining: usize,
    },

    /// The destination slice can't hold the encoding.
    #[error("output buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },

    /// A value doesn't fit the target type.
    #[error("{value} is out of range for {target}")]
    OutOfRange { target: &'static str, value: String },

    /// Checked arithmetic overflowed.
    #[error("{op} overflowed {target}")]
    Overflow {
        op: &'static str,
        target: &'static str,
    },

    /// Division or remainder by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// A big-integer compact header declares more bytes than allowed.
    #[error("compact big-integer mode declares {byte_count} bytes, at most {max} supported")]
    UnsupportedMagnitude { byte_count: usize, max: usize },

    /// Malformed decimal string.
    #[error("cannot parse {input:?} as {target}: {reason}")]
    Parse {
        input: String,
        target: &'static str,
        reason: &'static str,
    },

    /// A shorter (or ordered) encoding exists and the canonical policy is on.
    #[error("non-canonical encoding at offset {offset}: {detail}")]
    NonCanonical { offset: usize, detail: String },

    /// Boolean byte other than 0x00/0x01 under the strict policy.
    #[error("invalid boolean byte 0x{byte:02x} at offset {offset}")]
    InvalidBool { offset: usize, byte: u8 },

    /// String payload isn't UTF-8.
    #[error("invalid UTF-8 at offset {offset}: {detail}")]
    InvalidUtf8 { offset: usize, detail: String },

    /// Discriminant byte with no matching variant.
    #[error("unknown variant {tag} for {target}")]
    UnknownVariant { tag: u8, target: &'static str },

    /// The same discriminant appeared twice in one varying-data stream.
    #[error("duplicate variant {tag} in varying data")]
    DuplicateVariant { tag: u8 },

    /// Whole-input decode left bytes behind.
    #[error("{remaining} trailing bytes after value at offset {offset}")]
    TrailingBytes { offset: usize, remaining: usize },

    /// Nesting exceeded the configured depth.
    #[error("nesting deeper than {max} levels")]
    DepthLimit { max: usize },

    /// More container elements decoded from zero bytes than the budget allows.
    #[error("more than {max} zero-width elements at offset {offset}")]
    ZeroWidthLimit { offset: usize, max: usize },
}

impl Error {
    /// Shorthand for range failures.
    pub(crate) fn out_of_range(target: &'static str, value: impl ToString) -> Self {
        Error::OutOfRange {
            target,
            value: value.to_string(),
        }
    }

    /// True for the short-read case, which streaming callers may want to retry
    /// after buffering more input.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Error::Truncated { .. })
    }
}

/// Configuration errors: unsupported or ill-formed kind witnesses.
///
/// These mean the calling code is wrong, not the data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KindError {
    /// Name outside the closed kind set.
    #[error("unsupported kind {0:?}")]
    UnknownKind(String),

    /// Descriptor text doesn't parse.
    #[error("kind descriptor syntax error at column {column}: {detail}")]
    Syntax { column: usize, detail: String },

    /// A witness value doesn't reveal its full shape (an empty sequence, an
    /// absent option, ...).
    #[error("witness is ambiguous: {0}")]
    AmbiguousWitness(&'static str),

    /// A varying-data schema lists the same tag twice.
    #[error("varying-data schema lists tag {0} twice")]
    DuplicateVariant(u8),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
