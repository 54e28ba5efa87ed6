// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Compound codecs, built on the compact length prefix.
//!
//! ```text
//! Sequence<T>        Compact(len) ++ T*
//! Str / Bytes        Compact(len) ++ raw bytes
//! Dictionary<K, V>   Compact(len) ++ (K ++ V)*   keys ascending
//! Option<T>          0x00 | 0x01 ++ T
//! Result<T, E>       0x01 ++ T | 0x00 ++ E
//! VaryingData        (tag ++ payload)*           tags ascending, unframed
//! Tuple / [T; N]     field ++ field ++ ...       no framing
//! ```
//!
//! Encoders never depend on a container's iteration order where the format
//! fixes one: hash maps are sorted by key before writing, and varying data is
//! always stored in a `BTreeMap`. Decoders preallocate at most as many slots as
//! there are bytes left, so a bogus length prefix fails with `Truncated` rather
//! than an allocation the input can't back. Elements that decode from zero
//! bytes draw on the reader's `max_zero_width` budget and fail with
//! `ZeroWidthLimit` once it runs out.
//!
//! # References
//!
//! - **SCALE codec**: Parity Technologies, "SCALE Codec" (substrate docs),
//!   sections on vectors, options, results and enums.

mod map;
mod option;
mod sequence;
mod tuple;
mod varying;

pub use sequence::{Bytes, FixedSequence};
pub use varying::VaryingData;

pub(crate) use sequence::{decode_elements, encode_raw, raw_size, read_prefixed_bytes, read_string};
pub(crate) use varying::decode_entries;
