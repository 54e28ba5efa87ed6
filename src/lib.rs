// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! SCALE-style binary codec: compact integers, 128-bit arithmetic, and
//! type-directed decoding of containers.
//!
//! Identical logical values always encode to identical bytes. Maps are written
//! in key order, varying data in tag order, and compact integers in their
//! shortest mode. Decoding is total over a closed set of shapes and every
//! data failure comes back as an [`Error`].
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  io / fixed  │────▶│   compact    │────▶│  containers  │
//! │ (Reader, LE  │     │ (4 modes,    │     │ (Vec, Map,   │
//! │  primitives) │     │  Compact<T>) │     │  Option, ..) │
//! └──────────────┘     └──────────────┘     └──────────────┘
//!        │                    ▲                    │
//!        ▼                    │                    ▼
//! ┌──────────────┐            │             ┌──────────────┐
//! │     wide     │────────────┘             │   dispatch   │
//! │ (U128, I128) │─────────────────────────▶│ (Kind, Value)│
//! └──────────────┘                          └──────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use std::collections::HashMap;
//! use scalewire::{decode, encode, Compact};
//!
//! let bytes = encode(&Compact(16384u32));
//! assert_eq!(bytes, [0x02, 0x00, 0x01, 0x00]);
//! assert_eq!(decode::<Compact<u32>>(&bytes).unwrap(), Compact(16384));
//!
//! // Maps encode in ascending key order, whatever the insertion order.
//! let flags: HashMap<String, bool> =
//!     [("ccc".into(), true), ("aaa".into(), true)].into_iter().collect();
//! assert_eq!(&encode(&flags)[..5], &[0x08, 0x0c, b'a', b'a', b'a']);
//! ```
//!
//! When the shape is only known at run time, parse a [`Kind`] and decode to a
//! [`Value`]:
//!
//! ```
//! use scalewire::{decode_kind, DecodeOptions, Encode, Kind, Value};
//!
//! let kind: Kind = "Option<Str>".parse().unwrap();
//! let value = decode_kind(&kind, &[0x01, 0x04, b'x'], &DecodeOptions::default()).unwrap();
//! assert_eq!(value, Value::some(Value::str("x")));
//! assert_eq!(value.encode(), [0x01, 0x04, b'x']);
//! ```

extern crate self as scalewire;

pub mod codec;
pub mod compact;
pub mod containers;
pub mod dispatch;
pub mod error;
pub mod fixed;
pub mod io;
pub mod options;
pub mod wide;

pub use codec::{decode, decode_prefix, decode_with, encode, encode_into_slice, Decode, Encode};
pub use compact::{Compact, CompactBig, CompactInt, CompactMode};
pub use containers::{Bytes, FixedSequence, VaryingData};
pub use dispatch::{decode_kind, decode_value, Described, Field, Kind, Value};
pub use error::{Error, KindError, Result};
pub use io::{Output, Reader, SizeCounter};
pub use options::{BoolPolicy, CompactPolicy, DecodeOptions};
pub use wide::{I128, U128};

#[cfg(feature = "derive")]
pub use scalewire_derive::{Decode, Encode};
