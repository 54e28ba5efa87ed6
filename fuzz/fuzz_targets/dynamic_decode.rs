// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for kind-directed decoding.
//!
//! The first byte picks a descriptor, the rest is input. Decoding must never
//! panic or allocate wildly on hostile length prefixes, and whatever decodes
//! must re-encode to bytes that decode to the same value.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scalewire::{decode_kind, DecodeOptions, Encode, Kind};

const DESCRIPTORS: &[&str] = &[
    "Vec<Str>",
    "Map<Compact, Option<bool>>",
    "(u8, Result<Bytes, i128>, [u16; 3])",
    "{id: Compact, owner: Option<Str>, balance: u128}",
    "Enum{0: (), 1: Compact, 7: Vec<Option<u8>>}",
    "Vec<Vec<Vec<Vec<u8>>>>",
];

fuzz_target!(|data: &[u8]| {
    let Some((&selector, bytes)) = data.split_first() else {
        return;
    };
    let descriptor = DESCRIPTORS[usize::from(selector) % DESCRIPTORS.len()];
    let kind: Kind = descriptor.parse().expect("fixed descriptors parse");
    let options = if selector & 0x80 == 0 {
        DecodeOptions::default()
    } else {
        DecodeOptions::strict().with_max_depth(3)
    };

    let Ok(value) = decode_kind(&kind, bytes, &options) else {
        return;
    };

    // The re-encoding is canonical, so the strict policy takes it too
    let reencoded = value.encode();
    assert_eq!(reencoded.len(), value.encoded_size());
    let again = decode_kind(&kind, &reencoded, &DecodeOptions::strict())
        .expect("re-encoding of a decoded value decodes");
    assert_eq!(again, value);
});
