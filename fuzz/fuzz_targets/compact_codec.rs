// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for compact integer decoding.
//!
//! Every length prefix in the format is a compact. The decoder must return
//! Err on garbage, never panic, and anything it accepts must re-encode to a
//! form the canonical policy also accepts.

#![no_main]

use libfuzzer_sys::fuzz_target;
use scalewire::{decode_prefix, decode_with, encode, CompactBig, DecodeOptions};

fuzz_target!(|data: &[u8]| {
    // Property 1: lenient decode never panics
    let Ok((value, consumed)) = decode_prefix::<CompactBig>(data) else {
        return;
    };
    assert!(consumed > 0 && consumed <= data.len());

    // Property 2: the re-encoding is minimal, so the canonical policy takes it
    // and it is never longer than what we read
    let reencoded = encode(&value);
    assert!(reencoded.len() <= consumed);
    let strict: CompactBig = decode_with(&reencoded, &DecodeOptions::strict())
        .expect("re-encoding of a decoded compact is canonical");
    assert_eq!(strict, value);

    // Property 3: canonical decode of the original bytes succeeds exactly when
    // they were already minimal
    let original = &data[..consumed];
    let canonical = decode_with::<CompactBig>(original, &DecodeOptions::strict());
    assert_eq!(canonical.is_ok(), reencoded == original);
});
