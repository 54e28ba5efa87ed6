//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fmt::Debug;

use scalewire::{decode, encode, Decode, Encode};

/// Parse a hex fixture, ignoring spaces.
pub fn hex(text: &str) -> Vec<u8> {
    let digits: String = text.chars().filter(|c| !c.is_whitespace()).collect();
    ::hex::decode(digits).expect("test fixture is valid hex")
}

/// Encode, check the bytes and the size hint, then decode back.
pub fn assert_wire<T>(value: &T, expected: &[u8])
where
    T: Encode + Decode + PartialEq + Debug,
{
    let bytes = encode(value);
    assert_eq!(bytes, expected, "encoding of {value:?}");
    assert_eq!(value.encoded_size(), expected.len(), "size of {value:?}");
    let back: T = decode(&bytes).unwrap_or_else(|e| panic!("decoding {value:?}: {e}"));
    assert_eq!(&back, value);
}

/// Round trip with no fixed expectation.
pub fn assert_roundtrip<T>(value: &T)
where
    T: Encode + Decode + PartialEq + Debug,
{
    let bytes = encode(value);
    assert_eq!(value.encoded_size(), bytes.len(), "size of {value:?}");
    let back: T = decode(&bytes).unwrap_or_else(|e| panic!("decoding {value:?}: {e}"));
    assert_eq!(&back, value);
}

/// Compact mode boundaries: (value, encoding).
pub const COMPACT_BOUNDARIES: &[(u64, &str)] = &[
    (0, "00"),
    (1, "04"),
    (63, "fc"),
    (64, "0101"),
    (16_383, "fdff"),
    (16_384, "02000100"),
    (1_073_741_823, "feffffff"),
    (1_073_741_824, "0300000040"),
    (u32::MAX as u64, "03ffffffff"),
    (1 << 32, "070000000001"),
    (u64::MAX, "13ffffffffffffffff"),
];
