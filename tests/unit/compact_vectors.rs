//! Compact integer vectors across every mode and both policies.

use super::common::{assert_wire, hex, COMPACT_BOUNDARIES};
use scalewire::compact::{decode_compact, decode_len, encode_len, len_prefix_size};
use scalewire::{
    decode, decode_prefix, decode_with, encode, Compact, CompactBig, CompactMode, DecodeOptions,
    Error, Reader, I128, U128,
};

// ============================================================================
// MODE BOUNDARIES
// ============================================================================

#[test]
fn test_mode_boundaries_u64() {
    for &(value, bytes) in COMPACT_BOUNDARIES {
        assert_wire(&Compact(value), &hex(bytes));
    }
}

#[test]
fn test_mode_boundaries_u32_and_u128() {
    assert_wire(&Compact(63u32), &hex("fc"));
    assert_wire(&Compact(16_384u32), &hex("02000100"));
    assert_wire(&Compact(1_073_741_824u128), &hex("0300000040"));
    assert_wire(
        &Compact(u128::MAX),
        &hex("33 ffffffffffffffff ffffffffffffffff"),
    );
}

#[test]
fn test_mode_selection() {
    let cases = [
        (0u64, CompactMode::SingleByte),
        (63, CompactMode::SingleByte),
        (64, CompactMode::TwoByte),
        (16_383, CompactMode::TwoByte),
        (16_384, CompactMode::FourByte),
        (1_073_741_823, CompactMode::FourByte),
        (1_073_741_824, CompactMode::BigInteger),
    ];
    for (value, mode) in cases {
        assert_eq!(CompactMode::for_magnitude(U128::from(value)), mode, "{value}");
        let bytes = encode(&Compact(value));
        assert_eq!(CompactMode::from_header(bytes[0]), mode);
    }
}

#[test]
fn test_big_integer_byte_counts() {
    // 2^32 needs five payload bytes, 2^64 needs nine
    assert_eq!(encode(&Compact(1u64 << 32)), hex("07 0000000001"));
    let two_64 = U128::from_words(0, 1);
    assert_eq!(encode(&Compact(two_64)), hex("17 000000000000000001"));
}

// ============================================================================
// SIGNED AND WIDE SOURCES
// ============================================================================

#[test]
fn test_signed_values_encode_magnitude() {
    assert_eq!(encode(&Compact(-1i32)), encode(&Compact(1u32)));
    assert_eq!(encode(&Compact(i64::MIN)), encode(&Compact(1u64 << 63)));
    assert_eq!(encode(&Compact(I128::MIN)), encode(&Compact(1u128 << 127)));
}

#[test]
fn test_decode_into_narrow_type_checks_range() {
    let bytes = encode(&Compact(256u32));
    assert!(matches!(
        decode::<Compact<u8>>(&bytes),
        Err(Error::OutOfRange { target: "u8", .. })
    ));
    assert_eq!(decode::<Compact<u16>>(&bytes).unwrap(), Compact(256u16));
}

#[test]
fn test_magnitude_beyond_128_bits() {
    // 17 significant bytes: fine as a natural, out of range for U128
    let mut bytes = vec![(17 - 4) << 2 | 0b11];
    bytes.extend(std::iter::repeat(0xff).take(17));
    assert!(matches!(
        decode::<Compact<U128>>(&bytes),
        Err(Error::OutOfRange { target: "U128", .. })
    ));
    let big: CompactBig = decode(&bytes).unwrap();
    assert_eq!(big.value().to_string(), "87112285931760246646623899502532662132735");
}

// ============================================================================
// LENIENT VS CANONICAL
// ============================================================================

#[test]
fn test_non_minimal_forms() {
    // 1 in mode 1, 2 and 3 (with a padded four-byte payload)
    let forms = ["0500", "06000000", "03 01000000", "07 0100000000"];
    let strict = DecodeOptions::strict();
    for form in forms {
        let bytes = hex(form);
        assert_eq!(decode::<Compact<u32>>(&bytes).unwrap(), Compact(1), "{form}");
        assert!(
            matches!(
                decode_with::<Compact<u32>>(&bytes, &strict),
                Err(Error::NonCanonical { offset: 0, .. })
            ),
            "{form}"
        );
    }
}

#[test]
fn test_canonical_accepts_minimal_forms() {
    let strict = DecodeOptions::strict();
    for &(value, bytes) in COMPACT_BOUNDARIES {
        assert_eq!(
            decode_with::<Compact<u64>>(&hex(bytes), &strict).unwrap(),
            Compact(value)
        );
    }
}

#[test]
fn test_mode_three_with_padding_but_needed() {
    // 2^30 in five bytes instead of four: rejected only under the canonical policy
    let padded = hex("07 0000004000");
    assert_eq!(
        decode::<Compact<u64>>(&padded).unwrap(),
        Compact(1_073_741_824)
    );
    assert!(decode_with::<Compact<u64>>(&padded, &DecodeOptions::strict()).is_err());
}

// ============================================================================
// LIMITS AND TRUNCATION
// ============================================================================

#[test]
fn test_compact_ceiling() {
    let mut bytes = vec![(20 - 4) << 2 | 0b11];
    bytes.extend([0x01; 20]);
    let options = DecodeOptions::default().with_max_compact_bytes(16);
    assert_eq!(
        decode_with::<CompactBig>(&bytes, &options),
        Err(Error::UnsupportedMagnitude {
            byte_count: 20,
            max: 16
        })
    );
}

#[test]
fn test_truncated_compacts_are_errors() {
    for form in ["", "01", "02 0001", "07 00000000"] {
        let err = decode::<Compact<u64>>(&hex(form)).unwrap_err();
        assert!(err.is_truncation(), "{form}: {err}");
    }
}

#[test]
fn test_decode_advances_cursor() {
    let bytes = hex("fd ff 04 ff");
    let mut reader = Reader::new(&bytes);
    assert_eq!(decode_compact(&mut reader).unwrap(), U128::from(16_383u32));
    assert_eq!(reader.position(), 2);
    assert_eq!(decode_len(&mut reader).unwrap(), 1);
    assert_eq!(reader.remaining(), 1);

    let (value, used) = decode_prefix::<Compact<u8>>(&bytes[2..]).unwrap();
    assert_eq!((value, used), (Compact(1), 1));
}

#[test]
fn test_length_prefix_helpers() {
    for len in [0usize, 63, 64, 16_383, 16_384, 1 << 30] {
        let mut buf = Vec::new();
        encode_len(len, &mut buf);
        assert_eq!(buf.len(), len_prefix_size(len), "{len}");
        assert_eq!(decode_len(&mut Reader::new(&buf)).unwrap(), len);
    }
}

#[test]
fn test_largest_compact_big() {
    // 2^536 - 1 occupies the full 67-byte payload
    let bytes: Vec<u8> = std::iter::once(0xff).chain([0xff; 67]).collect();
    let big: CompactBig = decode_with(&bytes, &DecodeOptions::strict()).unwrap();
    assert_eq!(encode(&big), bytes);
    assert_eq!(big.value().to_string().len(), 162);
}
