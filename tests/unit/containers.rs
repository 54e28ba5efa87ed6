//! Container wire forms: sequences, dictionaries, options, results, tuples.

use std::collections::{BTreeMap, HashMap};

use super::common::{assert_roundtrip, assert_wire, hex};
use scalewire::{
    decode, decode_with, encode, encode_into_slice, Bytes, Compact, DecodeOptions, Error,
    FixedSequence, Reader, VaryingData,
};

// ============================================================================
// SEQUENCES
// ============================================================================

#[test]
fn test_sequence_of_strings() {
    let words: Vec<String> = ["a1", "b2", "c3"].map(String::from).to_vec();
    assert_wire(&words, &hex("0c 08 6131 08 6232 08 6333"));
}

#[test]
fn test_empty_sequence_is_one_zero_byte() {
    assert_wire(&Vec::<u64>::new(), &[0x00]);
    assert_wire(&String::new(), &[0x00]);
}

#[test]
fn test_sequence_of_fixed_width() {
    assert_wire(&vec![1u16, 2, 3], &hex("0c 0100 0200 0300"));
    assert_wire(&vec![true, false], &hex("08 01 00"));
}

#[test]
fn test_sequence_longer_than_one_byte_prefix() {
    let long = vec![7u8; 64];
    let bytes = encode(&long);
    assert_eq!(&bytes[..2], &[0x01, 0x01]);
    assert_eq!(bytes.len(), 66);
    assert_roundtrip(&long);
}

#[test]
fn test_sequence_claims_more_than_available() {
    // prefix says 1000 elements, none follow
    let bytes = encode(&Compact(1000u32));
    assert!(decode::<Vec<u32>>(&bytes).unwrap_err().is_truncation());
}

#[test]
fn test_zero_width_elements_cannot_outrun_the_input() {
    // Compact(2^64 - 1), then nothing: every element would decode from zero bytes
    let bytes = hex("13 ffffffffffffffff");
    for err in [
        decode::<Vec<()>>(&bytes).unwrap_err(),
        decode::<Vec<[u8; 0]>>(&bytes).unwrap_err(),
        decode::<BTreeMap<(), ()>>(&bytes).unwrap_err(),
        decode::<HashMap<(), ()>>(&bytes).unwrap_err(),
    ] {
        assert!(matches!(err, Error::ZeroWidthLimit { offset: 9, .. }), "{err}");
    }

    // the budget covers the whole decode, not each container
    let opts = DecodeOptions::default().with_max_zero_width(4);
    let nested = encode(&vec![vec![(); 3], vec![(); 2]]);
    assert_eq!(
        decode_with::<Vec<Vec<()>>>(&nested, &opts),
        Err(Error::ZeroWidthLimit { offset: 3, max: 4 })
    );
    assert_eq!(decode::<Vec<Vec<()>>>(&nested).unwrap(), vec![vec![(); 3], vec![(); 2]]);
    assert_roundtrip(&vec![(); 1000]);
}

#[test]
fn test_bytes_and_str_share_a_wire_form() {
    let bytes = Bytes(b"hi".to_vec());
    assert_eq!(encode(&bytes), encode("hi"));
    assert_wire(&bytes, &hex("08 6869"));
}

#[test]
fn test_invalid_utf8_is_an_error() {
    let err = decode::<String>(&hex("08 c328")).unwrap_err();
    assert!(matches!(err, Error::InvalidUtf8 { offset: 1, .. }), "{err}");
}

#[test]
fn test_fixed_array_has_no_prefix() {
    assert_wire(&[1u8, 2, 3], &hex("010203"));
    assert_wire(&[0u32; 0], &[]);
    assert_wire(&[[1u8, 2], [3, 4]], &hex("01020304"));
}

#[test]
fn test_fixed_sequence_needs_the_length() {
    let seq = FixedSequence(vec![10u16, 20]);
    let bytes = encode(&seq);
    assert_eq!(bytes, hex("0a00 1400"));
    let back = FixedSequence::<u16>::decode_exact(&mut Reader::new(&bytes), 2).unwrap();
    assert_eq!(back, seq);
}

// ============================================================================
// DICTIONARIES
// ============================================================================

#[test]
fn test_dictionary_encodes_in_key_order() {
    let mut map = HashMap::new();
    map.insert("ccc".to_string(), 3u8);
    map.insert("aaa".to_string(), 1u8);
    map.insert("bbb".to_string(), 2u8);
    let expected = hex("0c 0c616161 01 0c626262 02 0c636363 03");
    assert_eq!(encode(&map), expected);

    let sorted: BTreeMap<String, u8> = map.into_iter().collect();
    assert_wire(&sorted, &expected);
}

#[test]
fn test_dictionary_decode_accepts_any_order() {
    let unsorted = hex("08 02 00 01 00");
    let map: BTreeMap<u8, u8> = decode(&unsorted).unwrap();
    assert_eq!(map, BTreeMap::from([(1, 0), (2, 0)]));
    // re-encoding sorts
    assert_eq!(encode(&map), hex("08 01 00 02 00"));
}

#[test]
fn test_dictionary_repeated_key_keeps_last() {
    let map: HashMap<u8, u8> = decode(&hex("08 05 aa 05 bb")).unwrap();
    assert_eq!(map.len(), 1);
    assert_eq!(map[&5], 0xbb);
}

#[test]
fn test_empty_dictionary() {
    assert_wire(&BTreeMap::<u32, String>::new(), &[0x00]);
}

// ============================================================================
// OPTION / RESULT
// ============================================================================

#[test]
fn test_option_tags() {
    assert_wire(&None::<u32>, &[0x00]);
    assert_wire(&Some(7u8), &[0x01, 0x07]);
    assert_wire(&Some(None::<u8>), &[0x01, 0x00]);
}

#[test]
fn test_result_tags() {
    assert_wire(&Err::<u8, ()>(()), &[0x00]);
    assert_wire(&Ok::<u8, ()>(9), &[0x01, 0x09]);
    assert_wire(&Err::<(), String>("no".into()), &hex("00 08 6e6f"));
}

#[test]
fn test_nonzero_flag_is_present_unless_strict() {
    assert_eq!(decode::<Option<u8>>(&[0x02, 0x05]).unwrap(), Some(5));
    assert_eq!(
        decode_with::<Option<u8>>(&[0x02, 0x05], &DecodeOptions::strict()),
        Err(Error::InvalidBool {
            offset: 0,
            byte: 0x02
        })
    );
}

#[test]
fn test_bool_policy() {
    assert!(decode::<bool>(&[0xff]).unwrap());
    assert!(!decode::<bool>(&[0x00]).unwrap());
    assert!(decode_with::<bool>(&[0xff], &DecodeOptions::strict()).is_err());
}

// ============================================================================
// TUPLES AND VARYING DATA
// ============================================================================

#[test]
fn test_tuple_is_concatenation() {
    assert_wire(&(1u8, 2u16, true), &hex("01 0200 01"));
    assert_wire(&(Compact(64u32), "x".to_string()), &hex("0101 04 78"));
}

#[test]
fn test_varying_data_writes_ascending_tags() {
    let data: VaryingData<u8> = [(7, 0x70), (0, 0x00), (3, 0x30)].into_iter().collect();
    assert_wire(&data, &hex("0000 0330 0770"));
}

#[test]
fn test_varying_data_consumes_everything() {
    let data: VaryingData<u8> = decode(&hex("0101 0202")).unwrap();
    assert_eq!(data.iter().count(), 2);
    // an odd trailing byte is a truncated payload, not leftover input
    assert!(decode::<VaryingData<u8>>(&hex("0101 02"))
        .unwrap_err()
        .is_truncation());
}

// ============================================================================
// OUTPUT SINKS
// ============================================================================

#[test]
fn test_encode_into_slice() {
    let value = (Compact(16_384u32), vec![1u8]);
    let mut buf = [0u8; 8];
    let used = encode_into_slice(&value, &mut buf).unwrap();
    assert_eq!(&buf[..used], &hex("02000100 04 01"));

    let mut small = [0u8; 3];
    assert_eq!(
        encode_into_slice(&value, &mut small),
        Err(Error::BufferTooSmall {
            needed: 6,
            available: 3
        })
    );
}

#[test]
fn test_trailing_bytes_rejected_by_whole_decode() {
    assert!(matches!(
        decode::<u8>(&[1, 2]),
        Err(Error::TrailingBytes {
            offset: 1,
            remaining: 1
        })
    ));
}
