//! Dynamic decoding through kind descriptors, witnesses and `Described`.

use std::collections::BTreeMap;

use super::common::hex;
use scalewire::{
    decode_kind, decode_value, encode, Compact, DecodeOptions, Decode, Described, Encode, Error,
    Field, Kind, KindError, Reader, Value, VaryingData, I128, U128,
};

fn decode_as(descriptor: &str, bytes: &[u8]) -> scalewire::Result<Value> {
    let kind: Kind = descriptor.parse().expect("descriptor parses");
    decode_kind(&kind, bytes, &DecodeOptions::default())
}

#[derive(Debug, PartialEq, Encode, Decode)]
struct Account {
    #[codec(compact)]
    nonce: u64,
    balance: U128,
    debt: I128,
    tags: Vec<String>,
}

// ============================================================================
// DESCRIPTORS
// ============================================================================

#[test]
fn test_leaf_kinds() {
    assert_eq!(decode_as("u16", &hex("3412")).unwrap(), Value::U16(0x1234));
    assert_eq!(decode_as("i8", &hex("ff")).unwrap(), Value::I8(-1));
    assert_eq!(decode_as("bool", &hex("07")).unwrap(), Value::Bool(true));
    assert_eq!(
        decode_as("Compact", &hex("02000100")).unwrap(),
        Value::Compact(U128::from(16_384u32))
    );
    assert_eq!(decode_as("Str", &hex("08 6869")).unwrap(), Value::str("hi"));
    assert_eq!(decode_as("Bytes", &hex("08 0001")).unwrap(), Value::Bytes(vec![0, 1]));
    assert_eq!(decode_as("()", &[]).unwrap(), Value::Unit);
}

#[test]
fn test_named_record_matches_derived_struct() {
    let account = Account {
        nonce: 3,
        balance: U128::MAX,
        debt: I128::MIN,
        tags: vec!["x".into()],
    };
    let bytes = encode(&account);
    let value = decode_as(
        "{nonce: Compact, balance: u128, debt: i128, tags: Vec<Str>}",
        &bytes,
    )
    .unwrap();

    let Value::Tuple(fields) = &value else {
        panic!("expected a record, got {value:?}");
    };
    assert_eq!(fields[0], Field::named("nonce", Value::Compact(U128::from(3u8))));
    assert_eq!(fields[2].item, Value::I128(I128::MIN));
    assert_eq!(encode(&value), bytes);
}

#[test]
fn test_result_and_option_shapes() {
    assert_eq!(decode_as("Result<u8, ()>", &[0x00]).unwrap(), Value::err(Value::Unit));
    assert_eq!(decode_as("Result<u8, ()>", &[0x01, 0x2a]).unwrap(), Value::ok(Value::U8(42)));
    assert_eq!(decode_as("Option<Str>", &[0x00]).unwrap(), Value::Option(None));
    assert_eq!(
        decode_as("Option<Option<u8>>", &[0x01, 0x00]).unwrap(),
        Value::some(Value::Option(None))
    );
}

#[test]
fn test_dictionary_value_is_sorted() {
    let unsorted = hex("08 0462 01 0461 00");
    let value = decode_as("Map<Str, bool>", &unsorted).unwrap();
    let Value::Dictionary(map) = &value else {
        panic!("expected a dictionary");
    };
    assert_eq!(map.keys().cloned().collect::<Vec<_>>(), vec![Value::str("a"), Value::str("b")]);
    assert_eq!(encode(&value), hex("08 0461 00 0462 01"));
}

#[test]
fn test_varying_data_by_schema() {
    let kind = Kind::varying([(0, Kind::U8), (4, Kind::Str), (9, Kind::Unit)]).unwrap();
    let bytes = hex("04 08 6f6b 00 07 09");
    let value = decode_kind(&kind, &bytes, &DecodeOptions::default()).unwrap();
    let expected: VaryingData = [(4, Value::str("ok")), (0, Value::U8(7)), (9, Value::Unit)]
        .into_iter()
        .collect();
    assert_eq!(value, Value::Varying(expected));
    // always re-encoded in ascending tag order
    assert_eq!(encode(&value), hex("00 07 04 08 6f6b 09"));

    assert_eq!(
        decode_kind(&kind, &hex("05 00"), &DecodeOptions::default()),
        Err(Error::UnknownVariant {
            tag: 5,
            target: "varying data"
        })
    );
    assert_eq!(
        decode_kind(&kind, &hex("0001 0002"), &DecodeOptions::default()),
        Err(Error::DuplicateVariant { tag: 0 })
    );
}

#[test]
fn test_arrays_have_no_prefix() {
    assert_eq!(
        decode_as("[u16; 2]", &hex("0100 0200")).unwrap(),
        Value::Array(vec![Value::U16(1), Value::U16(2)])
    );
    assert!(matches!(
        decode_as("[u16; 2]", &hex("0100 0200 00")),
        Err(Error::TrailingBytes { offset: 4, .. })
    ));
}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

#[test]
fn test_unsupported_kind_is_configuration_error() {
    assert!(matches!("f64".parse::<Kind>(), Err(KindError::UnknownKind(name)) if name == "f64"));
    assert!(matches!("Vec<u8".parse::<Kind>(), Err(KindError::Syntax { .. })));
    assert!(matches!(
        "Enum{1: u8, 1: Str}".parse::<Kind>(),
        Err(KindError::DuplicateVariant(1))
    ));
}

#[test]
fn test_witness_kinds() {
    let witness = Value::Dictionary(BTreeMap::from([(Value::str("k"), Value::U64(1))]));
    assert_eq!(Kind::of(&witness).unwrap().to_string(), "Map<Str, u64>");
    assert!(matches!(
        Kind::of(&Value::Option(None)),
        Err(KindError::AmbiguousWitness(_))
    ));
    assert!(matches!(
        Kind::of(&Value::ok(Value::Unit)),
        Err(KindError::AmbiguousWitness(_))
    ));
}

#[test]
fn test_witness_drives_decode() {
    let witness = Value::Sequence(vec![Value::Tuple(vec![
        Field::positional(Value::U32(0)),
        Field::positional(Value::str("")),
    ])]);
    let kind = Kind::of(&witness).unwrap();
    let bytes = encode(&vec![(7u32, "seven".to_string()), (8, "eight".to_string())]);
    let value = decode_kind(&kind, &bytes, &DecodeOptions::default()).unwrap();
    assert_eq!(Kind::of(&value).unwrap(), kind);
    assert_eq!(encode(&value), bytes);
}

// ============================================================================
// STATIC AND DYNAMIC AGREE
// ============================================================================

#[test]
fn test_described_kind_decodes_static_bytes() {
    type Shape = (Vec<Compact<u32>>, Option<[i16; 3]>, Result<String, u8>);
    let original: Shape = (vec![Compact(1), Compact(70_000)], Some([-1, 0, 1]), Err(3));
    let bytes = encode(&original);

    let kind = Shape::kind();
    assert_eq!(kind.to_string(), "(Vec<Compact>, Option<[i16; 3]>, Result<Str, u8>)");
    let value = decode_kind(&kind, &bytes, &DecodeOptions::default()).unwrap();
    assert_eq!(encode(&value), bytes);
    assert_eq!(value.encoded_size(), bytes.len());
}

#[test]
fn test_decode_value_shares_the_reader() {
    // a compact count, then that many u8s, then a string: decoded piecewise
    let bytes = hex("08 0a 0b 04 7a");
    let mut reader = Reader::new(&bytes);
    let seq = decode_value(&Kind::sequence(Kind::U8), &mut reader).unwrap();
    let rest = String::decode(&mut reader).unwrap();
    assert_eq!(seq, Value::Sequence(vec![Value::U8(10), Value::U8(11)]));
    assert_eq!(rest, "z");
    reader.finish().unwrap();
}

#[test]
fn test_depth_limit_applies_to_dynamic_decode() {
    let kind: Kind = "Option<Option<Option<Option<u8>>>>".parse().unwrap();
    let bytes = hex("01 01 01 01 05");
    let shallow = DecodeOptions::default().with_max_depth(2);
    assert_eq!(
        decode_kind(&kind, &bytes, &shallow),
        Err(Error::DepthLimit { max: 2 })
    );
    assert!(decode_kind(&kind, &bytes, &DecodeOptions::default()).is_ok());
}

#[test]
fn test_zero_width_budget_applies_to_dynamic_decode() {
    let hostile = hex("13 ffffffffffffffff");
    for descriptor in ["Vec<()>", "Map<(), ()>", "Vec<((), [u8; 0])>"] {
        let err = decode_as(descriptor, &hostile).unwrap_err();
        assert!(matches!(err, Error::ZeroWidthLimit { .. }), "{descriptor}: {err}");
    }
    // static and dynamic decode agree on where the budget runs out
    let opts = DecodeOptions::default().with_max_zero_width(2);
    let bytes = encode(&vec![(); 3]);
    let dynamic = decode_kind(&<Vec<()>>::kind(), &bytes, &opts);
    let typed = scalewire::decode_with::<Vec<()>>(&bytes, &opts);
    assert_eq!(dynamic.unwrap_err(), typed.unwrap_err());
}

#[test]
fn test_json_rendering() {
    let value = decode_as(
        "{id: Compact, owner: Option<Bytes>, balance: i128}",
        &hex("fd ff 01 08 beef ff ff ff ff ff ff ff ff ff ff ff ff ff ff ff ff"),
    )
    .unwrap();
    let json = serde_json::to_value(&value).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"id": "16383", "owner": "0xbeef", "balance": "-1"})
    );
}
