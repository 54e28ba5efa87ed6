//! `#[derive(Encode, Decode)]` on structs and enums.

use std::collections::BTreeMap;

use super::common::{assert_roundtrip, assert_wire, hex};
use scalewire::{decode, decode_with, encode, Decode, DecodeOptions, Encode, Error, U128};

#[derive(Debug, PartialEq, Encode, Decode)]
struct Transfer {
    #[codec(compact)]
    amount: u128,
    memo: Option<String>,
}

#[derive(Debug, PartialEq, Encode, Decode)]
struct Wrapper(u16, bool);

#[derive(Debug, PartialEq, Encode, Decode)]
struct Marker;

#[derive(Debug, PartialEq, Encode, Decode)]
enum Call {
    Noop,
    Transfer(Transfer),
    #[codec(index = 9)]
    Batch {
        calls: Vec<Call>,
        #[codec(compact)]
        weight: u64,
    },
}

#[derive(Debug, PartialEq, Default, Encode, Decode)]
struct Cached {
    id: u32,
    #[codec(skip)]
    scratch: Vec<u8>,
}

#[derive(Debug, PartialEq, Encode, Decode)]
enum Tree {
    Leaf,
    Node(Box<Tree>),
}

#[derive(Debug, PartialEq, Encode, Decode)]
struct Generic<T> {
    items: Vec<T>,
    total: T,
}

#[test]
fn test_struct_fields_in_order() {
    let transfer = Transfer {
        amount: 64,
        memo: Some("hi".into()),
    };
    assert_wire(&transfer, &hex("0101 01 08 6869"));
}

#[test]
fn test_tuple_and_unit_structs() {
    assert_wire(&Wrapper(0x0201, true), &hex("0102 01"));
    assert_wire(&Marker, &[]);
}

#[test]
fn test_enum_discriminants() {
    assert_wire(&Call::Noop, &[0x00]);
    assert_wire(
        &Call::Transfer(Transfer {
            amount: 1,
            memo: None,
        }),
        &hex("01 04 00"),
    );
    assert_wire(
        &Call::Batch {
            calls: vec![Call::Noop, Call::Noop],
            weight: 16_384,
        },
        &hex("09 08 00 00 02000100"),
    );
}

#[test]
fn test_unknown_discriminant() {
    assert_eq!(
        decode::<Call>(&[0x05]),
        Err(Error::UnknownVariant {
            tag: 5,
            target: "Call"
        })
    );
}

#[test]
fn test_skipped_field_decodes_as_default() {
    let cached = Cached {
        id: 7,
        scratch: vec![1, 2, 3],
    };
    let bytes = encode(&cached);
    assert_eq!(bytes, hex("07000000"));
    assert_eq!(decode::<Cached>(&bytes).unwrap(), Cached { id: 7, ..Default::default() });
}

#[test]
fn test_generic_struct() {
    assert_roundtrip(&Generic {
        items: vec![U128::MAX, U128::ONE],
        total: U128::ZERO,
    });
    assert_wire(
        &Generic {
            items: vec![1u8],
            total: 1u8,
        },
        &hex("04 01 01"),
    );
}

#[test]
fn test_derived_types_compose_with_containers() {
    let mut by_name = BTreeMap::new();
    by_name.insert("b".to_string(), Call::Noop);
    by_name.insert(
        "a".to_string(),
        Call::Transfer(Transfer {
            amount: u128::MAX,
            memo: Some(String::new()),
        }),
    );
    assert_roundtrip(&by_name);
    assert_roundtrip(&Some(vec![Wrapper(1, false)]));
}

#[test]
fn test_recursive_type_respects_depth_limit() {
    let mut tree = Tree::Leaf;
    for _ in 0..10 {
        tree = Tree::Node(Box::new(tree));
    }
    assert_roundtrip(&tree);

    let mut deep = vec![0x01; 1_000_000];
    deep.push(0x00);
    assert_eq!(decode::<Tree>(&deep), Err(Error::DepthLimit { max: 64 }));

    // each node is two levels (the enum and its box)
    let shallow = DecodeOptions::default().with_max_depth(4);
    assert!(decode_with::<Tree>(&hex("01 00"), &shallow).is_ok());
    assert_eq!(
        decode_with::<Tree>(&hex("01 01 00"), &shallow),
        Err(Error::DepthLimit { max: 4 })
    );
}

#[test]
fn test_unit_struct_sequence_is_budgeted() {
    let err = decode::<Vec<Marker>>(&hex("13 ffffffffffffffff")).unwrap_err();
    assert!(matches!(err, Error::ZeroWidthLimit { .. }), "{err}");
}

#[test]
fn test_truncated_struct() {
    let bytes = encode(&Transfer {
        amount: 5,
        memo: Some("abc".into()),
    });
    for cut in 0..bytes.len() {
        assert!(decode::<Transfer>(&bytes[..cut]).unwrap_err().is_truncation(), "{cut}");
    }
}
