//! Codec invariants over generated values.

use std::collections::{BTreeMap, HashMap};

use proptest::prelude::*;
use scalewire::compact::compact_len;
use scalewire::{
    decode, decode_kind, decode_with, encode, Compact, CompactMode, DecodeOptions, Described,
    Encode, Kind, Value, U128,
};

use super::common::assert_roundtrip;

/// The encoding of `value` in `mode`, even when a smaller mode would do.
fn encode_in_mode(value: u32, mode: CompactMode) -> Vec<u8> {
    let v = u64::from(value);
    match mode {
        CompactMode::SingleByte => vec![(v << 2) as u8],
        CompactMode::TwoByte => ((v << 2) as u16 | 0b01).to_le_bytes().to_vec(),
        CompactMode::FourByte => ((v << 2) as u32 | 0b10).to_le_bytes().to_vec(),
        CompactMode::BigInteger => {
            let mut bytes = vec![0b11];
            bytes.extend(value.to_le_bytes());
            bytes
        }
    }
}

fn modes_that_fit(value: u32) -> Vec<CompactMode> {
    let mut modes = vec![CompactMode::BigInteger];
    if value <= 0x3fff_ffff {
        modes.push(CompactMode::FourByte);
    }
    if value <= 0x3fff {
        modes.push(CompactMode::TwoByte);
    }
    if value <= 0x3f {
        modes.push(CompactMode::SingleByte);
    }
    modes
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // ========================================================================
    // COMPACT
    // ========================================================================

    #[test]
    fn prop_compact_round_trip(v in any::<u128>()) {
        let bytes = encode(&Compact(v));
        prop_assert_eq!(bytes.len(), compact_len(U128::from(v)));
        prop_assert_eq!(CompactMode::from_header(bytes[0]), CompactMode::for_magnitude(U128::from(v)));
        let strict: Compact<u128> = decode_with(&bytes, &DecodeOptions::strict()).unwrap();
        prop_assert_eq!(strict.0, v);
    }

    #[test]
    fn prop_compact_length_is_monotonic(a in any::<u64>(), b in any::<u64>()) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(Compact(lo).encoded_size() <= Compact(hi).encoded_size());
    }

    #[test]
    fn prop_every_fitting_mode_decodes_leniently(v in any::<u32>()) {
        let minimal = CompactMode::for_magnitude(U128::from(v));
        for mode in modes_that_fit(v) {
            let bytes = encode_in_mode(v, mode);
            prop_assert_eq!(decode::<Compact<u32>>(&bytes).unwrap().0, v);
            let canonical = decode_with::<Compact<u32>>(&bytes, &DecodeOptions::strict());
            prop_assert_eq!(canonical.is_ok(), mode == minimal, "{:?} for {}", mode, v);
        }
    }

    #[test]
    fn prop_signed_compact_is_magnitude(v in any::<i64>()) {
        prop_assert_eq!(encode(&Compact(v)), encode(&Compact(v.unsigned_abs())));
    }

    // ========================================================================
    // CONTAINERS
    // ========================================================================

    #[test]
    fn prop_nested_round_trip(
        items in prop::collection::vec((any::<u32>(), proptest::option::of(".{0,8}")), 0..16),
        flag in any::<bool>(),
    ) {
        assert_roundtrip(&items);
        let wrapped: Result<Vec<(u32, Option<String>)>, bool> =
            if flag { Ok(items.clone()) } else { Err(flag) };
        assert_roundtrip(&wrapped);
    }

    #[test]
    fn prop_dictionary_ignores_insertion_order(
        pairs in prop::collection::vec((any::<u16>(), any::<u8>()), 0..24),
    ) {
        let forward: HashMap<u16, u8> = pairs.iter().copied().collect();
        let sorted: BTreeMap<u16, u8> = forward.iter().map(|(&k, &v)| (k, v)).collect();
        let bytes = encode(&forward);
        prop_assert_eq!(&bytes, &encode(&sorted));
        prop_assert_eq!(decode::<BTreeMap<u16, u8>>(&bytes).unwrap(), sorted);
    }

    #[test]
    fn prop_truncation_never_panics(
        items in prop::collection::vec(".{0,6}", 1..6),
        cut in any::<prop::sample::Index>(),
    ) {
        let bytes = encode(&items);
        let cut = cut.index(bytes.len());
        let result = decode::<Vec<String>>(&bytes[..cut]);
        prop_assert!(result.is_err());
    }

    // ========================================================================
    // DYNAMIC DISPATCH
    // ========================================================================

    #[test]
    fn prop_dynamic_matches_static(
        items in prop::collection::vec((any::<u32>(), proptest::option::of(any::<i64>())), 0..8),
        tail in any::<u128>(),
    ) {
        type Shape = (Vec<(u32, Option<i64>)>, Compact<u128>);
        let value: Shape = (items, Compact(tail));
        let bytes = encode(&value);
        let kind = <Shape as Described>::kind();

        let dynamic = decode_kind(&kind, &bytes, &DecodeOptions::default()).unwrap();
        prop_assert_eq!(encode(&dynamic), bytes.clone());

        let reparsed: Kind = kind.to_string().parse().unwrap();
        prop_assert_eq!(&reparsed, &kind);
        prop_assert_eq!(decode_kind(&reparsed, &bytes, &DecodeOptions::default()).unwrap(), dynamic);
    }

    #[test]
    fn prop_dynamic_rejects_garbage_without_panicking(bytes in prop::collection::vec(any::<u8>(), 0..64)) {
        let kind: Kind = "Vec<(Compact, Option<Str>, Map<u8, bool>)>".parse().unwrap();
        if let Ok(value) = decode_kind(&kind, &bytes, &DecodeOptions::default()) {
            prop_assert!(matches!(value, Value::Sequence(_)));
        }
    }
}
