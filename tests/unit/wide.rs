//! Two-word 128-bit arithmetic against known values.

use std::str::FromStr;

use super::common::assert_wire;
use scalewire::{decode, encode, Error, I128, U128};

fn u(v: u128) -> U128 {
    U128::from(v)
}

fn i(v: i128) -> I128 {
    I128::from(v)
}

// ============================================================================
// LAYOUT
// ============================================================================

#[test]
fn test_word_layout_is_low_first() {
    let x = U128::from_words(0x1122_3344_5566_7788, 0x99aa_bbcc_ddee_ff00);
    assert_eq!(x.low(), 0x1122_3344_5566_7788);
    assert_eq!(x.high(), 0x99aa_bbcc_ddee_ff00);
    assert_eq!(u128::from(x), 0x99aa_bbcc_ddee_ff00_1122_3344_5566_7788);
    assert_eq!(encode(&x)[..8], 0x1122_3344_5566_7788u64.to_le_bytes());
}

#[test]
fn test_fixed_width_wire_form() {
    let mut expected = vec![0xff; 8];
    expected.extend([0; 8]);
    assert_wire(&u(u64::MAX as u128), &expected);
    assert_wire(&I128::MINUS_ONE, &[0xff; 16]);
    assert_eq!(encode(&i(-2)), encode(&-2i128));
    assert_eq!(decode::<I128>(&encode(&i128::MIN)).unwrap(), I128::MIN);
}

// ============================================================================
// CARRIES AND BORROWS
// ============================================================================

#[test]
fn test_add_carries_into_high_word() {
    let sum = U128::from_words(u64::MAX, 0).checked_add(U128::ONE).unwrap();
    assert_eq!(sum, U128::from_words(0, 1));
}

#[test]
fn test_sub_borrows_from_high_word() {
    let diff = U128::from_words(0, 1).checked_sub(U128::ONE).unwrap();
    assert_eq!(diff, U128::from_words(u64::MAX, 0));
}

#[test]
fn test_unsigned_overflow_policies() {
    assert_eq!(U128::MAX.wrapping_add(U128::ONE), U128::ZERO);
    assert_eq!(U128::MAX.saturating_add(U128::ONE), U128::MAX);
    assert_eq!(
        U128::MAX.checked_add(U128::ONE),
        Err(Error::Overflow {
            op: "add",
            target: "U128"
        })
    );
    assert_eq!(U128::ZERO.wrapping_sub(U128::ONE), U128::MAX);
    assert_eq!(U128::ZERO.saturating_sub(U128::ONE), U128::ZERO);
    assert!(U128::ZERO.checked_sub(U128::ONE).is_err());
}

#[test]
fn test_mul_cross_terms() {
    // (2^64 + 3) * 5 = 5 * 2^64 + 15
    let product = U128::from_words(3, 1).checked_mul(u(5)).unwrap();
    assert_eq!(product, U128::from_words(15, 5));

    let a = u(0xdead_beef_cafe_babe_1234_5678);
    let b = u(0x1_0000_0001);
    assert_eq!(
        u128::from(a.checked_mul(b).unwrap()),
        0xdead_beef_cafe_babe_1234_5678u128 * 0x1_0000_0001
    );

    let two_64 = U128::from_words(0, 1);
    assert!(two_64.checked_mul(two_64).is_err());
    assert_eq!(two_64.wrapping_mul(two_64), U128::ZERO);
    assert_eq!(two_64.saturating_mul(two_64), U128::MAX);
}

#[test]
fn test_signed_overflow_policies() {
    assert_eq!(I128::MAX.wrapping_add(I128::ONE), I128::MIN);
    assert_eq!(I128::MAX.saturating_add(I128::ONE), I128::MAX);
    assert_eq!(I128::MIN.saturating_sub(I128::ONE), I128::MIN);
    assert!(I128::MIN.checked_sub(I128::ONE).is_err());
    assert_eq!(I128::MIN.saturating_mul(i(2)), I128::MIN);
    assert_eq!(I128::MIN.saturating_mul(i(-2)), I128::MAX);
    assert_eq!(i(-3).checked_mul(i(7)).unwrap(), i(-21));
    assert_eq!(i(-3).checked_mul(i(-7)).unwrap(), i(21));
}

#[test]
fn test_min_has_no_positive_counterpart() {
    assert!(I128::MIN.checked_neg().is_err());
    assert!(I128::MIN.checked_abs().is_err());
    assert_eq!(I128::MIN.wrapping_neg(), I128::MIN);
    assert_eq!(I128::MIN.unsigned_abs(), u(1 << 127));
    assert_eq!(i(-5).checked_abs().unwrap(), i(5));
}

// ============================================================================
// DIVISION
// ============================================================================

#[test]
fn test_division() {
    assert_eq!(U128::MAX.checked_div(u(3)).unwrap(), u(u128::MAX / 3));
    assert_eq!(u(17).checked_rem(u(5)).unwrap(), u(2));
    assert_eq!(u(1).checked_div(U128::ZERO), Err(Error::DivisionByZero));

    // truncation toward zero, remainder follows the dividend
    assert_eq!(i(-7).checked_div(i(2)).unwrap(), i(-3));
    assert_eq!(i(-7).checked_rem(i(2)).unwrap(), i(-1));
    assert_eq!(i(7).checked_rem(i(-2)).unwrap(), i(1));

    assert!(I128::MIN.checked_div(I128::MINUS_ONE).is_err());
    assert_eq!(I128::MIN.wrapping_div(I128::MINUS_ONE), I128::MIN);
    assert_eq!(i(-7).wrapping_div(i(2)), i(-3));
    assert_eq!(I128::ONE.checked_rem(I128::ZERO), Err(Error::DivisionByZero));
}

#[test]
#[should_panic(expected = "division by zero")]
fn test_wrapping_div_by_zero_panics() {
    let _ = I128::ONE.wrapping_div(I128::ZERO);
}

// ============================================================================
// SHIFTS AND BITS
// ============================================================================

#[test]
fn test_shifts_cross_the_word_boundary() {
    assert_eq!(U128::ONE.wrapping_shl(64), U128::from_words(0, 1));
    assert_eq!(U128::from_words(0, 1).wrapping_shr(1), U128::from_words(1 << 63, 0));
    assert_eq!(U128::ONE.wrapping_shl(128), U128::ONE);
    assert_eq!(i(-8).wrapping_shr(1), i(-4));
    assert_eq!(I128::MIN.wrapping_shr(127), I128::MINUS_ONE);
    assert_eq!(U128::from_words(0, 1).bits(), 65);
    assert_eq!(U128::ZERO.leading_zeros(), 128);
}

// ============================================================================
// ORDERING
// ============================================================================

#[test]
fn test_signed_ordering() {
    let mut values = vec![i(5), I128::MIN, i(-1), I128::MAX, I128::ZERO, i(-(1 << 64))];
    values.sort();
    let native: Vec<i128> = values.into_iter().map(i128::from).collect();
    assert_eq!(native, vec![i128::MIN, -(1 << 64), -1, 0, 5, i128::MAX]);
}

#[test]
fn test_unsigned_ordering_uses_high_word_first() {
    assert!(U128::from_words(0, 1) > U128::from_words(u64::MAX, 0));
}

// ============================================================================
// DECIMAL PARSING AND FORMATTING
// ============================================================================

#[test]
fn test_decimal_round_trip_at_extremes() {
    for text in ["0", "340282366920938463463374607431768211455"] {
        assert_eq!(U128::from_str(text).unwrap().to_string(), text);
    }
    for text in [
        "-170141183460469231731687303715884105728",
        "170141183460469231731687303715884105727",
        "-1",
    ] {
        assert_eq!(I128::from_str(text).unwrap().to_string(), text);
    }
}

#[test]
fn test_decimal_parse_failures() {
    assert!(matches!(
        U128::from_str("340282366920938463463374607431768211456"),
        Err(Error::OutOfRange { .. })
    ));
    assert!(matches!(
        I128::from_str("170141183460469231731687303715884105728"),
        Err(Error::OutOfRange { .. })
    ));
    assert!(matches!(U128::from_str("-5"), Err(Error::OutOfRange { .. })));
    for bad in ["", "-", "12a", "0x10", " 1"] {
        assert!(
            matches!(U128::from_str(bad), Err(Error::Parse { .. })),
            "{bad:?}"
        );
    }
}

#[test]
fn test_conversions() {
    assert!(matches!(
        I128::try_from(U128::MAX),
        Err(Error::OutOfRange { target: "I128", .. })
    ));
    assert_eq!(I128::try_from(u(5)).unwrap(), i(5));
    assert!(U128::try_from(i(-1)).is_err());
    assert_eq!(U128::try_from(I128::MAX).unwrap(), u(i128::MAX as u128));
}
