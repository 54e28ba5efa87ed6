// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Static types that know their own [`Kind`].

use std::collections::{BTreeMap, HashMap};

use super::kind::{Field, Kind};
use crate::compact::{Compact, CompactInt};
use crate::containers::Bytes;
use crate::wide::{I128, U128};

/// The kind witness for a statically typed value.
///
/// For any `T: Described + Encode + Decode`, decoding `T::kind()` dynamically
/// reads the same bytes as `T::decode`.
pub trait Described {
    fn kind() -> Kind;
}

macro_rules! described {
    ($($ty:ty => $kind:expr),* $(,)?) => {
        $(
            impl Described for $ty {
                fn kind() -> Kind {
                    $kind
                }
            }
        )*
    };
}

described! {
    bool => Kind::Bool,
    u8 => Kind::U8,
    u16 => Kind::U16,
    u32 => Kind::U32,
    u64 => Kind::U64,
    u128 => Kind::U128,
    U128 => Kind::U128,
    i8 => Kind::I8,
    i16 => Kind::I16,
    i32 => Kind::I32,
    i64 => Kind::I64,
    i128 => Kind::I128,
    I128 => Kind::I128,
    String => Kind::Str,
    Bytes => Kind::Bytes,
    () => Kind::Unit,
}

impl<T: CompactInt> Described for Compact<T> {
    fn kind() -> Kind {
        Kind::Compact
    }
}

impl<T: Described> Described for Box<T> {
    fn kind() -> Kind {
        T::kind()
    }
}

impl<T: Described> Described for Vec<T> {
    fn kind() -> Kind {
        Kind::sequence(T::kind())
    }
}

impl<T: Described, const N: usize> Described for [T; N] {
    fn kind() -> Kind {
        Kind::array(T::kind(), N)
    }
}

impl<T: Described> Described for Option<T> {
    fn kind() -> Kind {
        Kind::option(T::kind())
    }
}

impl<T: Described, E: Described> Described for Result<T, E> {
    fn kind() -> Kind {
        Kind::result(T::kind(), E::kind())
    }
}

impl<K: Described, V: Described> Described for BTreeMap<K, V> {
    fn kind() -> Kind {
        Kind::dictionary(K::kind(), V::kind())
    }
}

impl<K: Described, V: Described, S> Described for HashMap<K, V, S> {
    fn kind() -> Kind {
        Kind::dictionary(K::kind(), V::kind())
    }
}

macro_rules! described_tuple {
    ($($name:ident),+) => {
        impl<$($name: Described),+> Described for ($($name,)+) {
            fn kind() -> Kind {
                Kind::Tuple(vec![$(Field::positional($name::kind())),+])
            }
        }
    };
}

described_tuple!(A);
described_tuple!(A, B);
described_tuple!(A, B, C);
described_tuple!(A, B, C, D);
described_tuple!(A, B, C, D, E);
described_tuple!(A, B, C, D, E, F);
described_tuple!(A, B, C, D, E, F, G);
described_tuple!(A, B, C, D, E, F, G, H);
