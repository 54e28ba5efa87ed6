// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Type-directed dispatch for slots whose shape is only known at run time.
//!
//! Typed code never needs this module: [`Decode`](crate::Decode) already picks
//! the decoder from the target type. Dispatch is for the other case, where the
//! caller holds a [`Kind`] (parsed from a descriptor, derived from a witness
//! value, or taken from a type via [`Described`]) and wants a [`Value`] back.
//!
//! The kind set is closed and [`decode_value`] matches on it exhaustively, so
//! adding a kind without teaching the decoder about it doesn't compile. Shapes
//! outside the set are rejected when the `Kind` is built, as a [`KindError`].
//! Decoding itself only ever fails with a data [`Error`](crate::Error).
//!
//! ```text
//! descriptor ──parse──▶ Kind ──decode_value(bytes)──▶ Value ──encode──▶ bytes
//!   witness ──Kind::of──▲
//!   T: Described ──kind()┘
//! ```
//!
//! [`KindError`]: crate::KindError

mod described;
mod kind;
mod parse;
mod value;

pub use described::Described;
pub use kind::{Field, Kind};
pub use value::Value;

use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::codec::Decode;
use crate::compact::{decode_compact, decode_len};
use crate::containers::{decode_entries, read_prefixed_bytes, read_string};
use crate::error::{Error, Result};
use crate::fixed::read_flag;
use crate::io::Reader;
use crate::options::DecodeOptions;
use crate::wide::{I128, U128};

/// Decode one value of shape `kind` from the reader.
pub fn decode_value(kind: &Kind, input: &mut Reader<'_>) -> Result<Value> {
    trace!(%kind, offset = input.position(), "dispatch");
    match kind {
        Kind::Bool => read_flag(input).map(Value::Bool),
        Kind::U8 => u8::decode(input).map(Value::U8),
        Kind::U16 => u16::decode(input).map(Value::U16),
        Kind::U32 => u32::decode(input).map(Value::U32),
        Kind::U64 => u64::decode(input).map(Value::U64),
        Kind::U128 => U128::decode(input).map(Value::U128),
        Kind::I8 => i8::decode(input).map(Value::I8),
        Kind::I16 => i16::decode(input).map(Value::I16),
        Kind::I32 => i32::decode(input).map(Value::I32),
        Kind::I64 => i64::decode(input).map(Value::I64),
        Kind::I128 => I128::decode(input).map(Value::I128),
        Kind::Compact => decode_compact(input).map(Value::Compact),
        Kind::Bytes => read_prefixed_bytes(input).map(|raw| Value::Bytes(raw.to_vec())),
        Kind::Str => read_string(input).map(Value::Str),
        Kind::Unit => Ok(Value::Unit),
        Kind::Sequence(element) => {
            let len = decode_len(input)?;
            decode_run(element, len, input).map(Value::Sequence)
        }
        Kind::Array(element, len) => decode_run(element, *len, input).map(Value::Array),
        Kind::Option(inner) => {
            if read_flag(input)? {
                input
                    .descend(|input| decode_value(inner, input))
                    .map(Value::some)
            } else {
                Ok(Value::Option(None))
            }
        }
        Kind::Result(ok, err) => {
            if read_flag(input)? {
                input.descend(|input| decode_value(ok, input)).map(Value::ok)
            } else {
                input.descend(|input| decode_value(err, input)).map(Value::err)
            }
        }
        Kind::Dictionary(key, value) => {
            let len = decode_len(input)?;
            input.descend(|input| {
                let mut map = BTreeMap::new();
                for _ in 0..len {
                    let offset = input.position();
                    let k = decode_value(key, input)?;
                    let v = decode_value(value, input)?;
                    input.note_element(offset)?;
                    if map.insert(k, v).is_some() {
                        debug!(offset, "dictionary key repeated, keeping the later value");
                    }
                }
                Ok(Value::Dictionary(map))
            })
        }
        Kind::Tuple(fields) => input.descend(|input| {
            fields
                .iter()
                .map(|field| {
                    Ok(Field {
                        name: field.name.clone(),
                        item: decode_value(&field.item, input)?,
                    })
                })
                .collect::<Result<Vec<_>>>()
                .map(Value::Tuple)
        }),
        Kind::Varying(schema) => decode_entries(input, |tag, input| match schema.get(&tag) {
            Some(payload) => decode_value(payload, input),
            None => Err(Error::UnknownVariant {
                tag,
                target: "varying data",
            }),
        })
        .map(Value::Varying),
    }
}

fn decode_run(element: &Kind, count: usize, input: &mut Reader<'_>) -> Result<Vec<Value>> {
    input.descend(|input| {
        let mut items = Vec::with_capacity(input.capacity_hint(count));
        for _ in 0..count {
            let start = input.position();
            items.push(decode_value(element, input)?);
            input.note_element(start)?;
        }
        Ok(items)
    })
}

/// Decode a whole buffer as one value of shape `kind`.
pub fn decode_kind(kind: &Kind, bytes: &[u8], options: &DecodeOptions) -> Result<Value> {
    let mut input = Reader::with_options(bytes, *options);
    let value = decode_value(kind, &mut input)?;
    input.finish()?;
    Ok(value)
}
