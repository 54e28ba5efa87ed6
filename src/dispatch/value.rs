// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dynamically decoded values.
//!
//! A `Value` carries enough structure to re-encode itself byte for byte, so
//! decode-then-encode is the identity on canonical input.

use std::collections::BTreeMap;

use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use super::kind::Field;
use crate::codec::Encode;
use crate::compact::{compact_len, encode_compact};
use crate::containers::{encode_raw, raw_size, VaryingData};
use crate::io::Output;
use crate::wide::{I128, U128};

/// A decoded value of any supported kind.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Value {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(U128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(I128),
    Compact(U128),
    Bytes(Vec<u8>),
    Str(String),
    Unit,
    Sequence(Vec<Value>),
    Array(Vec<Value>),
    Option(Option<Box<Value>>),
    Result(Result<Box<Value>, Box<Value>>),
    Dictionary(BTreeMap<Value, Value>),
    Tuple(Vec<Field<Value>>),
    Varying(VaryingData<Value>),
}

impl Value {
    pub fn some(inner: Value) -> Self {
        Value::Option(Some(Box::new(inner)))
    }

    pub fn ok(inner: Value) -> Self {
        Value::Result(Ok(Box::new(inner)))
    }

    pub fn err(inner: Value) -> Self {
        Value::Result(Err(Box::new(inner)))
    }

    pub fn str(s: impl Into<String>) -> Self {
        Value::Str(s.into())
    }

    /// Short name of the variant, for logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::U128(_) => "u128",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::I128(_) => "i128",
            Value::Compact(_) => "Compact",
            Value::Bytes(_) => "Bytes",
            Value::Str(_) => "Str",
            Value::Unit => "()",
            Value::Sequence(_) => "Vec",
            Value::Array(_) => "Array",
            Value::Option(_) => "Option",
            Value::Result(_) => "Result",
            Value::Dictionary(_) => "Map",
            Value::Tuple(_) => "Tuple",
            Value::Varying(_) => "Enum",
        }
    }
}

impl Encode for Value {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        match self {
            Value::Bool(v) => v.encode_to(dest),
            Value::U8(v) => v.encode_to(dest),
            Value::U16(v) => v.encode_to(dest),
            Value::U32(v) => v.encode_to(dest),
            Value::U64(v) => v.encode_to(dest),
            Value::U128(v) => v.encode_to(dest),
            Value::I8(v) => v.encode_to(dest),
            Value::I16(v) => v.encode_to(dest),
            Value::I32(v) => v.encode_to(dest),
            Value::I64(v) => v.encode_to(dest),
            Value::I128(v) => v.encode_to(dest),
            Value::Compact(v) => encode_compact(*v, dest),
            Value::Bytes(v) => encode_raw(v, dest),
            Value::Str(v) => v.encode_to(dest),
            Value::Unit => {}
            Value::Sequence(items) => items.encode_to(dest),
            Value::Array(items) => {
                for item in items {
                    item.encode_to(dest);
                }
            }
            Value::Option(v) => v.encode_to(dest),
            Value::Result(v) => v.encode_to(dest),
            Value::Dictionary(map) => map.encode_to(dest),
            Value::Tuple(fields) => {
                for field in fields {
                    field.item.encode_to(dest);
                }
            }
            Value::Varying(data) => data.encode_to(dest),
        }
    }

    fn encoded_size(&self) -> usize {
        match self {
            Value::Bool(_) | Value::U8(_) | Value::I8(_) => 1,
            Value::U16(_) | Value::I16(_) => 2,
            Value::U32(_) | Value::I32(_) => 4,
            Value::U64(_) | Value::I64(_) => 8,
            Value::U128(_) | Value::I128(_) => 16,
            Value::Compact(v) => compact_len(*v),
            Value::Bytes(v) => raw_size(v),
            Value::Str(v) => v.encoded_size(),
            Value::Unit => 0,
            Value::Sequence(items) => items.encoded_size(),
            Value::Array(items) => items.iter().map(Encode::encoded_size).sum(),
            Value::Option(v) => v.encoded_size(),
            Value::Result(v) => v.encoded_size(),
            Value::Dictionary(map) => map.encoded_size(),
            Value::Tuple(fields) => fields.iter().map(|f| f.item.encoded_size()).sum(),
            Value::Varying(data) => data.encoded_size(),
        }
    }
}

// ============================================================================
// JSON RENDERING
// ============================================================================
//
// 128-bit values and compact magnitudes render as decimal strings, bytes as
// 0x-prefixed hex. Dictionaries become arrays of [key, value] pairs since keys
// aren't always strings.

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::U8(v) => serializer.serialize_u8(*v),
            Value::U16(v) => serializer.serialize_u16(*v),
            Value::U32(v) => serializer.serialize_u32(*v),
            Value::U64(v) => serializer.serialize_u64(*v),
            Value::I8(v) => serializer.serialize_i8(*v),
            Value::I16(v) => serializer.serialize_i16(*v),
            Value::I32(v) => serializer.serialize_i32(*v),
            Value::I64(v) => serializer.serialize_i64(*v),
            Value::U128(v) | Value::Compact(v) => serializer.collect_str(v),
            Value::I128(v) => serializer.collect_str(v),
            Value::Bytes(v) => serializer.serialize_str(&format!("0x{}", hex::encode(v))),
            Value::Str(v) => serializer.serialize_str(v),
            Value::Unit => serializer.serialize_unit(),
            Value::Sequence(items) | Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Option(None) => serializer.serialize_none(),
            Value::Option(Some(inner)) => serializer.serialize_some(inner.as_ref()),
            Value::Result(outcome) => {
                let (key, inner) = match outcome {
                    Ok(v) => ("ok", v),
                    Err(v) => ("err", v),
                };
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(key, inner.as_ref())?;
                map.end()
            }
            Value::Dictionary(entries) => {
                let mut seq = serializer.serialize_seq(Some(entries.len()))?;
                for pair in entries {
                    seq.serialize_element(&pair)?;
                }
                seq.end()
            }
            Value::Tuple(fields) if fields.iter().all(|f| f.name.is_some()) && !fields.is_empty() => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for field in fields {
                    map.serialize_entry(field.name.as_deref().unwrap_or_default(), &field.item)?;
                }
                map.end()
            }
            Value::Tuple(fields) => {
                let mut seq = serializer.serialize_seq(Some(fields.len()))?;
                for field in fields {
                    seq.serialize_element(&field.item)?;
                }
                seq.end()
            }
            Value::Varying(data) => {
                let mut map = serializer.serialize_map(Some(data.len()))?;
                for (tag, payload) in data {
                    map.serialize_entry(&tag.to_string(), payload)?;
                }
                map.end()
            }
        }
    }
}
