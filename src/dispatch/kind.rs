// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The closed kind set and witness derivation.

use std::collections::BTreeMap;
use std::fmt;

use tracing::warn;

use super::value::Value;
use crate::error::KindError;

/// A positional or named member of a tuple.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Field<T> {
    pub name: Option<String>,
    pub item: T,
}

impl<T> Field<T> {
    pub fn positional(item: T) -> Self {
        Field { name: None, item }
    }

    pub fn named(name: impl Into<String>, item: T) -> Self {
        Field {
            name: Some(name.into()),
            item,
        }
    }
}

/// Every wire shape the dynamic decoder knows.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    U8,
    U16,
    U32,
    U64,
    U128,
    I8,
    I16,
    I32,
    I64,
    I128,
    /// Compact magnitude up to 128 bits.
    Compact,
    Bytes,
    Str,
    Unit,
    Sequence(Box<Kind>),
    /// Fixed length from context, no prefix.
    Array(Box<Kind>, usize),
    Option(Box<Kind>),
    /// Ok arm, err arm.
    Result(Box<Kind>, Box<Kind>),
    Dictionary(Box<Kind>, Box<Kind>),
    Tuple(Vec<Field<Kind>>),
    /// Payload kind per tag.
    Varying(BTreeMap<u8, Kind>),
}

impl Kind {
    pub fn sequence(element: Kind) -> Self {
        Kind::Sequence(Box::new(element))
    }

    pub fn array(element: Kind, len: usize) -> Self {
        Kind::Array(Box::new(element), len)
    }

    pub fn option(inner: Kind) -> Self {
        Kind::Option(Box::new(inner))
    }

    pub fn result(ok: Kind, err: Kind) -> Self {
        Kind::Result(Box::new(ok), Box::new(err))
    }

    pub fn dictionary(key: Kind, value: Kind) -> Self {
        Kind::Dictionary(Box::new(key), Box::new(value))
    }

    /// Positional tuple.
    pub fn tuple(items: impl IntoIterator<Item = Kind>) -> Self {
        Kind::Tuple(items.into_iter().map(Field::positional).collect())
    }

    /// Varying-data schema. A tag listed twice is a configuration error.
    pub fn varying(schema: impl IntoIterator<Item = (u8, Kind)>) -> Result<Self, KindError> {
        let mut map = BTreeMap::new();
        for (tag, kind) in schema {
            if map.insert(tag, kind).is_some() {
                return Err(configuration(KindError::DuplicateVariant(tag)));
            }
        }
        Ok(Kind::Varying(map))
    }

    /// Derive the kind of a value used as a witness.
    ///
    /// Fails when the value doesn't pin its shape down: an empty sequence,
    /// array or dictionary, an absent option, a result (only one arm is
    /// visible), or a sequence whose elements disagree.
    pub fn of(witness: &Value) -> Result<Self, KindError> {
        kind_of(witness).map_err(configuration)
    }

    /// True for kinds with a fixed encoded width.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            Kind::Bool | Kind::U8 | Kind::I8 => Some(1),
            Kind::U16 | Kind::I16 => Some(2),
            Kind::U32 | Kind::I32 => Some(4),
            Kind::U64 | Kind::I64 => Some(8),
            Kind::U128 | Kind::I128 => Some(16),
            Kind::Unit => Some(0),
            Kind::Array(element, len) => element.fixed_width().and_then(|w| w.checked_mul(*len)),
            Kind::Tuple(fields) => fields
                .iter()
                .try_fold(0usize, |acc, f| acc.checked_add(f.item.fixed_width()?)),
            _ => None,
        }
    }
}

/// Log a configuration error once, where it's raised.
pub(crate) fn configuration(err: KindError) -> KindError {
    warn!(error_class = "configuration", error = %err, "kind rejected");
    err
}

fn uniform<'a>(
    items: impl IntoIterator<Item = &'a Value>,
    empty: &'static str,
) -> Result<Kind, KindError> {
    let mut items = items.into_iter();
    let first = items.next().ok_or(KindError::AmbiguousWitness(empty))?;
    let kind = kind_of(first)?;
    for item in items {
        if kind_of(item)? != kind {
            return Err(KindError::AmbiguousWitness("elements of mixed kinds"));
        }
    }
    Ok(kind)
}

fn kind_of(value: &Value) -> Result<Kind, KindError> {
    Ok(match value {
        Value::Bool(_) => Kind::Bool,
        Value::U8(_) => Kind::U8,
        Value::U16(_) => Kind::U16,
        Value::U32(_) => Kind::U32,
        Value::U64(_) => Kind::U64,
        Value::U128(_) => Kind::U128,
        Value::I8(_) => Kind::I8,
        Value::I16(_) => Kind::I16,
        Value::I32(_) => Kind::I32,
        Value::I64(_) => Kind::I64,
        Value::I128(_) => Kind::I128,
        Value::Compact(_) => Kind::Compact,
        Value::Bytes(_) => Kind::Bytes,
        Value::Str(_) => Kind::Str,
        Value::Unit => Kind::Unit,
        Value::Sequence(items) => Kind::sequence(uniform(items, "empty sequence")?),
        Value::Array(items) => Kind::array(uniform(items, "empty array")?, items.len()),
        Value::Option(Some(inner)) => Kind::option(kind_of(inner)?),
        Value::Option(None) => return Err(KindError::AmbiguousWitness("absent option")),
        Value::Result(_) => {
            return Err(KindError::AmbiguousWitness(
                "result witness shows only one arm",
            ))
        }
        Value::Dictionary(map) => Kind::dictionary(
            uniform(map.keys(), "empty dictionary")?,
            uniform(map.values(), "empty dictionary")?,
        ),
        Value::Tuple(fields) => Kind::Tuple(
            fields
                .iter()
                .map(|f| {
                    Ok(Field {
                        name: f.name.clone(),
                        item: kind_of(&f.item)?,
                    })
                })
                .collect::<Result<_, KindError>>()?,
        ),
        Value::Varying(data) => Kind::Varying(
            data.iter()
                .map(|(&tag, payload)| Ok((tag, kind_of(payload)?)))
                .collect::<Result<_, KindError>>()?,
        ),
    })
}

// ============================================================================
// DISPLAY (the descriptor language, see `parse`)
// ============================================================================

fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: impl IntoIterator<Item = T>,
    mut each: impl FnMut(&mut fmt::Formatter<'_>, T) -> fmt::Result,
) -> fmt::Result {
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        each(f, item)?;
    }
    Ok(())
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Bool => f.write_str("bool"),
            Kind::U8 => f.write_str("u8"),
            Kind::U16 => f.write_str("u16"),
            Kind::U32 => f.write_str("u32"),
            Kind::U64 => f.write_str("u64"),
            Kind::U128 => f.write_str("u128"),
            Kind::I8 => f.write_str("i8"),
            Kind::I16 => f.write_str("i16"),
            Kind::I32 => f.write_str("i32"),
            Kind::I64 => f.write_str("i64"),
            Kind::I128 => f.write_str("i128"),
            Kind::Compact => f.write_str("Compact"),
            Kind::Bytes => f.write_str("Bytes"),
            Kind::Str => f.write_str("Str"),
            Kind::Unit => f.write_str("()"),
            Kind::Sequence(element) => write!(f, "Vec<{element}>"),
            Kind::Array(element, len) => write!(f, "[{element}; {len}]"),
            Kind::Option(inner) => write!(f, "Option<{inner}>"),
            Kind::Result(ok, err) => write!(f, "Result<{ok}, {err}>"),
            Kind::Dictionary(key, value) => write!(f, "Map<{key}, {value}>"),
            Kind::Tuple(fields) if !fields.is_empty() && fields.iter().all(|x| x.name.is_some()) => {
                f.write_str("{")?;
                write_list(f, fields, |f, field| {
                    write!(f, "{}: {}", field.name.as_deref().unwrap_or_default(), field.item)
                })?;
                f.write_str("}")
            }
            Kind::Tuple(fields) => {
                f.write_str("(")?;
                write_list(f, fields, |f, field| write!(f, "{}", field.item))?;
                if fields.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Kind::Varying(schema) => {
                f.write_str("Enum{")?;
                write_list(f, schema, |f, (tag, kind)| write!(f, "{tag}: {kind}"))?;
                f.write_str("}")
            }
        }
    }
}
