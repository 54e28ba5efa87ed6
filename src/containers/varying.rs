// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Varying data: a set of up to 256 tagged payloads.
//!
//! Wire form is `(tag, payload)` pairs in ascending tag order with no count
//! prefix, so a decoder keeps reading until the input runs out. That makes it
//! a terminal shape: it has to be the last thing in the buffer.

use std::collections::btree_map;
use std::collections::BTreeMap;

use tracing::debug;

use crate::codec::{Decode, Encode};
use crate::dispatch::Value;
use crate::error::{Error, Result};
use crate::io::{Output, Reader};

/// Tagged payloads keyed by their one-byte discriminant.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VaryingData<V = Value> {
    entries: BTreeMap<u8, V>,
}

impl<V> Default for VaryingData<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> VaryingData<V> {
    pub fn new() -> Self {
        VaryingData {
            entries: BTreeMap::new(),
        }
    }

    /// Set the payload for `tag`, returning the one it replaces.
    pub fn insert(&mut self, tag: u8, payload: V) -> Option<V> {
        self.entries.insert(tag, payload)
    }

    pub fn get(&self, tag: u8) -> Option<&V> {
        self.entries.get(&tag)
    }

    pub fn remove(&mut self, tag: u8) -> Option<V> {
        self.entries.remove(&tag)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending tag order.
    pub fn iter(&self) -> btree_map::Iter<'_, u8, V> {
        self.entries.iter()
    }

    pub fn into_inner(self) -> BTreeMap<u8, V> {
        self.entries
    }
}

impl<V> From<BTreeMap<u8, V>> for VaryingData<V> {
    fn from(entries: BTreeMap<u8, V>) -> Self {
        VaryingData { entries }
    }
}

impl<V> FromIterator<(u8, V)> for VaryingData<V> {
    fn from_iter<I: IntoIterator<Item = (u8, V)>>(iter: I) -> Self {
        VaryingData {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<'a, V> IntoIterator for &'a VaryingData<V> {
    type Item = (&'a u8, &'a V);
    type IntoIter = btree_map::Iter<'a, u8, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<V: Encode> Encode for VaryingData<V> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        for (&tag, payload) in &self.entries {
            dest.push_byte(tag);
            payload.encode_to(dest);
        }
    }

    fn encoded_size(&self) -> usize {
        self.entries.values().map(|p| 1 + p.encoded_size()).sum()
    }
}

/// Read `(tag, payload)` pairs until the input is exhausted.
///
/// `payload` decodes the body for a tag (and rejects tags it doesn't know).
/// Repeated tags are always an error; out-of-order tags only under the
/// canonical policy.
pub(crate) fn decode_entries<V>(
    input: &mut Reader<'_>,
    mut payload: impl FnMut(u8, &mut Reader<'_>) -> Result<V>,
) -> Result<VaryingData<V>> {
    input.descend(|input| {
        let mut entries = BTreeMap::new();
        let mut previous: Option<u8> = None;
        while !input.is_empty() {
            let offset = input.position();
            let tag = input.read_byte()?;
            if entries.contains_key(&tag) {
                return Err(Error::DuplicateVariant { tag });
            }
            if let Some(prev) = previous.filter(|&prev| tag < prev) {
                if input.options().is_canonical() {
                    return Err(Error::NonCanonical {
                        offset,
                        detail: format!("varying-data tag {tag} after {prev}"),
                    });
                }
                debug!(offset, tag, prev, "accepted out-of-order varying-data tag");
            }
            let value = payload(tag, input)?;
            entries.insert(tag, value);
            previous = Some(tag);
        }
        Ok(VaryingData { entries })
    })
}

impl<V: Decode> Decode for VaryingData<V> {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        decode_entries(input, |_, input| V::decode(input))
    }
}
