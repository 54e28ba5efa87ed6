// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Dictionaries: `Compact(len)` then `(key, value)` pairs in ascending key order.
//!
//! Decoding reads pairs in stream order and does not check that they're sorted.
//! A repeated key keeps the last value.

use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

use tracing::debug;

use crate::codec::{Decode, Encode};
use crate::compact::{decode_len, encode_len, len_prefix_size};
use crate::error::Result;
use crate::io::{Output, Reader};

fn encode_sorted<'a, K, V, O>(len: usize, pairs: impl Iterator<Item = (&'a K, &'a V)>, dest: &mut O)
where
    K: Encode + 'a,
    V: Encode + 'a,
    O: Output + ?Sized,
{
    encode_len(len, dest);
    for (key, value) in pairs {
        key.encode_to(dest);
        value.encode_to(dest);
    }
}

fn pairs_size<'a, K, V>(len: usize, pairs: impl Iterator<Item = (&'a K, &'a V)>) -> usize
where
    K: Encode + 'a,
    V: Encode + 'a,
{
    len_prefix_size(len)
        + pairs
            .map(|(key, value)| key.encoded_size() + value.encoded_size())
            .sum::<usize>()
}

/// Read `Compact(len)` pairs, handing each to `insert`. Returns the count read.
pub(crate) fn decode_pairs<K, V>(
    input: &mut Reader<'_>,
    mut insert: impl FnMut(K, V) -> Option<V>,
) -> Result<usize>
where
    K: Decode,
    V: Decode,
{
    let len = decode_len(input)?;
    input.descend(|input| {
        for _ in 0..len {
            let offset = input.position();
            let key = K::decode(input)?;
            let value = V::decode(input)?;
            input.note_element(offset)?;
            if insert(key, value).is_some() {
                debug!(offset, "dictionary key repeated, keeping the later value");
            }
        }
        Ok(len)
    })
}

impl<K: Encode + Ord, V: Encode> Encode for BTreeMap<K, V> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        encode_sorted(self.len(), self.iter(), dest);
    }

    fn encoded_size(&self) -> usize {
        pairs_size(self.len(), self.iter())
    }
}

impl<K: Decode + Ord, V: Decode> Decode for BTreeMap<K, V> {
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        let mut map = BTreeMap::new();
        decode_pairs(input, |k, v| map.insert(k, v))?;
        Ok(map)
    }
}

impl<K: Encode + Ord, V: Encode, S> Encode for HashMap<K, V, S> {
    fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
        let mut pairs: Vec<(&K, &V)> = self.iter().collect();
        pairs.sort_unstable_by(|a, b| a.0.cmp(b.0));
        encode_sorted(pairs.len(), pairs.into_iter(), dest);
    }

    fn encoded_size(&self) -> usize {
        pairs_size(self.len(), self.iter())
    }
}

impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Eq + Hash,
    V: Decode,
    S: BuildHasher + Default,
{
    fn decode(input: &mut Reader<'_>) -> Result<Self> {
        let mut map = HashMap::with_hasher(S::default());
        decode_pairs(input, |k, v| map.insert(k, v))?;
        Ok(map)
    }
}
