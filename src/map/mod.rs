//! Maps keyed by deep equality rather than identity.

use std::fmt;
use std::mem;

use anyhow::Result;

use crate::hash::{Deep, Equivalence};
use crate::table::{self, BucketEntry, Table};
use crate::value::{json_pairs, Value};


/// An associative container that accepts any value as a key, composite
/// values included, and matches keys by the configured equality predicate
/// instead of identity.
///
/// The default [`Deep`] equivalence pairs the structural hash with the key
/// type's own deep `PartialEq`. A key must not be mutated in a way that
/// changes its structure once stored (through interior mutability, for
/// instance): the table does not defend against this, and a mutated key
/// silently becomes unfindable under its new hash.
pub struct ValueMap<K, V, S = Deep> {
    table: Table<Pair<K, V>, S>,
}

#[derive(Clone, Debug)]
struct Pair<K, V>(K, V);

impl<K, V> BucketEntry for Pair<K, V> {
    type Key = K;
    type Displaced = V;

    fn key(&self) -> &K {
        &self.0
    }

    fn absorb(&mut self, incoming: Pair<K, V>) -> V {
        // The stored key instance stays put; only the value is replaced.
        mem::replace(&mut self.1, incoming.1)
    }
}

impl<K, V> ValueMap<K, V> {
    /// Creates an empty map with the default structural hash / deep
    /// equality pair.
    pub fn new() -> ValueMap<K, V> {
        ValueMap::with_equivalence(Deep)
    }
}

impl<K, V, S> ValueMap<K, V, S> {
    /// Creates an empty map that hashes and compares keys with `equiv`.
    pub fn with_equivalence(equiv: S) -> ValueMap<K, V, S> {
        ValueMap {
            table: Table::new(equiv),
        }
    }

    /// The number of entries currently in the map.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether or not the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Iterates over `(key, value)` entries. Each call starts a fresh
    /// traversal; entries come out in bucket-enumeration order, which is not
    /// insertion order and is not otherwise specified.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter(self.table.iter())
    }

    /// Iterates over the keys. No ordering guarantee; see [`ValueMap::iter`].
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys(self.table.iter())
    }

    /// Iterates over the values. No ordering guarantee; see
    /// [`ValueMap::iter`].
    pub fn values(&self) -> Values<'_, K, V> {
        Values(self.table.iter())
    }

    /// Apply `f` to every entry. The order in which `f` is applied is
    /// unspecified.
    pub fn for_each(&self, mut f: impl FnMut(&K, &V)) {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }
}

impl<K, V, S: Equivalence<K>> ValueMap<K, V, S> {
    /// Inserts `key → value`, returning the previous value if a key equal
    /// to `key` was already present. On replacement the originally stored
    /// key instance is retained and `len` does not change.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.table.insert(Pair(key, value))
    }

    /// Looks up the value stored under a key equal to `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.table.get(key).map(|pair| &pair.1)
    }

    /// Like [`ValueMap::get`], but the value can be mutated in place.
    /// Values take no part in hashing, so this cannot move the entry.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.table.get_mut(key).map(|pair| &mut pair.1)
    }

    /// Whether or not a key equal to `key` is in the map.
    pub fn contains_key(&self, key: &K) -> bool {
        self.table.contains(key)
    }

    /// Removes the entry for a key equal to `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.table.remove(key).map(|pair| pair.1)
    }
}

impl ValueMap<Value, Value> {
    /// Builds a map from a JSON array of `[key, value]` pairs, later pairs
    /// overwriting earlier ones with equal keys. Any element that is not a
    /// 2-element array fails the whole construction, before any pair is
    /// inserted.
    pub fn from_json_pairs(json: serde_json::Value) -> Result<ValueMap<Value, Value>> {
        Ok(json_pairs(json)?.into_iter().collect())
    }
}

impl<K, V, S: Default> Default for ValueMap<K, V, S> {
    fn default() -> ValueMap<K, V, S> {
        ValueMap::with_equivalence(S::default())
    }
}

impl<K, V, S> Clone for ValueMap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> ValueMap<K, V, S> {
        ValueMap {
            table: self.table.clone(),
        }
    }
}

impl<K, V, S: Equivalence<K>> Extend<(K, V)> for ValueMap<K, V, S> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, pairs: I) {
        for (key, value) in pairs {
            self.insert(key, value);
        }
    }
}

impl<K, V, S: Default + Equivalence<K>> FromIterator<(K, V)> for ValueMap<K, V, S> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(pairs: I) -> ValueMap<K, V, S> {
        let mut map = ValueMap::default();
        map.extend(pairs);
        map
    }
}

impl<'a, K, V, S> IntoIterator for &'a ValueMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<K, V: PartialEq, S: Equivalence<K>> PartialEq for ValueMap<K, V, S> {
    fn eq(&self, other: &ValueMap<K, V, S>) -> bool {
        self.len() == other.len()
            && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V: Eq, S: Equivalence<K>> Eq for ValueMap<K, V, S> {}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for ValueMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

pub struct Iter<'a, K, V>(table::Iter<'a, Pair<K, V>>);

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<(&'a K, &'a V)> {
        self.0.next().map(|pair| (&pair.0, &pair.1))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

pub struct Keys<'a, K, V>(table::Iter<'a, Pair<K, V>>);

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.0.next().map(|pair| &pair.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {}

pub struct Values<'a, K, V>(table::Iter<'a, Pair<K, V>>);

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.0.next().map(|pair| &pair.1)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {}
