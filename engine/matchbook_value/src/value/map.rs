//! Insertion-ordered map with value keys.
//!
//! The matcher's greedy mapping-pattern pairing is order-sensitive: when
//! several entries could satisfy a wildcard key, the first one in
//! insertion order wins. A hash map would make that nondeterministic, so
//! map values keep their entries in a vector and scan on lookup. Maps in
//! this engine are small, short-lived pattern subjects, not bulk stores.

use super::Value;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

/// Map from `Value` keys to `Value` values, preserving insertion order.
#[derive(Clone, Debug, Default)]
pub struct OrderedMap {
    entries: Vec<(Value, Value)>,
}

impl OrderedMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from key/value pairs.
    ///
    /// A duplicate key replaces the earlier value but keeps the original
    /// position, mirroring ordered-dictionary insert semantics.
    pub fn from_entries(pairs: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut map = Self::new();
        for (key, value) in pairs {
            map.insert(key, value);
        }
        map
    }

    /// Insert a key/value pair.
    pub fn insert(&mut self, key: Value, value: Value) {
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| k.equals(&key)) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    /// Look up a value by key.
    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(k, _)| k.equals(key))
            .map(|(_, v)| v)
    }

    /// Whether the map holds the key.
    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    /// Entries in insertion order.
    ///
    /// The iterator is `Clone` so a caller can rescan the entries during
    /// greedy pattern pairing without collecting them first.
    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> + Clone {
        self.entries.iter()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(k, _)| k)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Value, Value)> for OrderedMap {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        Self::from_entries(iter)
    }
}

impl PartialEq for OrderedMap {
    /// Order-insensitive equality: same keys, equal values.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(k, v)| other.get(k).is_some_and(|ov| v == ov))
    }
}

impl Eq for OrderedMap {}

impl Hash for OrderedMap {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Order-insensitive: combine per-entry hashes with XOR so that
        // maps equal under `PartialEq` hash identically regardless of
        // insertion order.
        self.len().hash(state);
        let mut acc: u64 = 0;
        for (k, v) in &self.entries {
            let mut entry_hasher = FxHasher::default();
            k.hash(&mut entry_hasher);
            v.hash(&mut entry_hasher);
            acc ^= entry_hasher.finish();
        }
        acc.hash(state);
    }
}
