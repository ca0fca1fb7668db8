//! Ordered string-keyed map for dynamic values.
//!
//! [`Map`] wraps an [`IndexMap`] so entries iterate in insertion order while
//! the map is being built. HCL output never relies on that order though: the
//! encoder always goes through [`Map::sorted_entries`], which orders keys
//! lexicographically so the same map renders byte-identically on every run,
//! whatever its original iteration order was.
//!
//! ## Examples
//!
//! ```rust
//! use serde_hcl_encoder::{Map, Value};
//!
//! let mut map = Map::new();
//! map.insert("house".to_string(), Value::from("123 Numbers Lane"));
//! map.insert("barn".to_string(), Value::from("456 Digits Drive"));
//!
//! let keys: Vec<_> = map.sorted_entries().into_iter().map(|(k, _)| k.as_str()).collect();
//! assert_eq!(keys, vec!["barn", "house"]);
//! ```

use crate::Value;
use indexmap::IndexMap;
use std::collections::{BTreeMap, HashMap};

/// A map of string keys to dynamic values, kept in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Map(IndexMap<String, Value>);

impl Map {
    /// Creates an empty `Map`.
    #[must_use]
    pub fn new() -> Self {
        Map(IndexMap::new())
    }

    /// Creates an empty `Map` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Map(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair, returning the previous value for the key.
    pub fn insert(&mut self, key: String, value: Value) -> Option<Value> {
        self.0.insert(key, value)
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the entries, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.0.iter()
    }

    /// Returns the entries with keys sorted ascending.
    ///
    /// This is the only order the encoder uses.
    #[must_use]
    pub fn sorted_entries(&self) -> Vec<(&String, &Value)> {
        let mut entries: Vec<_> = self.0.iter().collect();
        entries.sort_by(|(k1, _), (k2, _)| k1.cmp(k2));
        entries
    }
}

impl From<HashMap<String, Value>> for Map {
    fn from(map: HashMap<String, Value>) -> Self {
        Map(map.into_iter().collect())
    }
}

impl From<BTreeMap<String, Value>> for Map {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Map(map.into_iter().collect())
    }
}

impl IntoIterator for Map {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl FromIterator<(String, Value)> for Map {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Map(IndexMap::from_iter(iter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorted_entries_ignore_insertion_order() {
        let forward: Map = [("a", 1), ("b", 2), ("c", 3)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::from(v)))
            .collect();
        let backward: Map = [("c", 3), ("b", 2), ("a", 1)]
            .into_iter()
            .map(|(k, v)| (k.to_string(), Value::from(v)))
            .collect();

        assert_eq!(forward.sorted_entries(), backward.sorted_entries());
    }

    #[test]
    fn test_sorting_is_bytewise() {
        let map: Map = ["b", "B", "a", "_"]
            .into_iter()
            .map(|k| (k.to_string(), Value::Null))
            .collect();
        let keys: Vec<_> = map.sorted_entries().into_iter().map(|(k, _)| k.clone()).collect();
        assert_eq!(keys, vec!["B", "_", "a", "b"]);
    }
}
