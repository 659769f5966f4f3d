//! Ordered map type for object values.
//!
//! [`ObjectMap`] wraps an [`IndexMap`] and iterates in JavaScript's own-property
//! enumeration order: keys that are canonical array indices (`"0"`, `"5"`,
//! `"4294967294"`) come first in ascending numeric order, followed by every other key
//! in insertion order.
//!
//! ## Examples
//!
//! ```rust
//! use serde_jslit::{ObjectMap, Value};
//!
//! let mut map = ObjectMap::new();
//! map.insert("one", Value::from(1));
//! map.insert("10", Value::from(10));
//! map.insert("two", Value::from(2));
//! map.insert("5", Value::from(5));
//!
//! let keys: Vec<_> = map.keys().collect();
//! assert_eq!(keys, vec!["5", "10", "one", "two"]);
//! ```

use crate::syntax;
use crate::Value;
use indexmap::IndexMap;

/// An ordered map of string keys to values.
///
/// Insertion order is retained; iteration applies the array-index-first rule on top of it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectMap(IndexMap<String, Value>);

impl ObjectMap {
    /// Creates an empty `ObjectMap`.
    #[must_use]
    pub fn new() -> Self {
        ObjectMap(IndexMap::new())
    }

    /// Creates an empty `ObjectMap` with the specified capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        ObjectMap(IndexMap::with_capacity(capacity))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// Replacing an existing key keeps its original position, as assignment to an existing
    /// property does.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_jslit::{ObjectMap, Value};
    ///
    /// let mut map = ObjectMap::new();
    /// assert!(map.insert("key", Value::from(42)).is_none());
    /// assert!(map.insert("key", Value::from(43)).is_some());
    /// ```
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// Returns a reference to the value corresponding to the key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Removes a key, preserving the relative order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.shift_remove(key)
    }

    /// Returns `true` if the map contains the key.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the keys in enumeration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(k, _)| k)
    }

    /// Returns the values in enumeration order.
    pub fn values(&self) -> impl Iterator<Item = &Value> + '_ {
        self.iter().map(|(_, v)| v)
    }

    /// Returns the entries in enumeration order: array-index keys ascending, then the
    /// rest in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> + '_ {
        let mut indexed: Vec<(u32, &str, &Value)> = self
            .0
            .iter()
            .filter_map(|(k, v)| syntax::array_index(k).map(|n| (n, k.as_str(), v)))
            .collect();
        indexed.sort_unstable_by_key(|(n, _, _)| *n);

        let named = self
            .0
            .iter()
            .filter(|(k, _)| syntax::array_index(k).is_none())
            .map(|(k, v)| (k.as_str(), v));

        indexed.into_iter().map(|(_, k, v)| (k, v)).chain(named)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for ObjectMap {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        ObjectMap(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enumeration_order() {
        let map: ObjectMap = [
            ("one", Value::from(true)),
            ("two", Value::from(false)),
            ("thr-ee", Value::Undefined),
            ("four", Value::from(1)),
            ("5", Value::from(3.1415)),
            ("six", Value::from(-17)),
            ("seven", Value::from("string")),
        ]
        .into_iter()
        .collect();

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(
            keys,
            vec!["5", "one", "two", "thr-ee", "four", "six", "seven"]
        );
    }

    #[test]
    fn test_index_keys_sort_numerically() {
        let mut map = ObjectMap::new();
        map.insert("10", 1);
        map.insert("b", 2);
        map.insert("2", 3);
        map.insert("01", 4);
        map.insert("0", 5);
        map.insert("-1", 6);

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["0", "2", "10", "b", "01", "-1"]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut map = ObjectMap::new();
        map.insert("a", 1);
        map.insert("b", 2);
        map.insert("c", 3);
        assert!(map.remove("b").is_some());
        assert!(!map.contains_key("b"));

        let keys: Vec<_> = map.keys().collect();
        assert_eq!(keys, vec!["a", "c"]);
        assert_eq!(map.len(), 2);
    }
}
