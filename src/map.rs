//! Insertion-ordered map used for dictionaries and parameters.
//!
//! This module provides [`OrderedMap`], a wrapper around [`IndexMap`] that keeps
//! entries in the order they were first stored. Field values are ordered: a
//! dictionary or parameter list serializes its members in that order, so the
//! container must never reorder them.
//!
//! ## Semantics
//!
//! - **Unique keys**: storing an existing key replaces its value in place,
//!   without moving it
//! - **Gap-free deletion**: deleting a key shifts later entries left, keeping
//!   the relative order of everything else
//! - **Deterministic iteration**: always in insertion order
//!
//! ## Examples
//!
//! ```rust
//! use structured_fields::{BareItem, Parameters};
//!
//! let mut params = Parameters::new();
//! params.store("q", Some(BareItem::Decimal(0.5)));
//! params.store("secure", None);
//!
//! assert_eq!(params.len(), 2);
//! assert_eq!(params.load("q"), Some(&Some(BareItem::Decimal(0.5))));
//! ```

use indexmap::IndexMap;

/// An ordered map of string keys to values.
///
/// Keys are not validated on store; invalid keys are reported when the
/// containing value is serialized.
///
/// # Examples
///
/// ```rust
/// use structured_fields::OrderedMap;
///
/// let mut map = OrderedMap::new();
/// map.store("first", 1);
/// map.store("second", 2);
/// map.store("first", 3);
///
/// let keys: Vec<_> = map.keys().cloned().collect();
/// assert_eq!(keys, vec!["first", "second"]);
/// assert_eq!(map.load("first"), Some(&3));
/// ```
#[derive(Debug, Clone)]
pub struct OrderedMap<V>(IndexMap<String, V>);

impl<V> OrderedMap<V> {
    /// Creates an empty `OrderedMap`.
    #[must_use]
    pub fn new() -> Self {
        OrderedMap(IndexMap::new())
    }

    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        OrderedMap(IndexMap::with_capacity(capacity))
    }

    /// Stores a value under `key`.
    ///
    /// A new key is appended at the end. An existing key keeps its position
    /// and its previous value is returned.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structured_fields::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// assert!(map.store("key", 42).is_none());
    /// assert_eq!(map.store("key", 43), Some(42));
    /// ```
    pub fn store(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        self.0.insert(key.into(), value)
    }

    /// Returns a reference to the value stored under `key`, if any.
    #[must_use]
    pub fn load(&self, key: &str) -> Option<&V> {
        self.0.get(key)
    }

    pub fn load_mut(&mut self, key: &str) -> Option<&mut V> {
        self.0.get_mut(key)
    }

    /// Removes `key` and returns its value, shifting later entries left.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structured_fields::OrderedMap;
    ///
    /// let mut map: OrderedMap<i32> = [("a", 1), ("b", 2), ("c", 3)]
    ///     .into_iter()
    ///     .map(|(k, v)| (k.to_string(), v))
    ///     .collect();
    /// assert_eq!(map.delete("b"), Some(2));
    ///
    /// let keys: Vec<_> = map.keys().cloned().collect();
    /// assert_eq!(keys, vec!["a", "c"]);
    /// ```
    pub fn delete(&mut self, key: &str) -> Option<V> {
        self.0.shift_remove(key)
    }

    /// Calls `visit` for each entry in insertion order until it returns `false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use structured_fields::OrderedMap;
    ///
    /// let mut map = OrderedMap::new();
    /// map.store("a", 1);
    /// map.store("b", 2);
    /// map.store("c", 3);
    ///
    /// let mut seen = Vec::new();
    /// map.range(|key, _| {
    ///     seen.push(key.to_string());
    ///     key != "b"
    /// });
    /// assert_eq!(seen, vec!["a", "b"]);
    /// ```
    pub fn range<F>(&self, mut visit: F)
    where
        F: FnMut(&str, &V) -> bool,
    {
        for (key, value) in &self.0 {
            if !visit(key, value) {
                return;
            }
        }
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the keys, in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, V> {
        self.0.keys()
    }

    /// Returns an iterator over the values, in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, String, V> {
        self.0.values()
    }

    /// Returns an iterator over the key-value pairs, in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, String, V> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> indexmap::map::IterMut<'_, String, V> {
        self.0.iter_mut()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two maps are equal when they hold the same entries in the same order.
impl<V: PartialEq> PartialEq for OrderedMap<V> {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = indexmap::map::IntoIter<String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a OrderedMap<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = indexmap::map::Iter<'a, String, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl<V> FromIterator<(String, V)> for OrderedMap<V> {
    fn from_iter<T: IntoIterator<Item = (String, V)>>(iter: T) -> Self {
        OrderedMap(IndexMap::from_iter(iter))
    }
}

impl<V> Extend<(String, V)> for OrderedMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        self.0.extend(iter);
    }
}
