// Copyright 2026 the Composure Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Name-keyed configuration maps.
//!
//! This module provides [`Config`], the shallow key/value map used for
//! decorator defaults and for the configuration argument passed to the
//! constructor chain. Merging is key-by-key with the later contributor
//! winning, never deep.

use alloc::string::String;
use alloc::vec::Vec;
use hashbrown::HashMap;

use crate::value::Value;

/// A shallow map of named [`Value`]s.
///
/// Used both for the defaults contributed by decorators and for the
/// configuration object observed by initializers at construction time.
///
/// # Example
///
/// ```rust
/// use composure::Config;
///
/// let base = Config::new().set("genre", "reggae").set("artist", "midnite");
/// let update = Config::new().set("artist", "lutan fyah");
///
/// let mut merged = base.clone();
/// merged.merge_from(&update);
///
/// assert_eq!(merged.get_as::<&str>("genre"), Some(&"reggae"));
/// assert_eq!(merged.get_as::<&str>("artist"), Some(&"lutan fyah"));
/// ```
#[derive(Clone, Default)]
pub struct Config {
    entries: HashMap<String, Value>,
}

impl Config {
    /// Creates a new empty configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a named value, consuming and returning the configuration.
    ///
    /// An existing value under the same name is replaced.
    #[must_use]
    pub fn set<T: Clone + 'static>(mut self, name: impl Into<String>, value: T) -> Self {
        self.entries.insert(name.into(), Value::new(value));
        self
    }

    /// Inserts a named erased value in place.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.entries.insert(name.into(), value);
    }

    /// Removes a named value.
    ///
    /// Returns the removed value, if any.
    pub fn remove(&mut self, name: &str) -> Option<Value> {
        self.entries.remove(name)
    }

    /// Gets the erased value stored under `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.get(name)
    }

    /// Gets the value stored under `name`, downcast to `T`.
    ///
    /// Returns `None` if the name is absent or the stored type differs.
    #[must_use]
    pub fn get_as<T: Clone + 'static>(&self, name: &str) -> Option<&T> {
        self.entries.get(name).and_then(Value::downcast_ref)
    }

    /// Returns `true` if a value is stored under `name`.
    #[must_use]
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Returns `true` if no values are stored.
    #[must_use]
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of stored values.
    #[must_use]
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Merges `other` into this configuration, key by key.
    ///
    /// Values from `other` replace same-named values already present.
    pub fn merge_from(&mut self, other: &Self) {
        for (name, value) in &other.entries {
            self.entries.insert(name.clone(), value.clone());
        }
    }

    /// Returns an iterator over the stored names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

impl core::fmt::Debug for Config {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Config")
            .field("count", &self.entries.len())
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;

    #[test]
    fn config_empty() {
        let config = Config::new();
        assert!(config.is_empty());
        assert_eq!(config.len(), 0);
        assert!(config.get("missing").is_none());
    }

    #[test]
    fn config_set_get() {
        let config = Config::new().set("a", 1_i32).set("b", 2.0_f64);

        assert_eq!(config.len(), 2);
        assert_eq!(config.get_as::<i32>("a"), Some(&1));
        assert_eq!(config.get_as::<f64>("b"), Some(&2.0));
        assert!(config.contains("a"));
        assert!(!config.contains("c"));
    }

    #[test]
    fn config_set_replaces() {
        let config = Config::new().set("a", 1_i32).set("a", 2_i32);
        assert_eq!(config.len(), 1);
        assert_eq!(config.get_as::<i32>("a"), Some(&2));
    }

    #[test]
    fn config_wrong_type_returns_none() {
        let config = Config::new().set("a", 1_i32);
        assert_eq!(config.get_as::<f64>("a"), None);
    }

    #[test]
    fn config_merge_later_wins() {
        let mut merged = Config::new().set("a", 1_i32).set("b", 2_i32);
        merged.merge_from(&Config::new().set("b", 3_i32).set("c", 4_i32));

        assert_eq!(merged.get_as::<i32>("a"), Some(&1));
        assert_eq!(merged.get_as::<i32>("b"), Some(&3));
        assert_eq!(merged.get_as::<i32>("c"), Some(&4));
    }

    #[test]
    fn config_merge_is_shallow() {
        let nested = Config::new().set("inner", 1_i32);
        let mut merged = Config::new().set("nested", nested);
        merged.merge_from(&Config::new().set("nested", Config::new().set("other", 2_i32)));

        // The whole nested map is replaced, not merged recursively.
        let replaced = merged.get_as::<Config>("nested").unwrap();
        assert!(replaced.contains("other"));
        assert!(!replaced.contains("inner"));
    }

    #[test]
    fn config_remove() {
        let mut config = Config::new().set("a", 1_i32);
        assert!(config.remove("a").is_some());
        assert!(config.remove("a").is_none());
        assert!(config.is_empty());
    }

    #[test]
    fn config_debug() {
        let config = Config::new().set("a", 1_i32);
        let debug = format!("{:?}", config);
        assert!(debug.contains("Config"));
        assert!(debug.contains("a"));
    }
}
