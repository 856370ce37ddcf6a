//! Insertion-ordered string map used for grouping.
//!
//! Lookups go through a `HashMap`; iteration follows the order in which
//! keys were first inserted. Overwriting a key keeps its original position.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

/// A map from group key to value that remembers first-seen key order
#[derive(Debug, Clone)]
pub struct NavigationMap<V> {
    map: HashMap<String, V>,
    keys: Vec<String>,
}

impl<V> Default for NavigationMap<V> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
            keys: Vec::new(),
        }
    }
}

impl<V> NavigationMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key`. New keys are appended to the order.
    pub fn set(&mut self, key: impl Into<String>, value: V) {
        let key = key.into();
        if self.map.insert(key.clone(), value).is_none() {
            self.keys.push(key);
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.map.get(key)
    }

    /// Mutable access to `key`, inserting `init()` first if absent
    pub fn get_or_insert_with(&mut self, key: &str, init: impl FnOnce() -> V) -> &mut V {
        match self.map.entry(key.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.keys.push(key.to_string());
                entry.insert(init())
            }
        }
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Keys in first-seen order
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// `(key, value)` pairs in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.keys
            .iter()
            .filter_map(move |k| self.map.get(k).map(|v| (k.as_str(), v)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_keeps_first_seen_order() {
        let mut nav = NavigationMap::new();
        nav.set("x", 1);
        nav.set("a", 2);
        nav.set("x", 3);

        assert_eq!(nav.keys(), &["x".to_string(), "a".to_string()]);
        assert_eq!(nav.get("x"), Some(&3));
        assert_eq!(nav.len(), 2);
    }

    #[test]
    fn test_get_or_insert_with_accumulates() {
        let mut nav: NavigationMap<i64> = NavigationMap::new();
        for key in ["b", "a", "b", "b"] {
            *nav.get_or_insert_with(key, || 0) += 1;
        }

        let pairs: Vec<(&str, i64)> = nav.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(pairs, vec![("b", 3), ("a", 1)]);
    }

    #[test]
    fn test_empty_map() {
        let nav: NavigationMap<u8> = NavigationMap::new();
        assert!(nav.is_empty());
        assert!(!nav.contains_key("anything"));
        assert_eq!(nav.iter().count(), 0);
    }
}
