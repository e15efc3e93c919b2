/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::borrow::Cow;

use indexmap::IndexMap;

/// An insertion ordered map from string keys to one or more string values.
///
/// Used for request parameters, cookies and HTTP headers. Header maps fold
/// keys to ascii lowercase on insert and lookup, all other maps use exact
/// keys. Iteration yields keys in first-seen order and values per key in
/// insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueMap {
    inner: IndexMap<String, Vec<String>>,
    fold_keys: bool,
}

impl ValueMap {
    pub fn new() -> Self {
        ValueMap::default()
    }

    /// Create a map that treats keys case-insensitively, for HTTP headers.
    pub fn for_headers() -> Self {
        ValueMap {
            inner: IndexMap::new(),
            fold_keys: true,
        }
    }

    fn fold<'a>(&self, key: &'a str) -> Cow<'a, str> {
        if self.fold_keys && key.bytes().any(|b| b.is_ascii_uppercase()) {
            Cow::Owned(key.to_ascii_lowercase())
        } else {
            Cow::Borrowed(key)
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.inner.contains_key(self.fold(key).as_ref())
    }

    /// Get the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.inner
            .get(self.fold(key).as_ref())
            .and_then(|v| v.first())
            .map(String::as_str)
    }

    /// Get all values for `key` in insertion order, empty if not present.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.inner
            .get(self.fold(key).as_ref())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Append a value for `key`, keeping all previously stored values.
    pub fn add<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut key = key.into();
        if self.fold_keys {
            key.make_ascii_lowercase();
        }
        self.inner.entry(key).or_default().push(value.into());
    }

    /// Replace all values for `key` with the single `value`.
    ///
    /// An existing key keeps its position, a new key is appended.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut key = key.into();
        if self.fold_keys {
            key.make_ascii_lowercase();
        }
        let values = self.inner.entry(key).or_default();
        values.clear();
        values.push(value.into());
    }

    /// Remove `key` and all its values without reordering other keys.
    pub fn remove(&mut self, key: &str) {
        self.inner.shift_remove(self.fold(key).as_ref());
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.inner.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl<K, V> FromIterator<(K, V)> for ValueMap
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = ValueMap::new();
        for (k, v) in iter {
            map.add(k, v);
        }
        map
    }
}
