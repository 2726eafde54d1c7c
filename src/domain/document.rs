// SPDX-License-Identifier: MIT OR Apache-2.0

//! The parsed key/value document and its queries.
//!
//! A [`Document`] is built from raw entries in file order. Repeated keys are
//! renamed into a numbered duplicate group (`key1`, `key2`, ...) as they are
//! inserted, so every key in the map is unique.

use crate::domain::data_type::BestValue;
use crate::domain::format::FormatOptions;
use crate::domain::raw_entry::RawEntry;
use crate::domain::typed_value::TypedValue;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Separator for the key lists taken by [`Document::missing`],
/// [`Document::present`] and [`Document::unknown`].
pub const KEY_LIST_DELIMITER: char = ',';

/// Suffix marking a prefix wildcard in an allow-list.
pub const WILDCARD: char = '*';

/// A mapping from key to typed value.
///
/// Iteration is in key order, which keeps query results and validation
/// messages deterministic.
///
/// # Examples
///
/// ```
/// use keyval::domain::{DataType, Document, FormatOptions, RawEntry};
///
/// let entries = vec![
///     RawEntry::new("a", "1"),
///     RawEntry::new("a", "2"),
///     RawEntry::new("b", "hello"),
/// ];
/// let doc = Document::from_entries(entries, &FormatOptions::default());
///
/// assert!(doc.get("a").is_none());
/// assert_eq!(doc.get_multiple("a").len(), 2);
/// assert_eq!(doc.get_best("b").data_type(), DataType::String);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    values: BTreeMap<String, TypedValue>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a document from entries in file order, inferring each value's
    /// types and renaming duplicate keys.
    ///
    /// Whitespace inside keys is removed, matching how query key lists are
    /// read, so `"my key"` is stored as `mykey`.
    pub fn from_entries<I, E>(entries: I, options: &FormatOptions) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<RawEntry>,
    {
        let mut doc = Self::new();
        for entry in entries {
            let entry = entry.into();
            let value = TypedValue::populate(&entry.value, options);
            doc.insert_resolving_duplicates(&normalize_key(&entry.key), value);
        }
        doc
    }

    /// Inserts `value` under `base`, or under the next free `baseN` when
    /// `base` has been seen before.
    ///
    /// On the second occurrence the first one is moved from `base` to `base1`.
    /// If a literal `base1` key already exists it is overwritten by that move.
    fn insert_resolving_duplicates(&mut self, base: &str, value: TypedValue) {
        let mut key = base.to_string();
        let mut candidate = if self.values.contains_key(base) {
            base.to_string()
        } else {
            numbered(base, 1)
        };

        let mut index = 1;
        while self.values.contains_key(&candidate) {
            index += 1;
            candidate = numbered(base, index);
            key = candidate.clone();
        }

        if index == 2 {
            if let Some(first) = self.values.remove(base) {
                let renamed = numbered(base, 1);
                if self.values.contains_key(&renamed) {
                    tracing::warn!(
                        "Duplicate key '{}' renamed to '{}', replacing an existing '{}' entry",
                        base,
                        renamed,
                        renamed
                    );
                }
                tracing::debug!("Renaming duplicate key '{}' to '{}'", base, renamed);
                self.values.insert(renamed, first);
            }
        }

        self.values.insert(key, value);
    }

    /// Returns the value for `key`.
    pub fn get(&self, key: &str) -> Option<&TypedValue> {
        self.values.get(key)
    }

    /// Returns the best-typed projection for `key`, or `BestValue::Invalid`
    /// if the key is absent.
    pub fn get_best(&self, key: &str) -> BestValue<'_> {
        self.get(key)
            .map(TypedValue::best)
            .unwrap_or(BestValue::Invalid)
    }

    /// Returns the duplicate group `root1`, `root2`, ... in order.
    ///
    /// If `root1` is absent this falls back to `[root]` when the bare key
    /// exists, and to an empty list otherwise.
    pub fn get_multiple(&self, root: &str) -> Vec<&TypedValue> {
        let Some(first) = self.get(&numbered(root, 1)) else {
            return self.get(root).into_iter().collect();
        };

        let mut group = vec![first];
        let mut index = 2;
        while let Some(value) = self.get(&numbered(root, index)) {
            group.push(value);
            index += 1;
        }
        group
    }

    /// Returns the needles that are not in the document.
    ///
    /// `needles` is a comma-separated key list. A needle counts as present
    /// when it is a key or the root of a duplicate group.
    pub fn missing(&self, needles: &str) -> Vec<String> {
        split_keys(needles)
            .filter(|needle| self.get(needle).is_none() && self.get_multiple(needle).is_empty())
            .collect()
    }

    /// Returns the needles that are keys in the document.
    ///
    /// Unlike [`missing`](Self::missing) this is a direct lookup only, so the
    /// root of a duplicate group is not reported as present.
    pub fn present(&self, needles: &str) -> Vec<String> {
        split_keys(needles)
            .filter(|needle| self.get(needle).is_some())
            .collect()
    }

    /// Returns the document keys not covered by `universe`, in key order.
    ///
    /// `universe` is a comma-separated allow-list; an entry ending in `*`
    /// matches every key starting with the text before it. An empty universe
    /// reports nothing.
    pub fn unknown(&self, universe: &str) -> Vec<String> {
        let allowed: Vec<String> = split_keys(universe).collect();
        if allowed.is_empty() {
            return Vec::new();
        }

        self.values
            .keys()
            .filter(|key| !allowed.iter().any(|entry| matches_entry(entry, key)))
            .cloned()
            .collect()
    }

    /// Returns true if `key` is in the document.
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Inserts a value under `key` with whitespace removed, replacing any
    /// previous value. No duplicate renaming takes place.
    pub fn insert(&mut self, key: impl AsRef<str>, value: TypedValue) -> Option<TypedValue> {
        self.values.insert(normalize_key(key.as_ref()), value)
    }

    /// Removes and returns the value for `key`.
    pub fn remove(&mut self, key: &str) -> Option<TypedValue> {
        self.values.remove(key)
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the document has no keys.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Iterates over key/value pairs in key order.
    pub fn iter(&self) -> btree_map::Iter<'_, String, TypedValue> {
        self.values.iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a TypedValue);
    type IntoIter = btree_map::Iter<'a, String, TypedValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

fn numbered(root: &str, index: usize) -> String {
    format!("{}{}", root, index)
}

/// Removes all whitespace from a key.
pub(crate) fn normalize_key(key: &str) -> String {
    key.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Splits a comma-separated key list, dropping whitespace and empty entries.
fn split_keys(list: &str) -> impl Iterator<Item = String> + '_ {
    list.split(KEY_LIST_DELIMITER)
        .map(normalize_key)
        .filter(|key| !key.is_empty())
}

fn matches_entry(entry: &str, key: &str) -> bool {
    match entry.strip_suffix(WILDCARD) {
        Some(prefix) => key.starts_with(prefix),
        None => entry == key,
    }
}
