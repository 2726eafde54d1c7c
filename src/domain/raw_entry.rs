// SPDX-License-Identifier: MIT OR Apache-2.0

//! A key and its unparsed value, in file order.

/// One logical `key: value` entry as read from a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawEntry {
    /// The key with all spaces removed
    pub key: String,
    /// The value with leading spaces removed
    pub value: String,
}

impl RawEntry {
    /// Creates a new entry.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> From<(K, V)> for RawEntry {
    fn from((key, value): (K, V)) -> Self {
        RawEntry::new(key, value)
    }
}
