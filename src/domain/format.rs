// SPDX-License-Identifier: MIT OR Apache-2.0

//! Delimiters and markers that define the keyval file format.

use crate::domain::errors::{KeyValError, Result};
use serde::{Deserialize, Serialize};

/// Default separator between a key and its value.
pub const DEFAULT_KV_DELIMITER: &str = ":";
/// Default separator between list elements in a value.
pub const DEFAULT_LIST_DELIMITER: &str = ",";
/// Default comment marker, for both full-line and trailing comments.
pub const DEFAULT_COMMENT_MARKER: &str = "//";

/// The tokens used when reading a keyval file.
///
/// Options are passed explicitly to the loader and to type inference, so two
/// documents with different delimiters can be parsed side by side.
///
/// # Examples
///
/// ```
/// use keyval::domain::FormatOptions;
///
/// let options = FormatOptions::default().with_list_delimiter("|");
/// assert_eq!(options.kv_delimiter(), ":");
/// assert_eq!(options.list_delimiter(), "|");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatOptions {
    kv_delimiter: String,
    list_delimiter: String,
    comment_marker: String,
}

impl FormatOptions {
    /// Creates the default options (`:`, `,` and `//`).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the key/value delimiter.
    pub fn with_kv_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.kv_delimiter = delimiter.into();
        self
    }

    /// Sets the list element delimiter.
    pub fn with_list_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.list_delimiter = delimiter.into();
        self
    }

    /// Sets the comment marker.
    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = marker.into();
        self
    }

    /// Returns the key/value delimiter.
    pub fn kv_delimiter(&self) -> &str {
        &self.kv_delimiter
    }

    /// Returns the list element delimiter.
    pub fn list_delimiter(&self) -> &str {
        &self.list_delimiter
    }

    /// Returns the comment marker.
    pub fn comment_marker(&self) -> &str {
        &self.comment_marker
    }

    /// Checks that every token is non-empty and that the key/value delimiter
    /// cannot be confused with the comment marker.
    pub fn validate(&self) -> Result<()> {
        let tokens = [
            ("key/value delimiter", &self.kv_delimiter),
            ("list delimiter", &self.list_delimiter),
            ("comment marker", &self.comment_marker),
        ];
        for (name, token) in tokens {
            if token.is_empty() {
                return Err(KeyValError::InvalidOptions {
                    message: format!("{} must not be empty", name),
                });
            }
        }

        if self.comment_marker.contains(self.kv_delimiter.as_str()) {
            return Err(KeyValError::InvalidOptions {
                message: format!(
                    "comment marker '{}' contains the key/value delimiter '{}'",
                    self.comment_marker, self.kv_delimiter
                ),
            });
        }

        Ok(())
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            kv_delimiter: DEFAULT_KV_DELIMITER.to_string(),
            list_delimiter: DEFAULT_LIST_DELIMITER.to_string(),
            comment_marker: DEFAULT_COMMENT_MARKER.to_string(),
        }
    }
}
