// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory source reader adapter.
//!
//! Useful for tests and for hosts that already hold file contents (for example
//! embedded defaults), including sets of files that `include` each other.

use crate::domain::{KeyValError, Result};
use crate::ports::SourceReader;
use std::collections::HashMap;
use std::io::{self, BufRead};
use std::path::{Path, PathBuf};

/// Serves keyval files from a map of path to content.
///
/// Paths are matched exactly as given.
///
/// # Examples
///
/// ```rust
/// use keyval::adapters::InMemoryReader;
/// use keyval::service::KeyValLoader;
///
/// let reader = InMemoryReader::new()
///     .with_file("main.kv", "a: 1\ninclude: extra.kv\n")
///     .with_file("extra.kv", "b: 2\n");
///
/// let loader = KeyValLoader::builder().with_reader(reader).build().unwrap();
/// let doc = loader.load("main.kv").unwrap();
/// assert_eq!(doc.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryReader {
    files: HashMap<PathBuf, String>,
}

impl InMemoryReader {
    /// Creates an empty reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a reader from a map of path to content.
    pub fn with_files(files: HashMap<PathBuf, String>) -> Self {
        Self { files }
    }

    /// Adds a file.
    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.files.insert(path.into(), content.into());
        self
    }
}

impl SourceReader for InMemoryReader {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>> {
        let content = self.files.get(path).ok_or_else(|| {
            KeyValError::io(
                path,
                io::Error::new(io::ErrorKind::NotFound, "no such in-memory file"),
            )
        })?;
        Ok(Box::new(content.as_bytes()))
    }
}
