// SPDX-License-Identifier: MIT OR Apache-2.0

//! The keyval loader: file path in, [`Document`] out.

use crate::adapters::FileSystemReader;
use crate::domain::{Document, FormatOptions, RawEntry, Result};
use crate::ports::SourceReader;
use crate::service::assembler::LineAssembler;
use std::path::Path;

/// Reads keyval files into documents.
///
/// The loader owns the format options and the reader used for the top-level
/// file and every include. Each call to [`load`](Self::load) builds a fresh
/// document owned by the caller.
///
/// # Examples
///
/// ```rust,no_run
/// use keyval::prelude::*;
///
/// # fn main() -> Result<()> {
/// let loader = KeyValLoader::builder()
///     .with_list_delimiter("|")
///     .build()?;
///
/// let doc = loader.load("settings.kv")?;
/// if let Some(port) = doc.get("port").and_then(|v| v.as_int()) {
///     println!("port = {}", port);
/// }
/// # Ok(())
/// # }
/// ```
pub struct KeyValLoader {
    reader: Box<dyn SourceReader>,
    options: FormatOptions,
}

impl KeyValLoader {
    /// Creates a loader reading from the file system with default options.
    pub fn new() -> Self {
        Self {
            reader: Box::new(FileSystemReader::new()),
            options: FormatOptions::default(),
        }
    }

    /// Creates a new loader builder.
    pub fn builder() -> KeyValLoaderBuilder {
        KeyValLoaderBuilder::new()
    }

    /// Returns the format options in use.
    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Reads `path` (and its includes) into raw entries in file order.
    pub fn read_entries(&self, path: impl AsRef<Path>) -> Result<Vec<RawEntry>> {
        LineAssembler::new(&*self.reader, &self.options).assemble(path.as_ref())
    }

    /// Builds a document from entries, using this loader's options.
    pub fn process_entries<I, E>(&self, entries: I) -> Document
    where
        I: IntoIterator<Item = E>,
        E: Into<RawEntry>,
    {
        Document::from_entries(entries, &self.options)
    }

    /// Reads `path` into a document.
    ///
    /// No partial document is returned: any I/O or malformed-entry error aborts
    /// the whole load.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Document> {
        let path = path.as_ref();
        let entries = self.read_entries(path)?;
        let doc = self.process_entries(entries);
        tracing::debug!("Loaded {} keys from '{}'", doc.len(), path.display());
        Ok(doc)
    }
}

impl Default for KeyValLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for constructing a `KeyValLoader`.
///
/// # Examples
///
/// ```rust
/// use keyval::adapters::InMemoryReader;
/// use keyval::service::KeyValLoaderBuilder;
///
/// # fn main() -> keyval::domain::Result<()> {
/// let loader = KeyValLoaderBuilder::new()
///     .with_kv_delimiter("=")
///     .with_reader(InMemoryReader::new().with_file("app.kv", "name = demo\n"))
///     .build()?;
///
/// let doc = loader.load("app.kv")?;
/// assert_eq!(doc.get("name").unwrap().as_str(), "demo");
/// # Ok(())
/// # }
/// ```
pub struct KeyValLoaderBuilder {
    reader: Option<Box<dyn SourceReader>>,
    options: FormatOptions,
}

impl KeyValLoaderBuilder {
    /// Creates a new builder with default options and no reader.
    pub fn new() -> Self {
        Self {
            reader: None,
            options: FormatOptions::default(),
        }
    }

    /// Sets the reader used for every file. Defaults to [`FileSystemReader`].
    pub fn with_reader<R: SourceReader + 'static>(mut self, reader: R) -> Self {
        self.reader = Some(Box::new(reader));
        self
    }

    /// Replaces all format options.
    pub fn with_options(mut self, options: FormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Sets the key/value delimiter.
    pub fn with_kv_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.options = self.options.with_kv_delimiter(delimiter);
        self
    }

    /// Sets the list element delimiter.
    pub fn with_list_delimiter(mut self, delimiter: impl Into<String>) -> Self {
        self.options = self.options.with_list_delimiter(delimiter);
        self
    }

    /// Sets the comment marker.
    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.options = self.options.with_comment_marker(marker);
        self
    }

    /// Builds the loader.
    ///
    /// # Errors
    ///
    /// Returns `KeyValError::InvalidOptions` if the options cannot be used.
    pub fn build(self) -> Result<KeyValLoader> {
        self.options.validate()?;

        Ok(KeyValLoader {
            reader: self
                .reader
                .unwrap_or_else(|| Box::new(FileSystemReader::new())),
            options: self.options,
        })
    }
}

impl Default for KeyValLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a keyval file from the file system with default options.
pub fn load_file(path: impl AsRef<Path>) -> Result<Document> {
    KeyValLoader::new().load(path)
}
