// SPDX-License-Identifier: MIT OR Apache-2.0

//! Source reader trait definition.
//!
//! This module defines the `SourceReader` trait, the port through which the
//! line assembler opens keyval files (the top-level file and every `include`).

use crate::domain::Result;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// A trait for opening keyval files by path.
///
/// The assembler opens one file at a time, reads it to the end, and drops the
/// returned reader before moving on. An included file is opened and read while
/// its parent's reader is paused.
///
/// # Examples
///
/// ```rust
/// use keyval::ports::SourceReader;
/// use keyval::domain::Result;
/// use std::io::BufRead;
/// use std::path::Path;
///
/// struct FixedReader;
///
/// impl SourceReader for FixedReader {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     fn open(&self, _path: &Path) -> Result<Box<dyn BufRead + '_>> {
///         Ok(Box::new("a: 1\n".as_bytes()))
///     }
/// }
/// ```
pub trait SourceReader: Send + Sync {
    /// Returns a short name for logs.
    fn name(&self) -> &str;

    /// Opens `path` for sequential reading.
    ///
    /// # Returns
    ///
    /// * `Ok(reader)` - A buffered reader positioned at the start of the file
    /// * `Err(KeyValError::Io)` - The file could not be opened
    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>>;

    /// Returns a stable identity for `path`, used to detect include cycles.
    ///
    /// Two spellings of the same file should map to the same identity. The
    /// default implementation uses the path as given.
    fn identity(&self, path: &Path) -> Result<PathBuf> {
        Ok(path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    struct TestReader;

    impl SourceReader for TestReader {
        fn name(&self) -> &str {
            "test-reader"
        }

        fn open(&self, _path: &Path) -> Result<Box<dyn BufRead + '_>> {
            Ok(Box::new("key: value\n".as_bytes()))
        }
    }

    #[test]
    fn test_reader_name() {
        assert_eq!(TestReader.name(), "test-reader");
    }

    #[test]
    fn test_reader_open() {
        let mut content = String::new();
        TestReader
            .open(Path::new("any"))
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "key: value\n");
    }

    #[test]
    fn test_default_identity_is_path() {
        let identity = TestReader.identity(Path::new("./a.kv")).unwrap();
        assert_eq!(identity, PathBuf::from("./a.kv"));
    }

    #[test]
    fn test_reader_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Box<dyn SourceReader>>();
    }
}
