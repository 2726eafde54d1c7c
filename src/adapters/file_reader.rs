// SPDX-License-Identifier: MIT OR Apache-2.0

//! File-system source reader adapter.

use crate::domain::{KeyValError, Result};
use crate::ports::SourceReader;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Maximum allowed size for a single keyval file (10MB)
const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Reads keyval files from the local file system.
///
/// Relative paths, including those named by `include`, resolve against the
/// process working directory. Include-cycle detection uses canonical paths,
/// so `a.kv` and `./a.kv` are the same file.
///
/// # Examples
///
/// ```rust,no_run
/// use keyval::adapters::FileSystemReader;
/// use keyval::ports::SourceReader;
/// use std::path::Path;
///
/// let reader = FileSystemReader::new();
/// let file = reader.open(Path::new("/etc/myapp/settings.kv")).unwrap();
/// ```
#[derive(Debug, Clone, Default)]
pub struct FileSystemReader;

impl FileSystemReader {
    /// Creates a new file-system reader.
    pub fn new() -> Self {
        FileSystemReader
    }
}

impl SourceReader for FileSystemReader {
    fn name(&self) -> &str {
        "file-system"
    }

    fn open(&self, path: &Path) -> Result<Box<dyn BufRead + '_>> {
        // Check file size before reading
        let metadata = fs::metadata(path).map_err(|e| KeyValError::io(path, e))?;
        if metadata.len() > MAX_FILE_SIZE {
            return Err(KeyValError::io(
                path,
                io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!(
                        "file too large: {} bytes (max {} bytes)",
                        metadata.len(),
                        MAX_FILE_SIZE
                    ),
                ),
            ));
        }

        let file = File::open(path).map_err(|e| KeyValError::io(path, e))?;
        Ok(Box::new(BufReader::new(file)))
    }

    fn identity(&self, path: &Path) -> Result<PathBuf> {
        path.canonicalize().map_err(|e| KeyValError::io(path, e))
    }
}
