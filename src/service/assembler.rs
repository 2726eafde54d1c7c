// SPDX-License-Identifier: MIT OR Apache-2.0

//! Line assembly: from file lines to logical `key: value` entries.
//!
//! Comments are stripped, continuation lines are merged into the entry they
//! belong to, and `include` entries are replaced by the entries of the file
//! they name.

use crate::domain::{FormatOptions, KeyValError, RawEntry, Result};
use crate::ports::SourceReader;
use std::borrow::Cow;
use std::io::BufRead;
use std::path::{Path, PathBuf};

/// The key whose value names a file to splice in.
pub const INCLUDE_KEY: &str = "include";

/// Lines shorter than this (in bytes, after trimming) are skipped.
const MIN_LINE_LEN: usize = 2;

/// A logical entry still accepting continuation lines.
struct PendingEntry {
    text: String,
    line: usize,
}

/// Assembles the raw entries of a file and everything it includes.
///
/// An included file that is already being assembled (directly or further up
/// the include chain) is rejected with [`KeyValError::IncludeCycle`].
pub struct LineAssembler<'a> {
    reader: &'a dyn SourceReader,
    options: &'a FormatOptions,
    /// Identities of the files currently being read, outermost first
    active: Vec<PathBuf>,
}

impl<'a> LineAssembler<'a> {
    /// Creates an assembler reading through `reader`.
    pub fn new(reader: &'a dyn SourceReader, options: &'a FormatOptions) -> Self {
        Self {
            reader,
            options,
            active: Vec::new(),
        }
    }

    /// Returns the entries of `path` in file order, with includes expanded
    /// in place.
    pub fn assemble(&mut self, path: &Path) -> Result<Vec<RawEntry>> {
        let mut entries = Vec::new();
        self.assemble_into(path, &mut entries)?;
        Ok(entries)
    }

    fn assemble_into(&mut self, path: &Path, entries: &mut Vec<RawEntry>) -> Result<()> {
        let identity = self.reader.identity(path)?;
        if self.active.contains(&identity) {
            return Err(KeyValError::IncludeCycle {
                path: path.to_path_buf(),
            });
        }

        self.active.push(identity);
        let result = self.read_file(path, entries);
        self.active.pop();
        result
    }

    fn read_file(&mut self, path: &Path, entries: &mut Vec<RawEntry>) -> Result<()> {
        let reader = self.reader;
        let options = self.options;
        let delimiter = options.kv_delimiter();

        tracing::debug!(
            "Reading keyval file '{}' from {}",
            path.display(),
            reader.name()
        );
        let mut input = reader.open(path)?;

        let mut pending: Option<PendingEntry> = None;
        let mut raw = Vec::new();
        let mut line_number = 0;

        loop {
            raw.clear();
            let read = input
                .read_until(b'\n', &mut raw)
                .map_err(|e| KeyValError::io(path, e))?;
            if read == 0 {
                break;
            }
            line_number += 1;

            let text = String::from_utf8_lossy(&raw);
            if let Cow::Owned(_) = text {
                tracing::debug!(
                    "Replaced invalid UTF-8 in '{}' line {}",
                    path.display(),
                    line_number
                );
            }

            let Some(line) = clean_line(&text, options.comment_marker()) else {
                continue;
            };

            match pending.as_mut() {
                Some(entry) if !(entry.text.contains(delimiter) && line.contains(delimiter)) => {
                    entry.text.push(' ');
                    entry.text.push_str(line);
                }
                _ => {
                    let next = PendingEntry {
                        text: line.to_string(),
                        line: line_number,
                    };
                    if let Some(done) = pending.replace(next) {
                        self.close_entry(done, path, entries)?;
                    }
                }
            }
        }

        if let Some(done) = pending {
            self.close_entry(done, path, entries)?;
        }
        Ok(())
    }

    /// Splits a finished entry into key and value, or expands it if it is an include.
    fn close_entry(
        &mut self,
        entry: PendingEntry,
        path: &Path,
        entries: &mut Vec<RawEntry>,
    ) -> Result<()> {
        let options = self.options;
        let Some((key, value)) = entry.text.split_once(options.kv_delimiter()) else {
            return Err(KeyValError::MalformedEntry {
                entry: entry.text,
                path: path.to_path_buf(),
                line: entry.line,
            });
        };

        let key: String = key.chars().filter(|c| *c != ' ').collect();
        let value = value.trim_start_matches(' ');

        if key == INCLUDE_KEY {
            let include = Path::new(value.trim_end());
            tracing::debug!(
                "Including '{}' from '{}' line {}",
                include.display(),
                path.display(),
                entry.line
            );
            return self.assemble_into(include, entries);
        }

        entries.push(RawEntry::new(key, value));
        Ok(())
    }
}

/// Strips the terminator, leading spaces and comments from one line.
/// Returns `None` for lines that carry nothing.
fn clean_line<'r>(raw: &'r str, comment_marker: &str) -> Option<&'r str> {
    let line = raw.trim_end_matches('\n').trim_start_matches(' ');
    if line.len() < MIN_LINE_LEN || line.starts_with(comment_marker) {
        return None;
    }

    match line.find(comment_marker) {
        Some(index) => Some(line[..index].trim_end_matches(' ')),
        None => Some(line),
    }
}
