// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the keyval crate.
//!
//! Parse-time failures (I/O, malformed entries, include cycles, bad options) and
//! validation-time failures ([`SchemaError`]) share the [`KeyValError`] type so
//! callers can propagate either with `?`.

use crate::domain::rule::TypeConstraint;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for keyval operations.
///
/// It is marked as `#[non_exhaustive]` to allow for future additions without
/// breaking backwards compatibility.
///
/// # Examples
///
/// ```
/// use keyval::domain::errors::KeyValError;
/// use std::path::PathBuf;
///
/// let error = KeyValError::MalformedEntry {
///     entry: "no delimiter here".to_string(),
///     path: PathBuf::from("app.kv"),
///     line: 3,
/// };
/// assert!(error.to_string().contains("app.kv"));
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum KeyValError {
    /// A file could not be opened or read.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// The file being read
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A logical entry has no key/value delimiter after comment stripping.
    #[error("bad key val: {entry} in file {} (line {line})", .path.display())]
    MalformedEntry {
        /// The logical entry text
        entry: String,
        /// The file the entry came from
        path: PathBuf,
        /// The line on which the logical entry started
        line: usize,
    },

    /// A file includes itself, directly or through other files.
    #[error("include cycle: {} is already being read", .path.display())]
    IncludeCycle {
        /// The file that closed the cycle
        path: PathBuf,
    },

    /// The format options cannot be used for parsing.
    #[error("invalid format options: {message}")]
    InvalidOptions {
        /// What is wrong with the options
        message: String,
    },

    /// A rule line in a schema could not be parsed.
    #[error("invalid rule on line {line}: {message}")]
    RuleSyntax {
        /// The 1-based line number in the rule text
        line: usize,
        /// What is wrong with the rule
        message: String,
    },

    /// A document failed schema validation.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// A schema validation failure.
///
/// Validation stops at the first failure, so at most one of these is reported per check.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A key flagged `required-yes` is absent.
    #[error("missing required key {key}")]
    MissingRequired {
        /// The absent key
        key: String,
    },

    /// A value does not have the type its rule demands.
    #[error("value to key {key} must be {expected}")]
    WrongType {
        /// The offending document key
        key: String,
        /// The type the rule demands
        expected: TypeConstraint,
    },

    /// A value is not in the key's allowed list.
    #[error("value {value} to key {key} is not one of: {}", .allowed.join(", "))]
    DisallowedValue {
        /// The offending document key
        key: String,
        /// The value found
        value: String,
        /// The allowed values
        allowed: Vec<String>,
    },

    /// A key is present but a key it requires is not.
    #[error("missing required key {required} (required by {key})")]
    MissingDependency {
        /// The key that declares the dependency
        key: String,
        /// The absent key
        required: String,
    },

    /// The document contains keys no rule mentions.
    #[error("unknown key(s): {}", .keys.join(", "))]
    UnknownKeys {
        /// The unknown keys, sorted
        keys: Vec<String>,
    },
}

impl KeyValError {
    /// Creates an `Io` error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KeyValError::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the schema failure if this error is one.
    pub fn as_schema(&self) -> Option<&SchemaError> {
        match self {
            KeyValError::Schema(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized Result type for keyval operations.
pub type Result<T> = std::result::Result<T, KeyValError>;
