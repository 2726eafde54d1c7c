// SPDX-License-Identifier: MIT OR Apache-2.0

//! A reader for "key: value" configuration files with type inference and
//! schema validation.
//!
//! # File format
//!
//! ```text
//! // comments use //, on their own line or after a value
//! name: demo
//! ports: 8080, 8081      // a list of integers
//! released: 2011-01-05
//! description: values may continue
//!   on following lines without a delimiter
//! include: common.kv     // splices in another file
//! ```
//!
//! Every value is kept as a string and, where possible, as an integer, float,
//! date, or a list of any of these. The single best type is chosen by a fixed
//! precedence (lists first; then date, int, float, string). Repeated keys are
//! renamed into a numbered group: `eqn`, `eqn` becomes `eqn1`, `eqn2`.
//!
//! # Architecture
//!
//! - **Domain Layer**: the document, type inference, format options, rules and errors
//! - **Ports**: the `SourceReader` trait through which files are opened
//! - **Adapters**: file-system and in-memory readers
//! - **Service**: the line assembler, the loader and the schema validator
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use keyval::prelude::*;
//!
//! # fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//! let doc = KeyValLoader::new().load("settings.kv")?;
//!
//! match doc.get_best("ports") {
//!     BestValue::IntList(ports) => println!("{} ports", ports.len()),
//!     other => println!("ports is {}", other.data_type()),
//! }
//!
//! check_legals(&doc, "name:required-yes\nports:required-yes\nreleased:type-date\ndescription:required-no")?;
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

/// Commonly used types and traits.
///
/// This module re-exports the most commonly used types and traits for convenient access.
pub mod prelude {
    pub use crate::adapters::{FileSystemReader, InMemoryReader};
    pub use crate::domain::{
        BestValue, DataType, Document, FormatOptions, KeyValError, RawEntry, Result, RuleSet,
        SchemaError, TypedValue,
    };
    pub use crate::ports::SourceReader;
    pub use crate::service::{check_legals, load_file, KeyValLoader, SchemaValidator};
}
