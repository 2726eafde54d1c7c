// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer: assembling files into documents and validating them.
//!
//! The loader drives the line assembler through a `SourceReader` and hands the
//! resulting entries to the domain layer. The validator checks a finished
//! document against a rule set.

pub mod assembler;
pub mod loader;
pub mod validator;

// Re-export commonly used types
pub use assembler::LineAssembler;
pub use loader::{load_file, KeyValLoader, KeyValLoaderBuilder};
pub use validator::{check_legals, SchemaValidator};
