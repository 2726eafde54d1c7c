// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain layer containing core types and logic.
//!
//! This module holds the parsed document, type inference, the format options
//! and the schema rules. It performs no I/O; files reach it through the
//! service layer as [`RawEntry`] values.

pub mod data_type;
pub mod document;
pub mod errors;
pub mod format;
pub mod raw_entry;
pub mod rule;
pub mod typed_value;

// Re-export commonly used types
pub use data_type::{BestValue, DataType};
pub use document::Document;
pub use errors::{KeyValError, Result, SchemaError};
pub use format::FormatOptions;
pub use raw_entry::RawEntry;
pub use rule::{KeyRules, Rule, RuleAttribute, RuleSet, TypeConstraint};
pub use typed_value::TypedValue;
