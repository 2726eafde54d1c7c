// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ports layer containing trait definitions.
//!
//! The service layer reads files only through these traits; the adapters layer
//! provides the implementations.

pub mod reader;

pub use reader::SourceReader;
