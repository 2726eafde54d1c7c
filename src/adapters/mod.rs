// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapters layer containing source reader implementations.
//!
//! Each adapter implements the `SourceReader` port defined in the ports layer.

pub mod file_reader;
pub mod memory_reader;

pub use file_reader::FileSystemReader;
pub use memory_reader::InMemoryReader;
