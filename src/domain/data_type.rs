// SPDX-License-Identifier: MIT OR Apache-2.0

//! The type tags a value can carry and the borrowed "best" projection.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The representable types of a value, declared in increasing precedence.
///
/// Any list type outranks every unary type. Within each group the order is
/// date, int, float, string (highest first). `Invalid` marks an absent key and
/// never takes part in ranking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// Plain string
    String,
    /// 64-bit float
    Float,
    /// 64-bit signed integer
    Int,
    /// Calendar date or timestamp
    Date,
    /// List of strings
    StringList,
    /// List of floats
    FloatList,
    /// List of integers
    IntList,
    /// List of dates
    DateList,
    /// No value (the key is absent)
    Invalid,
}

impl DataType {
    /// Returns true for the list variants.
    pub fn is_list(self) -> bool {
        matches!(
            self,
            DataType::StringList | DataType::FloatList | DataType::IntList | DataType::DateList
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DataType::String => "String",
            DataType::Float => "Float",
            DataType::Int => "Int",
            DataType::Date => "Date",
            DataType::StringList => "SliceStr",
            DataType::FloatList => "SliceFloat",
            DataType::IntList => "SliceInt",
            DataType::DateList => "SliceDate",
            DataType::Invalid => "InValid",
        };
        f.write_str(name)
    }
}

/// The projection selected by a value's best type.
///
/// Returned by [`Document::get_best`](crate::domain::Document::get_best);
/// `Invalid` stands in for an absent key.
#[derive(Clone, Debug, PartialEq)]
pub enum BestValue<'a> {
    /// String projection
    String(&'a str),
    /// Float projection
    Float(f64),
    /// Integer projection
    Int(i64),
    /// Date projection
    Date(NaiveDateTime),
    /// String-list projection
    StringList(&'a [String]),
    /// Float-list projection
    FloatList(&'a [f64]),
    /// Integer-list projection
    IntList(&'a [i64]),
    /// Date-list projection
    DateList(&'a [NaiveDateTime]),
    /// The key was not found
    Invalid,
}

impl BestValue<'_> {
    /// Returns the tag matching this projection.
    pub fn data_type(&self) -> DataType {
        match self {
            BestValue::String(_) => DataType::String,
            BestValue::Float(_) => DataType::Float,
            BestValue::Int(_) => DataType::Int,
            BestValue::Date(_) => DataType::Date,
            BestValue::StringList(_) => DataType::StringList,
            BestValue::FloatList(_) => DataType::FloatList,
            BestValue::IntList(_) => DataType::IntList,
            BestValue::DateList(_) => DataType::DateList,
            BestValue::Invalid => DataType::Invalid,
        }
    }
}
