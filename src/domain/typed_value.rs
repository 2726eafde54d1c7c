// SPDX-License-Identifier: MIT OR Apache-2.0

//! Type inference for raw value strings.
//!
//! A [`TypedValue`] keeps the original (trimmed) string and every typed
//! projection the string supports. Each grammar is tried independently; the
//! best type is then chosen by the fixed precedence on [`DataType`].

use crate::domain::data_type::{BestValue, DataType};
use crate::domain::format::FormatOptions;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;

/// Date layouts, tried in order. The first that parses wins.
const DATE_LAYOUTS: &[&str] = &[
    "%Y-%m-%d",
    COMPACT_DATE_LAYOUT,
    "%m/%d/%Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// `YYYYMMDD`; only tried on exactly eight ASCII digits.
const COMPACT_DATE_LAYOUT: &str = "%Y%m%d";

/// A value with all of its legal typed projections populated.
///
/// # Examples
///
/// ```
/// use keyval::domain::{DataType, TypedValue};
///
/// let value = TypedValue::from("1, 2, 3");
/// assert_eq!(value.best_type(), DataType::IntList);
/// assert_eq!(value.as_int_list(), Some(&[1, 2, 3][..]));
/// assert_eq!(value.as_str(), "1, 2, 3");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TypedValue {
    as_string: String,
    as_int: Option<i64>,
    as_float: Option<f64>,
    as_date: Option<NaiveDateTime>,
    as_string_list: Option<Vec<String>>,
    as_int_list: Option<Vec<i64>>,
    as_float_list: Option<Vec<f64>>,
    as_date_list: Option<Vec<NaiveDateTime>>,
    best_type: DataType,
}

impl TypedValue {
    /// Populates every projection `raw` supports, using the list delimiter
    /// from `options`. Never fails: a value matching no grammar only has its
    /// string projection.
    pub fn populate(raw: &str, options: &FormatOptions) -> Self {
        let text = raw.trim();

        let mut value = TypedValue {
            as_string: text.to_string(),
            as_int: text.parse::<i64>().ok(),
            as_float: text.parse::<f64>().ok(),
            as_date: parse_date(text),
            as_string_list: None,
            as_int_list: None,
            as_float_list: None,
            as_date_list: None,
            best_type: DataType::String,
        };

        if let Some(items) = split_list(text, options.list_delimiter()) {
            value.as_int_list = parse_all(&items, |s| s.parse::<i64>().ok());
            value.as_float_list = parse_all(&items, |s| s.parse::<f64>().ok());
            value.as_date_list = parse_all(&items, parse_date);
            value.as_string_list = Some(items);
        }

        value.best_type = value
            .available_types()
            .into_iter()
            .max()
            .unwrap_or(DataType::String);
        value
    }

    /// Returns every type this value can be read as, in increasing precedence.
    /// Always contains `DataType::String`.
    pub fn available_types(&self) -> Vec<DataType> {
        let populated = [
            (DataType::String, true),
            (DataType::Float, self.as_float.is_some()),
            (DataType::Int, self.as_int.is_some()),
            (DataType::Date, self.as_date.is_some()),
            (DataType::StringList, self.as_string_list.is_some()),
            (DataType::FloatList, self.as_float_list.is_some()),
            (DataType::IntList, self.as_int_list.is_some()),
            (DataType::DateList, self.as_date_list.is_some()),
        ];
        populated
            .into_iter()
            .filter_map(|(data_type, present)| present.then_some(data_type))
            .collect()
    }

    /// Returns the best type of this value.
    pub fn best_type(&self) -> DataType {
        self.best_type
    }

    /// Returns the projection selected by [`best_type`](Self::best_type).
    pub fn best(&self) -> BestValue<'_> {
        let best = match self.best_type {
            DataType::String => Some(BestValue::String(&self.as_string)),
            DataType::Float => self.as_float.map(BestValue::Float),
            DataType::Int => self.as_int.map(BestValue::Int),
            DataType::Date => self.as_date.map(BestValue::Date),
            DataType::StringList => self.as_string_list().map(BestValue::StringList),
            DataType::FloatList => self.as_float_list().map(BestValue::FloatList),
            DataType::IntList => self.as_int_list().map(BestValue::IntList),
            DataType::DateList => self.as_date_list().map(BestValue::DateList),
            DataType::Invalid => None,
        };
        best.unwrap_or(BestValue::Invalid)
    }

    /// Returns the trimmed source string.
    pub fn as_str(&self) -> &str {
        &self.as_string
    }

    /// Returns the integer projection.
    pub fn as_int(&self) -> Option<i64> {
        self.as_int
    }

    /// Returns the float projection.
    pub fn as_float(&self) -> Option<f64> {
        self.as_float
    }

    /// Returns the date projection. Date-only layouts yield midnight.
    pub fn as_date(&self) -> Option<NaiveDateTime> {
        self.as_date
    }

    /// Returns the string-list projection (only for values with more than one element).
    pub fn as_string_list(&self) -> Option<&[String]> {
        self.as_string_list.as_deref()
    }

    /// Returns the integer-list projection.
    pub fn as_int_list(&self) -> Option<&[i64]> {
        self.as_int_list.as_deref()
    }

    /// Returns the float-list projection.
    pub fn as_float_list(&self) -> Option<&[f64]> {
        self.as_float_list.as_deref()
    }

    /// Returns the date-list projection.
    pub fn as_date_list(&self) -> Option<&[NaiveDateTime]> {
        self.as_date_list.as_deref()
    }
}

impl From<&str> for TypedValue {
    fn from(s: &str) -> Self {
        TypedValue::populate(s, &FormatOptions::default())
    }
}

impl From<String> for TypedValue {
    fn from(s: String) -> Self {
        TypedValue::from(s.as_str())
    }
}

impl AsRef<str> for TypedValue {
    fn as_ref(&self) -> &str {
        &self.as_string
    }
}

impl fmt::Display for TypedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string)
    }
}

/// Parses `input` against the date layouts, then as an RFC 3339 timestamp.
pub fn parse_date(input: &str) -> Option<NaiveDateTime> {
    let input = input.trim();

    for layout in DATE_LAYOUTS {
        if *layout == COMPACT_DATE_LAYOUT
            && !(input.len() == 8 && input.bytes().all(|b| b.is_ascii_digit()))
        {
            continue;
        }
        if let Ok(date) = NaiveDate::parse_from_str(input, layout) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    DateTime::parse_from_rfc3339(input)
        .ok()
        .map(|timestamp| timestamp.naive_utc())
}

/// Splits on the list delimiter; `None` unless there is more than one element.
fn split_list(text: &str, delimiter: &str) -> Option<Vec<String>> {
    let items: Vec<String> = text
        .split(delimiter)
        .map(|item| item.trim().to_string())
        .collect();
    (items.len() > 1).then_some(items)
}

/// Parses every item, or nothing at all.
fn parse_all<T>(items: &[String], parse: impl Fn(&str) -> Option<T>) -> Option<Vec<T>> {
    items.iter().map(|item| parse(item)).collect()
}
