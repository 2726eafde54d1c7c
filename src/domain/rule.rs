// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema rules.
//!
//! Rule text is line oriented. Each line reads `key:attribute-value`:
//!
//! ```text
//! key1:required-yes
//! key1:type-string
//! key1:values-yes,no
//!
//! key2:multiple-yes
//! key3:requires-key4
//! ```
//!
//! Blank lines and lines starting with `//` are skipped.

use crate::domain::document::normalize_key;
use crate::domain::errors::{KeyValError, Result};
use crate::domain::typed_value::TypedValue;
use std::fmt;
use std::str::FromStr;

const RULE_KEY_DELIMITER: char = ':';
const RULE_VALUE_DELIMITER: char = '-';
const RULE_LIST_DELIMITER: char = ',';
const RULE_COMMENT_MARKER: &str = "//";

/// The type a rule can demand of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeConstraint {
    /// Any value
    String,
    /// The value must have an integer projection
    Int,
    /// The value must have a float projection
    Float,
    /// The value must have a date projection
    Date,
}

impl TypeConstraint {
    /// Returns true if `value` satisfies this constraint.
    pub fn accepts(self, value: &TypedValue) -> bool {
        match self {
            TypeConstraint::String => true,
            TypeConstraint::Int => value.as_int().is_some(),
            TypeConstraint::Float => value.as_float().is_some(),
            TypeConstraint::Date => value.as_date().is_some(),
        }
    }
}

impl FromStr for TypeConstraint {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "string" => Ok(TypeConstraint::String),
            "int" | "integer" => Ok(TypeConstraint::Int),
            "float" => Ok(TypeConstraint::Float),
            "date" => Ok(TypeConstraint::Date),
            other => Err(format!("unknown type '{}'", other)),
        }
    }
}

impl fmt::Display for TypeConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeConstraint::String => "string",
            TypeConstraint::Int => "integer",
            TypeConstraint::Float => "float",
            TypeConstraint::Date => "date",
        };
        f.write_str(name)
    }
}

/// The attribute part of a rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleAttribute {
    /// `required-yes` / `required-no`
    Required(bool),
    /// `type-int`, `type-float`, `type-date` or `type-string`
    Type(TypeConstraint),
    /// `multiple-yes` / `multiple-no`
    Multiple(bool),
    /// `values-a,b,c`
    Values(Vec<String>),
    /// `requires-k1,k2`
    Requires(Vec<String>),
}

/// A single `key:attribute-value` rule.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    /// The key the rule applies to
    pub key: String,
    /// What the rule says about the key
    pub attribute: RuleAttribute,
}

impl Rule {
    /// Parses one rule line. `line` is only used for error reporting.
    pub fn parse(text: &str, line: usize) -> Result<Self> {
        let syntax = |message: String| KeyValError::RuleSyntax { line, message };

        let (key, rest) = text
            .split_once(RULE_KEY_DELIMITER)
            .ok_or_else(|| syntax(format!("expected 'key:attribute-value', got '{}'", text)))?;
        let (attribute, value) = rest
            .split_once(RULE_VALUE_DELIMITER)
            .ok_or_else(|| syntax(format!("expected 'attribute-value', got '{}'", rest)))?;

        let key = normalize_key(key);
        if key.is_empty() {
            return Err(syntax("empty key".to_string()));
        }
        let value = value.trim();

        let attribute = match attribute.trim() {
            "required" => RuleAttribute::Required(parse_flag(value).map_err(syntax)?),
            "multiple" => RuleAttribute::Multiple(parse_flag(value).map_err(syntax)?),
            "type" => RuleAttribute::Type(value.parse().map_err(syntax)?),
            "values" => RuleAttribute::Values(parse_list(value)),
            "requires" => RuleAttribute::Requires(parse_list(value)),
            other => return Err(syntax(format!("unknown attribute '{}'", other))),
        };

        Ok(Rule { key, attribute })
    }
}

/// Every rule for one key, merged.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeyRules {
    /// The key
    pub key: String,
    /// The key must be present
    pub required: bool,
    /// The key may appear as a duplicate group
    pub multiple: bool,
    /// The type the value must have
    pub data_type: Option<TypeConstraint>,
    /// The values the key may take
    pub allowed: Option<Vec<String>>,
    /// Keys that must be present whenever this one is
    pub requires: Vec<String>,
}

impl KeyRules {
    fn new(key: &str) -> Self {
        Self {
            key: key.to_string(),
            ..Self::default()
        }
    }

    fn apply(&mut self, attribute: RuleAttribute) {
        match attribute {
            RuleAttribute::Required(flag) => self.required = flag,
            RuleAttribute::Multiple(flag) => self.multiple = flag,
            RuleAttribute::Type(constraint) => self.data_type = Some(constraint),
            RuleAttribute::Values(values) => self.allowed = Some(values),
            RuleAttribute::Requires(keys) => self.requires.extend(keys),
        }
    }

    /// Returns true if `doc_key` is governed by these rules: the key itself,
    /// or for a `multiple` key, the key followed by a group number.
    pub fn governs(&self, doc_key: &str) -> bool {
        if doc_key == self.key {
            return true;
        }
        self.multiple
            && doc_key
                .strip_prefix(self.key.as_str())
                .is_some_and(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
    }
}

/// A parsed set of rules.
///
/// # Examples
///
/// ```
/// use keyval::domain::RuleSet;
///
/// let rules = RuleSet::parse("port:required-yes\nport:type-int").unwrap();
/// assert_eq!(rules.rules().len(), 2);
/// assert!(rules.for_key("port").unwrap().required);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleSet {
    rules: Vec<Rule>,
    keys: Vec<KeyRules>,
}

impl RuleSet {
    /// Parses rule text, one rule per line.
    pub fn parse(text: &str) -> Result<Self> {
        let mut set = RuleSet::default();

        for (index, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with(RULE_COMMENT_MARKER) {
                continue;
            }
            set.push(Rule::parse(line, index + 1)?);
        }

        Ok(set)
    }

    fn push(&mut self, rule: Rule) {
        let position = match self.keys.iter().position(|k| k.key == rule.key) {
            Some(position) => position,
            None => {
                self.keys.push(KeyRules::new(&rule.key));
                self.keys.len() - 1
            }
        };
        self.keys[position].apply(rule.attribute.clone());
        self.rules.push(rule);
    }

    /// Returns the individual rules in text order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Returns the merged rules per key, in order of first appearance.
    pub fn keys(&self) -> &[KeyRules] {
        &self.keys
    }

    /// Returns the merged rules for `key`.
    pub fn for_key(&self, key: &str) -> Option<&KeyRules> {
        self.keys.iter().find(|k| k.key == key)
    }

    /// Returns the merged rules governing a document key, preferring an
    /// exact match over a duplicate-group match.
    pub fn governing(&self, doc_key: &str) -> Option<&KeyRules> {
        self.for_key(doc_key)
            .or_else(|| self.keys.iter().find(|k| k.governs(doc_key)))
    }
}

fn parse_flag(value: &str) -> std::result::Result<bool, String> {
    match value.to_lowercase().as_str() {
        "yes" => Ok(true),
        "no" => Ok(false),
        other => Err(format!("expected 'yes' or 'no', got '{}'", other)),
    }
}

fn parse_list(value: &str) -> Vec<String> {
    value
        .split(RULE_LIST_DELIMITER)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}
