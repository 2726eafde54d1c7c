// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schema validation of a parsed document.
//!
//! Checks run in a fixed order and stop at the first failure:
//!
//! 1. required keys are present (`multiple` keys may be present as a group),
//! 2. for each document key in key order: type, then allowed values, then
//!    dependencies,
//! 3. no key falls outside the rule set.

use crate::domain::{Document, KeyRules, Result, RuleSet, SchemaError, TypedValue};

/// Checks documents against a rule set.
///
/// # Examples
///
/// ```rust
/// use keyval::domain::{Document, FormatOptions};
/// use keyval::service::SchemaValidator;
///
/// let validator = SchemaValidator::from_text("port:required-yes\nport:type-int").unwrap();
///
/// let doc = Document::from_entries(vec![("port", "8080")], &FormatOptions::default());
/// assert!(validator.validate(&doc).is_ok());
///
/// let doc = Document::from_entries(vec![("port", "eighty")], &FormatOptions::default());
/// assert_eq!(
///     validator.validate(&doc).unwrap_err().to_string(),
///     "value to key port must be integer"
/// );
/// ```
#[derive(Clone, Debug)]
pub struct SchemaValidator {
    rules: RuleSet,
}

impl SchemaValidator {
    /// Creates a validator for already parsed rules.
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Parses rule text and creates a validator for it.
    pub fn from_text(rule_text: &str) -> Result<Self> {
        Ok(Self::new(RuleSet::parse(rule_text)?))
    }

    /// Returns the rules.
    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    /// Validates `doc`, returning the first failure as `KeyValError::Schema`.
    pub fn validate(&self, doc: &Document) -> Result<()> {
        let outcome = self
            .check_required(doc)
            .and_then(|_| self.check_entries(doc))
            .and_then(|_| self.check_unknown(doc));

        if let Err(e) = &outcome {
            tracing::debug!("Schema check failed: {}", e);
        }
        Ok(outcome?)
    }

    fn check_required(&self, doc: &Document) -> std::result::Result<(), SchemaError> {
        for rules in self.rules.keys().iter().filter(|rules| rules.required) {
            let present = if rules.multiple {
                doc.missing(&rules.key).is_empty()
            } else {
                doc.get(&rules.key).is_some()
            };

            if !present {
                return Err(SchemaError::MissingRequired {
                    key: rules.key.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_entries(&self, doc: &Document) -> std::result::Result<(), SchemaError> {
        for (key, value) in doc {
            if let Some(rules) = self.rules.governing(key) {
                check_entry(doc, key, value, rules)?;
            }
        }
        Ok(())
    }

    fn check_unknown(&self, doc: &Document) -> std::result::Result<(), SchemaError> {
        let universe = self
            .rules
            .keys()
            .iter()
            .map(|rules| {
                if rules.multiple {
                    format!("{}*", rules.key)
                } else {
                    rules.key.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(",");

        let keys = doc.unknown(&universe);
        if keys.is_empty() {
            Ok(())
        } else {
            Err(SchemaError::UnknownKeys { keys })
        }
    }
}

fn check_entry(
    doc: &Document,
    key: &str,
    value: &TypedValue,
    rules: &KeyRules,
) -> std::result::Result<(), SchemaError> {
    if let Some(expected) = rules.data_type {
        if !expected.accepts(value) {
            return Err(SchemaError::WrongType {
                key: key.to_string(),
                expected,
            });
        }
    }

    if let Some(allowed) = &rules.allowed {
        if !allowed.iter().any(|candidate| candidate == value.as_str()) {
            return Err(SchemaError::DisallowedValue {
                key: key.to_string(),
                value: value.as_str().to_string(),
                allowed: allowed.clone(),
            });
        }
    }

    if let Some(required) = rules
        .requires
        .iter()
        .find(|required| !doc.missing(required).is_empty())
    {
        return Err(SchemaError::MissingDependency {
            key: key.to_string(),
            required: required.clone(),
        });
    }

    Ok(())
}

/// Parses `rule_text` and validates `doc` against it.
///
/// Returns `KeyValError::RuleSyntax` for unreadable rules and
/// `KeyValError::Schema` for the first validation failure.
pub fn check_legals(doc: &Document, rule_text: &str) -> Result<()> {
    SchemaValidator::from_text(rule_text)?.validate(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FormatOptions, KeyValError, TypeConstraint};

    const LEGAL_DEFS: &str = r#"
key1:required-yes
key1:type-string
key1:values-yes,no

key2:required-yes
key2:type-string
key2:multiple-yes

key3:required-no
key3:type-int
key3:requires-key4

key4:required-no
key4:type-string"#;

    fn legal_doc() -> Document {
        Document::from_entries(
            vec![
                ("key1", "yes"),
                ("key2", "first"),
                ("key2", "second"),
                ("key3", "42"),
                ("key4", "meaning"),
            ],
            &FormatOptions::default(),
        )
    }

    fn schema_error(result: Result<()>) -> SchemaError {
        match result {
            Err(KeyValError::Schema(e)) => e,
            Err(other) => panic!("unexpected error: {}", other),
            Ok(()) => panic!("expected a schema error"),
        }
    }

    #[test]
    fn test_legal_document_passes() {
        assert!(check_legals(&legal_doc(), LEGAL_DEFS).is_ok());
    }

    #[test]
    fn test_type_error() {
        let mut doc = legal_doc();
        doc.insert("key3", TypedValue::from("oh oh"));
        let err = schema_error(check_legals(&doc, LEGAL_DEFS));
        assert_eq!(
            err,
            SchemaError::WrongType {
                key: "key3".to_string(),
                expected: TypeConstraint::Int
            }
        );
        assert_eq!(err.to_string(), "value to key key3 must be integer");
    }

    #[test]
    fn test_missing_dependency() {
        let mut doc = legal_doc();
        doc.remove("key4");
        let err = schema_error(check_legals(&doc, LEGAL_DEFS));
        assert_eq!(
            err,
            SchemaError::MissingDependency {
                key: "key3".to_string(),
                required: "key4".to_string()
            }
        );
    }

    #[test]
    fn test_unknown_key() {
        let mut doc = legal_doc();
        doc.insert("key5", TypedValue::from("I'm extra"));
        let err = schema_error(check_legals(&doc, LEGAL_DEFS));
        assert_eq!(err.to_string(), "unknown key(s): key5");
    }

    #[test]
    fn test_disallowed_value() {
        let mut doc = legal_doc();
        doc.insert("key1", TypedValue::from("maybe"));
        let err = schema_error(check_legals(&doc, LEGAL_DEFS));
        assert!(matches!(err, SchemaError::DisallowedValue { ref key, .. } if key == "key1"));
    }

    #[test]
    fn test_missing_required() {
        let mut doc = legal_doc();
        doc.remove("key1");
        let err = schema_error(check_legals(&doc, LEGAL_DEFS));
        assert_eq!(
            err,
            SchemaError::MissingRequired {
                key: "key1".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_of_single_key_fails_required() {
        let doc = Document::from_entries(
            vec![("key1", "yes"), ("key1", "no"), ("key2", "x")],
            &FormatOptions::default(),
        );
        let err = schema_error(check_legals(&doc, LEGAL_DEFS));
        assert_eq!(
            err,
            SchemaError::MissingRequired {
                key: "key1".to_string()
            }
        );
    }

    #[test]
    fn test_required_checked_before_type() {
        let doc = Document::from_entries(vec![("k1", "abc")], &FormatOptions::default());
        let err = schema_error(check_legals(&doc, "k1:required-yes\nk1:type-int"));
        assert!(matches!(err, SchemaError::WrongType { .. }));

        let doc = Document::from_entries(vec![("k2", "abc")], &FormatOptions::default());
        let err = schema_error(check_legals(&doc, "k1:required-yes\nk2:type-int"));
        assert!(matches!(err, SchemaError::MissingRequired { .. }));
    }

    #[test]
    fn test_type_checked_before_unknown() {
        let doc = Document::from_entries(
            vec![("a", "x"), ("zz", "extra")],
            &FormatOptions::default(),
        );
        let err = schema_error(check_legals(&doc, "a:type-float"));
        assert!(matches!(err, SchemaError::WrongType { .. }));
    }

    #[test]
    fn test_group_members_are_type_checked() {
        let doc = Document::from_entries(
            vec![("n", "1"), ("n", "two")],
            &FormatOptions::default(),
        );
        let err = schema_error(check_legals(&doc, "n:multiple-yes\nn:type-int"));
        assert_eq!(
            err,
            SchemaError::WrongType {
                key: "n2".to_string(),
                expected: TypeConstraint::Int
            }
        );
    }

    #[test]
    fn test_bad_rule_text() {
        let doc = legal_doc();
        let err = check_legals(&doc, "key1 required yes").unwrap_err();
        assert!(matches!(err, KeyValError::RuleSyntax { line: 1, .. }));
    }

    #[test]
    fn test_empty_rules_accept_anything() {
        assert!(check_legals(&legal_doc(), "").is_ok());
    }
}
