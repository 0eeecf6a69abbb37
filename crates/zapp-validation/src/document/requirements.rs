//! # Requirements Document
//!
//! A read-only view over `requirements.json`: a mapping of requirement type
//! to a mapping of identifier to field map.
//!
//! ```json
//! {
//!   "targets": {
//!     "an_email_target": { "title": "Email", "type": "email_target" }
//!   }
//! }
//! ```
//!
//! Parsing rejects duplicate keys in any object (see [`crate::json`]).
//! Shape problems below the top level are left to the validator: a type
//! whose value is not an object has no entries, and an entry whose value is
//! not an object has no fields.

use serde_json::{Map, Value};

use zapp_core::RequirementType;

use crate::error::{json_type_name, RequirementsParseError};
use crate::json::parse_checked;

/// A parsed, duplicate-free `requirements.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementsDocument {
    raw: Map<String, Value>,
}

/// One identifier under a requirement type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RequirementEntry<'a> {
    pub identifier: &'a str,
    pub fields: &'a Value,
}

impl RequirementEntry<'_> {
    /// Whether the entry declares `field`. Any value counts, `null` included.
    pub fn has_field(&self, field: &str) -> bool {
        self.fields.as_object().is_some_and(|f| f.contains_key(field))
    }
}

impl RequirementsDocument {
    /// Parse requirements text with duplicate-key detection.
    ///
    /// Duplicate keys take precedence over a non-object top level, since
    /// both are only known once the whole text has been read.
    pub fn parse(text: &str) -> Result<Self, RequirementsParseError> {
        let checked = parse_checked(text)?;
        if checked.has_duplicates() {
            return Err(RequirementsParseError::DuplicateKeys {
                keys: checked.duplicate_keys,
            });
        }
        match checked.value {
            Value::Object(raw) => Ok(Self { raw }),
            other => Err(RequirementsParseError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Top-level type keys, in document order.
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.raw.keys().map(String::as_str)
    }

    /// Top-level keys that are not a [`RequirementType`], in document order.
    pub fn unknown_types(&self) -> Vec<&str> {
        self.types()
            .filter(|t| t.parse::<RequirementType>().is_err())
            .collect()
    }

    /// Entries declared under `type_key`, in document order.
    pub fn entries(&self, type_key: &str) -> Vec<RequirementEntry<'_>> {
        match self.raw.get(type_key) {
            Some(Value::Object(by_identifier)) => by_identifier
                .iter()
                .map(|(identifier, fields)| RequirementEntry {
                    identifier: identifier.as_str(),
                    fields,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Number of entries across every type.
    pub fn entry_count(&self) -> usize {
        self.raw
            .values()
            .filter_map(Value::as_object)
            .map(Map::len)
            .sum()
    }
}
