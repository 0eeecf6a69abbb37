//! # Manifest Document
//!
//! A read-only view over `manifest.json`.
//!
//! ## Location forms
//!
//! Manifests declare UI locations in one of three shapes:
//!
//! | Shape | Example | Normalized |
//! |-------|---------|------------|
//! | string | `"ticket_sidebar"` | `support` / `ticket_sidebar` / `_legacy` |
//! | array | `["top_bar", "nav_bar"]` | one `support` declaration per element |
//! | object | `{"support": {"top_bar": "assets/a.html"}}` | host / name / uri |
//!
//! Under the object shape a host may map to a string or an array of names
//! instead of a name→URI object; every listed name then gets
//! [`LEGACY_URI_STUB`]. Declarations keep document order. The array shape
//! keeps repeated names so they can be reported as duplicates.

use serde_json::{Map, Value};

use zapp_core::{AppVersion, Product};

use crate::document::parameter::Parameter;
use crate::error::{json_type_name, ManifestParseError};

/// URI placeholder for locations declared without one. Always valid.
pub const LEGACY_URI_STUB: &str = "_legacy";

/// One `(host, location, uri)` triple from the manifest's `location` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDeclaration {
    /// Host key as written (current or legacy product name).
    pub host: String,
    /// Location name as written.
    pub name: String,
    /// Declared URI, or [`LEGACY_URI_STUB`].
    pub uri: String,
}

impl LocationDeclaration {
    fn legacy(host: &str, name: String) -> Self {
        Self {
            host: host.to_string(),
            name,
            uri: LEGACY_URI_STUB.to_string(),
        }
    }
}

/// The manifest's `oauth` object.
#[derive(Debug, Clone, Copy)]
pub struct OAuthConfig<'a> {
    fields: Option<&'a Map<String, Value>>,
}

impl<'a> OAuthConfig<'a> {
    /// Fields an OAuth configuration must fill, in report order.
    pub const REQUIRED_FIELDS: &'static [&'static str] =
        &["client_id", "client_secret", "authorize_uri", "access_token_uri"];

    pub fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.and_then(|f| f.get(field))
    }

    /// Required fields that are absent, `null`, or empty, in declaration order.
    ///
    /// An `oauth` value that is not an object is missing every field.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        Self::REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| is_blank(self.get(field)))
            .collect()
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(a)) => a.is_empty(),
        Some(Value::Object(o)) => o.is_empty(),
        Some(_) => false,
    }
}

/// A parsed `manifest.json`.
#[derive(Debug, Clone, PartialEq)]
pub struct ManifestDocument {
    raw: Map<String, Value>,
    parameters: Vec<Parameter>,
    locations: Vec<LocationDeclaration>,
}

impl ManifestDocument {
    /// Parse manifest text. The top level must be a JSON object.
    pub fn parse(text: &str) -> Result<Self, ManifestParseError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self, ManifestParseError> {
        match value {
            Value::Object(raw) => Ok(Self::from_object(raw)),
            other => Err(ManifestParseError::NotAnObject {
                found: json_type_name(&other),
            }),
        }
    }

    fn from_object(raw: Map<String, Value>) -> Self {
        let parameters = match raw.get("parameters") {
            Some(Value::Array(items)) => items.iter().filter_map(Parameter::from_value).collect(),
            _ => Vec::new(),
        };
        let locations = raw.get("location").map(normalize_locations).unwrap_or_default();
        Self {
            raw,
            parameters,
            locations,
        }
    }

    /// The manifest exactly as parsed.
    pub fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// A top-level field, treating `null` as absent.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.raw.get(name).filter(|v| !v.is_null())
    }

    pub fn author(&self) -> Option<&Value> {
        self.field("author")
    }

    /// `defaultLocale` in raw form; it may not be a string.
    pub fn default_locale(&self) -> Option<&Value> {
        self.field("defaultLocale")
    }

    /// `frameworkVersion` as declared. Non-string values keep their JSON
    /// text, so `1` reads as version `"1"`.
    pub fn framework_version(&self) -> Option<AppVersion> {
        self.field("frameworkVersion").map(|v| match v {
            Value::String(s) => AppVersion::new(s.as_str()),
            other => AppVersion::new(other.to_string()),
        })
    }

    pub fn requirements_only(&self) -> bool {
        self.flag("requirementsOnly")
    }

    pub fn marketing_only(&self) -> bool {
        self.flag("marketingOnly")
    }

    fn flag(&self, name: &str) -> bool {
        self.raw.get(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// Whether `location` is declared at all, in any shape.
    pub fn has_location(&self) -> bool {
        self.field("location").is_some()
    }

    /// The `oauth` block, if declared.
    pub fn oauth(&self) -> Option<OAuthConfig<'_>> {
        self.field("oauth").map(|v| OAuthConfig {
            fields: v.as_object(),
        })
    }

    /// `parameters` in raw form, for the shape check.
    pub fn original_parameters(&self) -> Option<&Value> {
        self.field("parameters")
    }

    /// Object entries of `parameters`. Empty unless `parameters` is an array.
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    pub fn no_template(&self) -> Option<&Value> {
        self.field("noTemplate")
    }

    /// Every location declaration, in document order.
    pub fn locations(&self) -> &[LocationDeclaration] {
        &self.locations
    }

    /// Declarations grouped by host, hosts in first-declared order.
    pub fn locations_by_host(&self) -> Vec<(&str, Vec<&LocationDeclaration>)> {
        let mut groups: Vec<(&str, Vec<&LocationDeclaration>)> = Vec::new();
        for declaration in &self.locations {
            match groups.iter_mut().find(|(host, _)| *host == declaration.host) {
                Some((_, members)) => members.push(declaration),
                None => groups.push((declaration.host.as_str(), vec![declaration])),
            }
        }
        groups
    }

    /// Location names declared more than once under the same host,
    /// distinct, in first-seen order.
    pub fn duplicate_locations(&self) -> Vec<&str> {
        let mut duplicates: Vec<&str> = Vec::new();
        for (i, declaration) in self.locations.iter().enumerate() {
            let repeated = self.locations[..i]
                .iter()
                .any(|d| d.host == declaration.host && d.name == declaration.name);
            if repeated && !duplicates.contains(&declaration.name.as_str()) {
                duplicates.push(&declaration.name);
            }
        }
        duplicates
    }
}

fn normalize_locations(value: &Value) -> Vec<LocationDeclaration> {
    let support = Product::SUPPORT.name;
    match value {
        Value::String(name) => vec![LocationDeclaration::legacy(support, name.clone())],
        Value::Array(names) => names
            .iter()
            .map(|n| LocationDeclaration::legacy(support, text_of(n)))
            .collect(),
        Value::Object(hosts) => hosts
            .iter()
            .flat_map(|(host, locations)| host_declarations(host, locations))
            .collect(),
        _ => Vec::new(),
    }
}

fn host_declarations(host: &str, locations: &Value) -> Vec<LocationDeclaration> {
    match locations {
        Value::Object(by_name) => by_name
            .iter()
            .map(|(name, uri)| LocationDeclaration {
                host: host.to_string(),
                name: name.clone(),
                uri: text_of(uri),
            })
            .collect(),
        Value::Array(names) => names
            .iter()
            .map(|n| LocationDeclaration::legacy(host, text_of(n)))
            .collect(),
        Value::String(name) => vec![LocationDeclaration::legacy(host, name.clone())],
        _ => Vec::new(),
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
