//! # Message Catalog
//!
//! Renders [`ValidationError`] records and warnings into sentences.
//!
//! A catalog maps a key (an [`ErrorKey`](crate::report::ErrorKey) identifier
//! or a warning key such as [`DEPRECATED_VERSION_WARNING`]) to a
//! [`Template`]. Templates interpolate `%{name}` placeholders from the
//! error's data. A plural template picks its `one` or `other` form from the
//! `count` datum.
//!
//! ## Overrides
//!
//! Catalogs load from YAML, one key per entry:
//!
//! ```yaml
//! missing_manifest: "manifest.json fehlt"
//! missing_keys:
//!   one: "Pflichtfeld fehlt: %{missing_keys}"
//!   other: "Pflichtfelder fehlen: %{missing_keys}"
//! ```
//!
//! [`Catalog::merged`] layers such a file over [`Catalog::english`], so a
//! partial translation still renders every key.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{CatalogError, CatalogResult};
use crate::report::ValidationError;

/// Key of the warning appended when a manifest targets the deprecated
/// framework version.
pub const DEPRECATED_VERSION_WARNING: &str = "deprecated_version";

/// A message template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Template {
    /// Used regardless of `count`.
    Single(String),
    /// `one` when `count` is 1, `other` otherwise (including no `count`).
    Plural { one: String, other: String },
}

impl Template {
    /// The template text for `count`.
    pub fn select(&self, count: Option<u64>) -> &str {
        match self {
            Self::Single(text) => text,
            Self::Plural { one, .. } if count == Some(1) => one,
            Self::Plural { other, .. } => other,
        }
    }
}

enum Builtin {
    Single(&'static str),
    Plural(&'static str, &'static str),
}

const ENGLISH: &[(&str, Builtin)] = &[
    ("missing_manifest", Builtin::Single("Could not find manifest.json")),
    ("manifest_not_json", Builtin::Single("manifest is not proper JSON. %{errors}")),
    (
        "missing_keys",
        Builtin::Plural(
            "Missing required field in manifest: %{missing_keys}",
            "Missing required fields in manifest: %{missing_keys}",
        ),
    ),
    (
        "missing_oauth_fields",
        Builtin::Plural(
            "Missing required oauth field in manifest: %{missing_keys}",
            "Missing required oauth fields in manifest: %{missing_keys}",
        ),
    ),
    ("parameters_not_an_array", Builtin::Single("App parameters must be an array.")),
    (
        "duplicate_parameters",
        Builtin::Single("Duplicate app parameters defined: %{duplicate_parameters}"),
    ),
    ("name_as_parameter_name", Builtin::Single("Can't call a parameter 'name'")),
    (
        "invalid_type_parameter",
        Builtin::Plural(
            "%{invalid_types} is an invalid parameter type.",
            "%{invalid_types} are invalid parameter types.",
        ),
    ),
    (
        "invalid_hidden_parameter",
        Builtin::Plural(
            "%{invalid_params} is set to hidden and cannot be required.",
            "%{invalid_params} are set to hidden and cannot be required.",
        ),
    ),
    (
        "invalid_no_template",
        Builtin::Single("noTemplate must be false or an array of valid location names."),
    ),
    (
        "invalid_default_locale",
        Builtin::Single("%{defaultLocale} is not a valid default locale."),
    ),
    (
        "missing_translation_file",
        Builtin::Single("Missing translation file for locale '%{defaultLocale}'."),
    ),
    (
        "no_location_required",
        Builtin::Single("Having location defined while requirements only is true"),
    ),
    (
        "no_framework_version_required",
        Builtin::Single("Having framework version defined while requirements only is true"),
    ),
    ("invalid_host", Builtin::Single("%{host_name} is an invalid host for apps.")),
    (
        "invalid_location",
        Builtin::Plural(
            "%{invalid_locations} is an invalid location in %{host_name}.",
            "%{invalid_locations} are invalid locations in %{host_name}.",
        ),
    ),
    (
        "invalid_location_uri",
        Builtin::Single(
            "%{uri} is either an invalid location URI, refers to a missing asset or uses http instead of https.",
        ),
    ),
    (
        "duplicate_location",
        Builtin::Plural(
            "Duplicate reference in manifest: %{duplicate_locations}.",
            "Duplicate references in manifest: %{duplicate_locations}.",
        ),
    ),
    (
        "missing_framework_version",
        Builtin::Single("Missing required field in manifest: frameworkVersion"),
    ),
    (
        "invalid_version",
        Builtin::Single(
            "%{target_version} is not a valid framework version. Available versions are: %{available_versions}.",
        ),
    ),
    (
        "old_version",
        Builtin::Single("Iframe only apps must target framework version 2.0 or above."),
    ),
    (
        "missing_requirements",
        Builtin::Single("Missing requirements.json for a requirements only app."),
    ),
    (
        "requirements_not_supported",
        Builtin::Single("Marketing only apps cannot declare requirements."),
    ),
    ("requirements_not_json", Builtin::Single("requirements.json is not proper JSON. %{errors}")),
    (
        "duplicate_requirements",
        Builtin::Plural(
            "requirements.json contains a duplicate key: %{duplicate_keys}",
            "requirements.json contains duplicate keys: %{duplicate_keys}",
        ),
    ),
    (
        "invalid_requirements_types",
        Builtin::Plural(
            "Invalid requirements type: %{invalid_types}",
            "Invalid requirements types: %{invalid_types}",
        ),
    ),
    (
        "excessive_requirements",
        Builtin::Single(
            "The requirements.json file contains too many requirements. The current limit is %{max} requirements. This app has %{count} requirements.",
        ),
    ),
    (
        "multiple_channel_integrations",
        Builtin::Single("Specifying multiple channel integrations in requirements.json is not supported."),
    ),
    (
        "missing_required_fields",
        Builtin::Single("Missing required field %{field} in requirement %{identifier}."),
    ),
    (
        "style_in_template",
        Builtin::Single("<style> tag in %{template}. Use an app.css file instead."),
    ),
    (
        DEPRECATED_VERSION_WARNING,
        Builtin::Single(
            "You are targeting a deprecated version of the framework. Please upgrade your frameworkVersion.",
        ),
    ),
];

/// A set of message templates keyed by error or warning key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    templates: BTreeMap<String, Template>,
}

impl Catalog {
    /// An empty catalog. Every key renders as itself.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in English catalog.
    pub fn english() -> Self {
        let templates = ENGLISH
            .iter()
            .map(|(key, builtin)| {
                let template = match builtin {
                    Builtin::Single(text) => Template::Single((*text).to_string()),
                    Builtin::Plural(one, other) => Template::Plural {
                        one: (*one).to_string(),
                        other: (*other).to_string(),
                    },
                };
                ((*key).to_string(), template)
            })
            .collect();
        Self { templates }
    }

    /// Parse a catalog from YAML text.
    pub fn from_yaml_str(yaml: &str) -> CatalogResult<Self> {
        let templates: BTreeMap<String, Template> = serde_yaml::from_str(yaml)?;
        Ok(Self { templates })
    }

    /// Read and parse a YAML catalog file.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let yaml = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml_str(&yaml)?;
        tracing::debug!(path = %path.display(), entries = catalog.len(), "loaded message catalog");
        Ok(catalog)
    }

    /// This catalog with every entry of `overrides` layered on top.
    #[must_use]
    pub fn merged(mut self, overrides: Catalog) -> Self {
        self.templates.extend(overrides.templates);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Template> {
        self.templates.get(key)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Render a validation error. Unknown keys render as the key itself.
    pub fn render(&self, error: &ValidationError) -> String {
        self.render_key(error.key().as_str(), error.data())
    }

    /// Render `key` with `data`. Unknown keys render as the key itself.
    pub fn render_key(&self, key: &str, data: &Map<String, Value>) -> String {
        match self.templates.get(key) {
            Some(template) => {
                let count = data.get("count").and_then(Value::as_u64);
                interpolate(template.select(count), data)
            }
            None => key.to_string(),
        }
    }

    /// Render a warning that carries no data.
    pub fn warning(&self, key: &str) -> String {
        self.render_key(key, &Map::new())
    }
}

/// Substitute `%{name}` placeholders. Unmatched placeholders stay verbatim.
fn interpolate(template: &str, data: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find("%{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match data.get(name) {
            Some(value) => out.push_str(&display_value(value)),
            None => {
                out.push_str("%{");
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }
    out.push_str(rest);
    out
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{ErrorKey, ValidationError};

    #[test]
    fn english_covers_every_error_key() {
        let catalog = Catalog::english();
        for key in ErrorKey::all() {
            assert!(catalog.get(key.as_str()).is_some(), "no English message for {key}");
        }
        assert!(catalog.get(DEPRECATED_VERSION_WARNING).is_some());
    }

    #[test]
    fn renders_style_in_template() {
        let error =
            ValidationError::new(ErrorKey::StyleInTemplate).with("template", "layout.hdbs");
        assert_eq!(
            Catalog::english().render(&error),
            "<style> tag in layout.hdbs. Use an app.css file instead."
        );
    }

    #[test]
    fn plural_form_follows_count() {
        let catalog = Catalog::english();
        let one = ValidationError::new(ErrorKey::MissingKeys)
            .with("missing_keys", "location")
            .with("count", 1);
        let many = ValidationError::new(ErrorKey::MissingKeys)
            .with("missing_keys", "author, defaultLocale")
            .with("count", 2);
        assert_eq!(
            catalog.render(&one),
            "Missing required field in manifest: location"
        );
        assert_eq!(
            catalog.render(&many),
            "Missing required fields in manifest: author, defaultLocale"
        );
    }

    #[test]
    fn arrays_render_as_compact_json() {
        let error = ValidationError::new(ErrorKey::DuplicateParameters)
            .with("duplicate_parameters", vec!["url"]);
        assert_eq!(
            Catalog::english().render(&error),
            r#"Duplicate app parameters defined: ["url"]"#
        );
    }

    #[test]
    fn numbers_render_as_decimals() {
        let error = ValidationError::new(ErrorKey::ExcessiveRequirements)
            .with("max", 5000)
            .with("count", 5001);
        assert!(Catalog::english()
            .render(&error)
            .ends_with("limit is 5000 requirements. This app has 5001 requirements."));
    }

    #[test]
    fn missing_placeholder_stays_verbatim() {
        let error = ValidationError::new(ErrorKey::InvalidHost);
        assert_eq!(
            Catalog::english().render(&error),
            "%{host_name} is an invalid host for apps."
        );
    }

    #[test]
    fn unterminated_placeholder_is_literal() {
        let mut data = Map::new();
        data.insert("a".to_string(), Value::from("x"));
        assert_eq!(interpolate("%{a} and %{b", &data), "x and %{b");
    }

    #[test]
    fn unknown_key_renders_as_key() {
        let error = ValidationError::new(ErrorKey::OldVersion);
        assert_eq!(Catalog::new().render(&error), "old_version");
        assert_eq!(Catalog::english().warning("nope"), "nope");
    }

    #[test]
    fn yaml_override_layers_over_english() {
        let overrides = Catalog::from_yaml_str(
            "missing_manifest: manifest.json fehlt\nmissing_keys:\n  one: \"Feld fehlt: %{missing_keys}\"\n  other: \"Felder fehlen: %{missing_keys}\"\n",
        )
        .unwrap();
        assert_eq!(overrides.len(), 2);

        let catalog = Catalog::english().merged(overrides);
        assert_eq!(
            catalog.render(&ValidationError::new(ErrorKey::MissingManifest)),
            "manifest.json fehlt"
        );
        let error = ValidationError::new(ErrorKey::MissingKeys)
            .with("missing_keys", "author")
            .with("count", 1);
        assert_eq!(catalog.render(&error), "Feld fehlt: author");
        // Untouched keys keep the English text.
        assert_eq!(
            catalog.render(&ValidationError::new(ErrorKey::OldVersion)),
            "Iframe only apps must target framework version 2.0 or above."
        );
    }

    #[test]
    fn yaml_that_is_not_a_mapping_is_rejected() {
        assert!(matches!(
            Catalog::from_yaml_str("- just\n- a list\n"),
            Err(CatalogError::Yaml(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yml");
        assert!(matches!(
            Catalog::load(&missing),
            Err(CatalogError::Io { .. })
        ));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("de.yml");
        std::fs::write(&path, "old_version: zu alt\n").unwrap();
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(
            catalog.render(&ValidationError::new(ErrorKey::OldVersion)),
            "zu alt"
        );
    }
}
