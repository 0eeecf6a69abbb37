//! # Validation Errors and Reports
//!
//! A validator never fails. It returns a [`ValidationReport`]: the ordered
//! [`ValidationError`] records it found, each a stable [`ErrorKey`] plus the
//! named values a message template interpolates. An empty report means the
//! package passed.
//!
//! Records carry no rendered text. Turning them into sentences is the
//! [`Catalog`](crate::messages::Catalog)'s job.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Stable identifiers of every rule violation a validator can emit.
///
/// The serialized form (and [`as_str`](ErrorKey::as_str)) is the
/// message-catalog key and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKey {
    // Manifest: structural.
    MissingManifest,
    ManifestNotJson,
    // Manifest: schema.
    MissingKeys,
    MissingOauthFields,
    ParametersNotAnArray,
    DuplicateParameters,
    NameAsParameterName,
    InvalidTypeParameter,
    InvalidHiddenParameter,
    InvalidNoTemplate,
    InvalidDefaultLocale,
    MissingTranslationFile,
    NoLocationRequired,
    NoFrameworkVersionRequired,
    // Manifest: locations.
    InvalidHost,
    InvalidLocation,
    InvalidLocationUri,
    DuplicateLocation,
    // Manifest: framework version.
    MissingFrameworkVersion,
    InvalidVersion,
    OldVersion,
    // Requirements.
    MissingRequirements,
    RequirementsNotSupported,
    RequirementsNotJson,
    DuplicateRequirements,
    InvalidRequirementsTypes,
    ExcessiveRequirements,
    MultipleChannelIntegrations,
    MissingRequiredFields,
    // Templates.
    StyleInTemplate,
}

/// How bad a violation is. Only informs presentation; every error fails
/// the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The file is missing or unparseable; later rules did not run.
    Fatal,
    /// A field is missing, mistyped, or contradicts another field.
    Schema,
    /// A value names something that does not exist (host, location, file).
    CrossReference,
    /// The document is well-formed but breaks a platform policy.
    Policy,
}

impl ErrorKey {
    /// Every error key, grouped by the validator that emits it.
    pub fn all() -> &'static [ErrorKey] {
        &[
            Self::MissingManifest,
            Self::ManifestNotJson,
            Self::MissingKeys,
            Self::MissingOauthFields,
            Self::ParametersNotAnArray,
            Self::DuplicateParameters,
            Self::NameAsParameterName,
            Self::InvalidTypeParameter,
            Self::InvalidHiddenParameter,
            Self::InvalidNoTemplate,
            Self::InvalidDefaultLocale,
            Self::MissingTranslationFile,
            Self::NoLocationRequired,
            Self::NoFrameworkVersionRequired,
            Self::InvalidHost,
            Self::InvalidLocation,
            Self::InvalidLocationUri,
            Self::DuplicateLocation,
            Self::MissingFrameworkVersion,
            Self::InvalidVersion,
            Self::OldVersion,
            Self::MissingRequirements,
            Self::RequirementsNotSupported,
            Self::RequirementsNotJson,
            Self::DuplicateRequirements,
            Self::InvalidRequirementsTypes,
            Self::ExcessiveRequirements,
            Self::MultipleChannelIntegrations,
            Self::MissingRequiredFields,
            Self::StyleInTemplate,
        ]
    }

    /// The stable snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MissingManifest => "missing_manifest",
            Self::ManifestNotJson => "manifest_not_json",
            Self::MissingKeys => "missing_keys",
            Self::MissingOauthFields => "missing_oauth_fields",
            Self::ParametersNotAnArray => "parameters_not_an_array",
            Self::DuplicateParameters => "duplicate_parameters",
            Self::NameAsParameterName => "name_as_parameter_name",
            Self::InvalidTypeParameter => "invalid_type_parameter",
            Self::InvalidHiddenParameter => "invalid_hidden_parameter",
            Self::InvalidNoTemplate => "invalid_no_template",
            Self::InvalidDefaultLocale => "invalid_default_locale",
            Self::MissingTranslationFile => "missing_translation_file",
            Self::NoLocationRequired => "no_location_required",
            Self::NoFrameworkVersionRequired => "no_framework_version_required",
            Self::InvalidHost => "invalid_host",
            Self::InvalidLocation => "invalid_location",
            Self::InvalidLocationUri => "invalid_location_uri",
            Self::DuplicateLocation => "duplicate_location",
            Self::MissingFrameworkVersion => "missing_framework_version",
            Self::InvalidVersion => "invalid_version",
            Self::OldVersion => "old_version",
            Self::MissingRequirements => "missing_requirements",
            Self::RequirementsNotSupported => "requirements_not_supported",
            Self::RequirementsNotJson => "requirements_not_json",
            Self::DuplicateRequirements => "duplicate_requirements",
            Self::InvalidRequirementsTypes => "invalid_requirements_types",
            Self::ExcessiveRequirements => "excessive_requirements",
            Self::MultipleChannelIntegrations => "multiple_channel_integrations",
            Self::MissingRequiredFields => "missing_required_fields",
            Self::StyleInTemplate => "style_in_template",
        }
    }

    /// Classify this key.
    pub fn severity(&self) -> Severity {
        match self {
            Self::MissingManifest
            | Self::ManifestNotJson
            | Self::MissingRequirements
            | Self::RequirementsNotSupported
            | Self::RequirementsNotJson
            | Self::DuplicateRequirements => Severity::Fatal,

            Self::MissingKeys
            | Self::MissingOauthFields
            | Self::ParametersNotAnArray
            | Self::NameAsParameterName
            | Self::InvalidTypeParameter
            | Self::InvalidHiddenParameter
            | Self::InvalidNoTemplate
            | Self::InvalidDefaultLocale
            | Self::NoLocationRequired
            | Self::NoFrameworkVersionRequired
            | Self::MissingFrameworkVersion
            | Self::InvalidRequirementsTypes
            | Self::MissingRequiredFields
            | Self::StyleInTemplate => Severity::Schema,

            Self::MissingTranslationFile
            | Self::InvalidHost
            | Self::InvalidLocation
            | Self::InvalidLocationUri => Severity::CrossReference,

            Self::DuplicateParameters
            | Self::DuplicateLocation
            | Self::InvalidVersion
            | Self::OldVersion
            | Self::ExcessiveRequirements
            | Self::MultipleChannelIntegrations => Severity::Policy,
        }
    }
}

impl std::fmt::Display for ErrorKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Fatal => "fatal",
            Self::Schema => "schema",
            Self::CrossReference => "cross_reference",
            Self::Policy => "policy",
        })
    }
}

/// One rule violation: a key plus its interpolation data.
///
/// Built with [`new`](Self::new) and [`with`](Self::with) by the validator
/// that finds the violation, then never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    key: ErrorKey,
    #[serde(default)]
    data: Map<String, Value>,
}

impl ValidationError {
    /// An error with no data.
    pub fn new(key: ErrorKey) -> Self {
        Self {
            key,
            data: Map::new(),
        }
    }

    /// Attach one named value.
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.data.insert(name.to_string(), value.into());
        self
    }

    pub fn key(&self) -> ErrorKey {
        self.key
    }

    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// A single data value, if present.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.data.get(name)
    }

    pub fn severity(&self) -> Severity {
        self.key.severity()
    }
}

/// The ordered result of one or more validator passes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationReport {
    errors: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self { errors }
    }

    /// A report holding exactly one error.
    pub fn single(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    pub fn push(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Append every error from `errors`. Accepts an `Option`, so a rule
    /// returning `Option<ValidationError>` can be appended directly.
    pub fn extend(&mut self, errors: impl IntoIterator<Item = ValidationError>) {
        self.errors.extend(errors);
    }

    /// Move every error of `other` to the end of this report.
    pub fn append(&mut self, other: ValidationReport) {
        self.errors.extend(other.errors);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether the package passed: no errors at all.
    pub fn passed(&self) -> bool {
        self.is_empty()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn first(&self) -> Option<&ValidationError> {
        self.errors.first()
    }

    /// Keys of every error, in report order.
    pub fn keys(&self) -> Vec<ErrorKey> {
        self.errors.iter().map(ValidationError::key).collect()
    }

    /// Whether any error carries `key`.
    pub fn contains(&self, key: ErrorKey) -> bool {
        self.errors.iter().any(|e| e.key == key)
    }

    pub fn into_inner(self) -> Vec<ValidationError> {
        self.errors
    }
}

impl FromIterator<ValidationError> for ValidationReport {
    fn from_iter<I: IntoIterator<Item = ValidationError>>(iter: I) -> Self {
        Self {
            errors: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationReport {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_keys_unique() {
        let mut seen = std::collections::HashSet::new();
        for key in ErrorKey::all() {
            assert!(seen.insert(key.as_str()), "Duplicate key: {key}");
        }
        assert_eq!(seen.len(), 30);
    }

    #[test]
    fn test_serde_matches_as_str() {
        for key in ErrorKey::all() {
            let json = serde_json::to_string(key).unwrap();
            assert_eq!(json, format!("\"{}\"", key.as_str()));
        }
    }

    #[test]
    fn test_severity_classification() {
        assert_eq!(ErrorKey::MissingManifest.severity(), Severity::Fatal);
        assert_eq!(ErrorKey::DuplicateRequirements.severity(), Severity::Fatal);
        assert_eq!(ErrorKey::MissingKeys.severity(), Severity::Schema);
        assert_eq!(ErrorKey::InvalidHost.severity(), Severity::CrossReference);
        assert_eq!(ErrorKey::ExcessiveRequirements.severity(), Severity::Policy);
    }

    #[test]
    fn test_error_builder_records_data() {
        let error = ValidationError::new(ErrorKey::MissingKeys)
            .with("missing_keys", "author, defaultLocale")
            .with("count", 2);
        assert_eq!(error.key(), ErrorKey::MissingKeys);
        assert_eq!(error.get("count"), Some(&json!(2)));
        assert_eq!(error.data().len(), 2);
        assert!(error.get("absent").is_none());
    }

    #[test]
    fn test_error_serializes_as_key_and_data() {
        let error = ValidationError::new(ErrorKey::InvalidHost).with("host_name", "nope");
        assert_eq!(
            serde_json::to_value(&error).unwrap(),
            json!({"key": "invalid_host", "data": {"host_name": "nope"}})
        );
    }

    #[test]
    fn test_report_preserves_order_across_append() {
        let mut first = ValidationReport::single(ValidationError::new(ErrorKey::MissingKeys));
        first.extend(None);
        first.extend(Some(ValidationError::new(ErrorKey::OldVersion)));
        let second: ValidationReport = vec![ValidationError::new(ErrorKey::StyleInTemplate)]
            .into_iter()
            .collect();
        first.append(second);
        assert_eq!(
            first.keys(),
            vec![
                ErrorKey::MissingKeys,
                ErrorKey::OldVersion,
                ErrorKey::StyleInTemplate
            ]
        );
        assert!(!first.passed());
        assert!(first.contains(ErrorKey::OldVersion));
    }

    #[test]
    fn test_empty_report_passes() {
        let report = ValidationReport::new();
        assert!(report.passed());
        assert_eq!(report.len(), 0);
        assert!(report.first().is_none());
        assert_eq!(serde_json::to_string(&report).unwrap(), "[]");
    }

    #[test]
    fn test_report_deserializes_without_data() {
        let report: ValidationReport =
            serde_json::from_str(r#"[{"key": "missing_manifest"}]"#).unwrap();
        assert_eq!(report.keys(), vec![ErrorKey::MissingManifest]);
        assert!(report.errors()[0].data().is_empty());
    }
}
