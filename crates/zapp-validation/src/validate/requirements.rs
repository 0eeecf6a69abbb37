//! # Requirements Validator
//!
//! Checks `requirements.json`: whether the app may or must have one, that
//! it parses without duplicate keys, and that its types, entry count, and
//! per-entry fields follow the platform's rules.

use zapp_core::{RequirementType, MAX_REQUIREMENTS};

use crate::document::RequirementsDocument;
use crate::error::RequirementsParseError;
use crate::package::Package;
use crate::report::{ErrorKey, ValidationError, ValidationReport};

/// Validate `requirements.json`.
pub fn validate<P: Package + ?Sized>(package: &P) -> ValidationReport {
    let (requirements_only, marketing_only) = package
        .manifest()
        .map(|m| (m.requirements_only(), m.marketing_only()))
        .unwrap_or((false, false));
    let has_requirements = package.has_requirements();

    if requirements_only && !has_requirements {
        return ValidationReport::single(ValidationError::new(ErrorKey::MissingRequirements));
    }
    if marketing_only && has_requirements {
        return ValidationReport::single(ValidationError::new(ErrorKey::RequirementsNotSupported));
    }
    if !has_requirements {
        return ValidationReport::new();
    }

    let requirements = match package.requirements_json() {
        Ok(requirements) => requirements,
        Err(RequirementsParseError::DuplicateKeys { keys }) => {
            tracing::debug!(duplicates = keys.len(), "requirements.json repeats keys");
            return keys
                .into_iter()
                .map(|key| {
                    ValidationError::new(ErrorKey::DuplicateRequirements)
                        .with("duplicate_keys", key)
                        .with("count", 1)
                })
                .collect();
        }
        Err(e) => {
            tracing::debug!(error = %e, "requirements.json did not parse");
            return ValidationReport::single(
                ValidationError::new(ErrorKey::RequirementsNotJson).with("errors", e.to_string()),
            );
        }
    };

    let mut report = ValidationReport::new();
    report.extend(invalid_requirements_types(&requirements));
    report.extend(excessive_requirements(&requirements));
    report.extend(invalid_channel_integrations(&requirements));
    report.extend(missing_required_fields(
        &requirements,
        RequirementType::UserFields.as_str(),
        "key",
    ));
    for type_key in requirements.types() {
        // Unknown types still need titles.
        let needs_title = type_key
            .parse::<RequirementType>()
            .map_or(true, |t| t.requires_title());
        if needs_title {
            report.extend(missing_required_fields(&requirements, type_key, "title"));
        }
    }

    tracing::debug!(
        errors = report.len(),
        entries = requirements.entry_count(),
        "requirements validation finished"
    );
    report
}

fn invalid_requirements_types(requirements: &RequirementsDocument) -> Option<ValidationError> {
    let invalid = requirements.unknown_types();
    (!invalid.is_empty()).then(|| {
        ValidationError::new(ErrorKey::InvalidRequirementsTypes)
            .with("invalid_types", invalid.join(", "))
            .with("count", invalid.len())
    })
}

fn excessive_requirements(requirements: &RequirementsDocument) -> Option<ValidationError> {
    let count = requirements.entry_count();
    (count > MAX_REQUIREMENTS).then(|| {
        ValidationError::new(ErrorKey::ExcessiveRequirements)
            .with("max", MAX_REQUIREMENTS)
            .with("count", count)
    })
}

fn invalid_channel_integrations(requirements: &RequirementsDocument) -> Vec<ValidationError> {
    let type_key = RequirementType::ChannelIntegrations.as_str();
    let entries = requirements.entries(type_key);
    let mut errors = Vec::new();
    if entries.len() > 1 {
        errors.push(
            ValidationError::new(ErrorKey::MultipleChannelIntegrations)
                .with("count", entries.len()),
        );
    }
    errors.extend(missing_required_fields(requirements, type_key, "manifest_url"));
    errors
}

/// One error per entry of `type_key` that does not declare `field`.
fn missing_required_fields(
    requirements: &RequirementsDocument,
    type_key: &str,
    field: &str,
) -> Vec<ValidationError> {
    requirements
        .entries(type_key)
        .into_iter()
        .filter(|entry| !entry.has_field(field))
        .map(|entry| {
            ValidationError::new(ErrorKey::MissingRequiredFields)
                .with("field", field)
                .with("identifier", entry.identifier)
        })
        .collect()
}
