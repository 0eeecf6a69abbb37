//! # Manifest Validator
//!
//! Checks `manifest.json` against the platform's rules and returns every
//! violation in a fixed order:
//!
//! 1. presence and parseability (both fatal: nothing else runs),
//! 2. required fields, OAuth, parameters, `noTemplate`,
//! 3. default locale and its translation file,
//! 4. for requirements-only apps, the absence of locations and a
//!    framework version; otherwise locations, hosts, URIs, and the
//!    framework version policy.
//!
//! The only side effect is the deprecation warning appended to the
//! package's collector when the manifest targets the deprecated framework.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use zapp_core::{AppVersion, Location, Product};

use crate::document::{ManifestDocument, Parameter, LEGACY_URI_STUB};
use crate::messages::{Catalog, DEPRECATED_VERSION_WARNING};
use crate::package::{Package, MANIFEST_PATH};
use crate::report::{ErrorKey, ValidationError, ValidationReport};

/// Fields every manifest must set, in report order.
pub const REQUIRED_MANIFEST_FIELDS: &[&str] = &["author", "defaultLocale"];

/// Validate the manifest, rendering warnings with the English catalog.
pub fn validate<P: Package + ?Sized>(package: &mut P) -> ValidationReport {
    validate_with_catalog(package, &Catalog::english())
}

/// Validate the manifest, rendering warnings with `catalog`.
pub fn validate_with_catalog<P: Package + ?Sized>(
    package: &mut P,
    catalog: &Catalog,
) -> ValidationReport {
    if !package.has_file(MANIFEST_PATH) {
        tracing::debug!("manifest.json not found");
        return ValidationReport::single(ValidationError::new(ErrorKey::MissingManifest));
    }

    let manifest = match package.manifest() {
        Ok(manifest) => manifest,
        Err(e) => {
            tracing::debug!(error = %e, "manifest.json did not parse");
            return ValidationReport::single(
                ValidationError::new(ErrorKey::ManifestNotJson).with("errors", e.to_string()),
            );
        }
    };

    let mut report = ValidationReport::new();
    report.extend(missing_keys_error(&manifest));
    report.extend(oauth_error(&manifest));
    report.extend(parameter_errors(&manifest));
    report.extend(no_template_error(&manifest));
    report.extend(default_locale_error(&manifest, &*package));

    if manifest.requirements_only() {
        report.extend(ban_location(&manifest));
        report.extend(ban_framework_version(&manifest));
    } else {
        report.extend(missing_location_error(&*package));
        report.extend(invalid_location_errors(&manifest, &*package));
        report.extend(duplicate_location_error(&manifest));
        report.extend(missing_framework_version(&manifest));
        report.extend(invalid_version_error(&manifest, package, catalog));
        report.extend(framework_version_iframe_only(&manifest, &*package));
    }

    tracing::debug!(
        errors = report.len(),
        requirements_only = manifest.requirements_only(),
        "manifest validation finished"
    );
    report
}

fn missing_keys(keys: &[&str]) -> ValidationError {
    ValidationError::new(ErrorKey::MissingKeys)
        .with("missing_keys", keys.join(", "))
        .with("count", keys.len())
}

fn missing_keys_error(manifest: &ManifestDocument) -> Option<ValidationError> {
    let missing: Vec<&str> = REQUIRED_MANIFEST_FIELDS
        .iter()
        .copied()
        .filter(|field| manifest.field(field).is_none())
        .collect();
    (!missing.is_empty()).then(|| missing_keys(&missing))
}

fn oauth_error(manifest: &ManifestDocument) -> Option<ValidationError> {
    let missing = manifest.oauth()?.missing_fields();
    (!missing.is_empty()).then(|| {
        ValidationError::new(ErrorKey::MissingOauthFields)
            .with("missing_keys", missing.join(", "))
            .with("count", missing.len())
    })
}

fn parameter_errors(manifest: &ManifestDocument) -> Vec<ValidationError> {
    if manifest.original_parameters().is_some_and(|p| !p.is_array()) {
        return vec![ValidationError::new(ErrorKey::ParametersNotAnArray)];
    }
    let parameters = manifest.parameters();
    [
        duplicate_parameters_error(parameters),
        name_as_parameter_name_error(parameters),
        invalid_type_error(parameters),
        invalid_hidden_parameter_error(parameters),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn duplicate_parameters_error(parameters: &[Parameter]) -> Option<ValidationError> {
    let mut duplicates: Vec<&str> = Vec::new();
    for (i, parameter) in parameters.iter().enumerate() {
        let Some(name) = parameter.name.as_deref() else {
            continue;
        };
        let repeated = parameters[..i].iter().any(|p| p.name.as_deref() == Some(name));
        if repeated && !duplicates.contains(&name) {
            duplicates.push(name);
        }
    }
    (!duplicates.is_empty()).then(|| {
        ValidationError::new(ErrorKey::DuplicateParameters).with("duplicate_parameters", duplicates)
    })
}

fn name_as_parameter_name_error(parameters: &[Parameter]) -> Option<ValidationError> {
    parameters
        .iter()
        .any(|p| p.name.as_deref() == Some("name"))
        .then(|| ValidationError::new(ErrorKey::NameAsParameterName))
}

fn invalid_type_error(parameters: &[Parameter]) -> Option<ValidationError> {
    let invalid: Vec<&str> = parameters
        .iter()
        .filter(|p| !p.has_known_type())
        .map(|p| p.kind.as_str())
        .collect();
    (!invalid.is_empty()).then(|| {
        ValidationError::new(ErrorKey::InvalidTypeParameter)
            .with("invalid_types", invalid.join(", "))
            .with("count", invalid.len())
    })
}

fn invalid_hidden_parameter_error(parameters: &[Parameter]) -> Option<ValidationError> {
    let invalid: Vec<&str> = parameters
        .iter()
        .filter(|p| p.is_hidden() && p.required)
        .map(Parameter::name_or_empty)
        .collect();
    (!invalid.is_empty()).then(|| {
        ValidationError::new(ErrorKey::InvalidHiddenParameter)
            .with("invalid_params", invalid.join(", "))
            .with("count", invalid.len())
    })
}

fn no_template_error(manifest: &ManifestDocument) -> Option<ValidationError> {
    let valid = match manifest.no_template()? {
        Value::Bool(false) => true,
        Value::Array(names) => names
            .iter()
            .all(|n| n.as_str().and_then(Location::find_by_name).is_some()),
        _ => false,
    };
    (!valid).then(|| ValidationError::new(ErrorKey::InvalidNoTemplate))
}

/// `en`, `haw`, `pt-br`, `zh-Hant`. `\w` is ASCII-only.
static VALID_LOCALE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-z]{2,3}(-(?-u:\w){2,3})?$").expect("locale pattern compiles")
});

fn is_valid_locale(locale: &str) -> bool {
    VALID_LOCALE.is_match(locale)
}

fn default_locale_error<P: Package + ?Sized>(
    manifest: &ManifestDocument,
    package: &P,
) -> Option<ValidationError> {
    let declared = manifest.default_locale()?;
    let locale = match declared {
        Value::String(s) if is_valid_locale(s) => s,
        Value::String(s) => {
            return Some(
                ValidationError::new(ErrorKey::InvalidDefaultLocale)
                    .with("defaultLocale", s.as_str()),
            )
        }
        other => {
            return Some(
                ValidationError::new(ErrorKey::InvalidDefaultLocale)
                    .with("defaultLocale", other.to_string()),
            )
        }
    };
    let expected = format!("translations/{locale}.json");
    let present = package
        .translation_files()
        .iter()
        .any(|f| f.relative_path == expected);
    (!present).then(|| {
        ValidationError::new(ErrorKey::MissingTranslationFile)
            .with("defaultLocale", locale.as_str())
    })
}

fn ban_location(manifest: &ManifestDocument) -> Option<ValidationError> {
    manifest
        .has_location()
        .then(|| ValidationError::new(ErrorKey::NoLocationRequired))
}

fn ban_framework_version(manifest: &ManifestDocument) -> Option<ValidationError> {
    manifest
        .framework_version()
        .map(|_| ValidationError::new(ErrorKey::NoFrameworkVersionRequired))
}

fn missing_location_error<P: Package + ?Sized>(package: &P) -> Option<ValidationError> {
    (!package.has_location()).then(|| missing_keys(&["location"]))
}

/// Scan hosts in declaration order. An unknown host or a location its
/// product cannot host ends the scan; URI errors found before that stay.
fn invalid_location_errors<P: Package + ?Sized>(
    manifest: &ManifestDocument,
    package: &P,
) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    for (host, declarations) in manifest.locations_by_host() {
        let Some(product) = Product::find_by_host(host) else {
            errors.push(ValidationError::new(ErrorKey::InvalidHost).with("host_name", host));
            break;
        };

        let mut names: Vec<&str> = Vec::new();
        for declaration in &declarations {
            if !names.contains(&declaration.name.as_str()) {
                names.push(&declaration.name);
            }
        }
        let invalid: Vec<&str> = names
            .iter()
            .copied()
            .filter(|name| !product.hosts_location(name))
            .collect();
        if !invalid.is_empty() {
            errors.push(
                ValidationError::new(ErrorKey::InvalidLocation)
                    .with("invalid_locations", invalid.join(", "))
                    .with("host_name", host)
                    .with("count", invalid.len()),
            );
            break;
        }

        for (i, declaration) in declarations.iter().enumerate() {
            // Repeats of a name were already checked.
            if declarations[..i].iter().any(|d| d.name == declaration.name) {
                continue;
            }
            errors.extend(invalid_location_uri_error(package, &declaration.uri));
        }
    }
    errors
}

fn invalid_location_uri_error<P: Package + ?Sized>(
    package: &P,
    uri: &str,
) -> Option<ValidationError> {
    if uri == LEGACY_URI_STUB {
        return None;
    }
    let valid = match url::Url::parse(uri) {
        Ok(absolute) => absolute.scheme() == "https" || absolute.host_str() == Some("localhost"),
        Err(url::ParseError::RelativeUrlWithoutBase) => valid_relative_uri(package, uri),
        Err(_) => false,
    };
    (!valid).then(|| ValidationError::new(ErrorKey::InvalidLocationUri).with("uri", uri))
}

fn valid_relative_uri<P: Package + ?Sized>(package: &P, uri: &str) -> bool {
    let path = uri.split(|c| c == '?' || c == '#').next().unwrap_or(uri);
    !path.contains(char::is_whitespace) && path.starts_with("assets/") && package.has_file(path)
}

fn duplicate_location_error(manifest: &ManifestDocument) -> Option<ValidationError> {
    let duplicates = manifest.duplicate_locations();
    (!duplicates.is_empty()).then(|| {
        ValidationError::new(ErrorKey::DuplicateLocation)
            .with("duplicate_locations", duplicates.join(", "))
            .with("count", duplicates.len())
    })
}

fn missing_framework_version(manifest: &ManifestDocument) -> Option<ValidationError> {
    manifest
        .framework_version()
        .is_none()
        .then(|| ValidationError::new(ErrorKey::MissingFrameworkVersion))
}

/// A missing version is not servable either, so it reports here as well
/// as under `missing_framework_version`.
fn invalid_version_error<P: Package + ?Sized>(
    manifest: &ManifestDocument,
    package: &mut P,
    catalog: &Catalog,
) -> Option<ValidationError> {
    let version = manifest.framework_version();
    if version.as_ref().is_some_and(AppVersion::is_deprecated) {
        tracing::warn!(version = ?version, "manifest targets a deprecated framework version");
        package.add_warning(catalog.warning(DEPRECATED_VERSION_WARNING));
    }
    if version.as_ref().is_some_and(AppVersion::is_servable) {
        return None;
    }
    let target_version = version.map_or(Value::Null, |v| Value::from(v.as_str()));
    Some(
        ValidationError::new(ErrorKey::InvalidVersion)
            .with("target_version", target_version)
            .with("available_versions", AppVersion::available_versions()),
    )
}

fn framework_version_iframe_only<P: Package + ?Sized>(
    manifest: &ManifestDocument,
    package: &P,
) -> Option<ValidationError> {
    if !package.iframe_only() {
        return None;
    }
    let version = manifest
        .framework_version()
        .unwrap_or_else(|| AppVersion::new("0"));
    (!version.at_least(AppVersion::IFRAME_ONLY_MINIMUM))
        .then(|| ValidationError::new(ErrorKey::OldVersion))
}
