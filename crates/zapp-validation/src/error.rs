//! Validation-layer error types.
//!
//! These are faults of the inputs or of the package collaborator, never rule
//! violations. Validators convert every one of them into a keyed
//! [`ValidationError`](crate::report::ValidationError) at their boundary.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a [`Package`](crate::package::Package) implementation.
#[derive(Debug, Error)]
pub enum PackageError {
    /// The package has no file at this relative path.
    #[error("file not found in package: {path}")]
    NotFound { path: String },

    /// The file exists but is not valid UTF-8 text.
    #[error("file is not valid UTF-8: {path}")]
    NotUtf8 { path: String },

    /// Reading the bundle from disk failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Errors raised while turning `manifest.json` into a
/// [`ManifestDocument`](crate::document::ManifestDocument).
#[derive(Debug, Error)]
pub enum ManifestParseError {
    /// The manifest could not be read from the package.
    #[error(transparent)]
    Read(#[from] PackageError),

    /// The manifest is not well-formed JSON.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// The manifest parsed but its top level is not a JSON object.
    #[error("expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },
}

/// Errors raised while turning `requirements.json` into a
/// [`RequirementsDocument`](crate::document::RequirementsDocument).
#[derive(Debug, Error)]
pub enum RequirementsParseError {
    /// The requirements file could not be read from the package.
    #[error(transparent)]
    Read(#[from] PackageError),

    /// The requirements file is not well-formed JSON.
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// The requirements file parsed but its top level is not a JSON object.
    #[error("expected a JSON object at the top level, found {found}")]
    NotAnObject { found: &'static str },

    /// At least one JSON object declares the same key twice.
    #[error("duplicate keys: {}", keys.join(", "))]
    DuplicateKeys { keys: Vec<String> },
}

/// Errors raised while loading a message catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read message catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The catalog is not a YAML mapping of keys to templates.
    #[error("failed to parse message catalog: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias for package operations.
pub type PackageResult<T> = Result<T, PackageError>;

/// Convenience alias for catalog loading.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Name of a JSON value's type, for diagnostics.
pub(crate) fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
