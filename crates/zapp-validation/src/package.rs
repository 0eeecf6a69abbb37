//! # Package Collaborator
//!
//! Validators never touch the filesystem. They see an app bundle only
//! through the [`Package`] trait, which a caller implements over a
//! directory, an archive, or (in tests) an in-memory map.
//!
//! Implementors supply file access and the warning collector. Parsing of
//! `manifest.json` and `requirements.json` is provided.

use std::borrow::Cow;

use crate::document::{ManifestDocument, RequirementsDocument};
use crate::error::{ManifestParseError, PackageResult, RequirementsParseError};

/// Path of the manifest within a bundle.
pub const MANIFEST_PATH: &str = "manifest.json";

/// Path of the requirements file within a bundle.
pub const REQUIREMENTS_PATH: &str = "requirements.json";

/// Marker file of a bundle that ships its own JavaScript entry point.
/// Bundles without it are iframe-only.
pub const APP_JS_PATH: &str = "app.js";

/// One file of a bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppFile {
    /// Path relative to the bundle root, `/`-separated.
    pub relative_path: String,
    pub contents: Vec<u8>,
}

impl AppFile {
    pub fn new(relative_path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            relative_path: relative_path.into(),
            contents: contents.into(),
        }
    }

    /// The contents as text. Invalid UTF-8 is replaced, not rejected.
    pub fn read(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.contents)
    }

    pub fn is_translation(&self) -> bool {
        self.relative_path.starts_with("translations/") && self.relative_path.ends_with(".json")
    }

    pub fn is_template(&self) -> bool {
        self.relative_path.starts_with("templates/") && self.relative_path.ends_with(".hdbs")
    }
}

/// An app bundle as seen by the validators.
pub trait Package {
    /// Whether the bundle contains a file at `path`.
    fn has_file(&self, path: &str) -> bool;

    /// Read the file at `path` as UTF-8 text.
    fn read_file(&self, path: &str) -> PackageResult<String>;

    /// Every file in the bundle.
    fn files(&self) -> Vec<AppFile>;

    /// Warnings collected so far.
    fn warnings(&self) -> &[String];

    /// Append a warning. Warnings never fail validation.
    fn add_warning(&mut self, warning: String);

    /// Files under `translations/` ending in `.json`.
    fn translation_files(&self) -> Vec<AppFile> {
        self.files().into_iter().filter(AppFile::is_translation).collect()
    }

    /// Files under `templates/` ending in `.hdbs`.
    fn template_files(&self) -> Vec<AppFile> {
        self.files().into_iter().filter(AppFile::is_template).collect()
    }

    /// Whether the bundle runs only inside an iframe.
    fn iframe_only(&self) -> bool {
        !self.has_file(APP_JS_PATH)
    }

    /// Parse `manifest.json`.
    fn manifest(&self) -> Result<ManifestDocument, ManifestParseError> {
        let text = self.read_file(MANIFEST_PATH)?;
        ManifestDocument::parse(&text)
    }

    /// Whether the manifest declares a location. False when the manifest
    /// cannot be parsed.
    fn has_location(&self) -> bool {
        self.manifest().is_ok_and(|m| m.has_location())
    }

    fn has_requirements(&self) -> bool {
        self.has_file(REQUIREMENTS_PATH)
    }

    /// Parse `requirements.json` with duplicate-key detection.
    fn requirements_json(&self) -> Result<RequirementsDocument, RequirementsParseError> {
        let text = self.read_file(REQUIREMENTS_PATH)?;
        RequirementsDocument::parse(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_file_classification() {
        assert!(AppFile::new("translations/en.json", "{}").is_translation());
        assert!(!AppFile::new("translations/en.yml", "").is_translation());
        assert!(!AppFile::new("assets/translations/en.json", "").is_translation());
        assert!(AppFile::new("templates/layout.hdbs", "").is_template());
        assert!(!AppFile::new("templates/layout.html", "").is_template());
    }

    #[test]
    fn read_replaces_invalid_utf8() {
        let file = AppFile::new("templates/x.hdbs", vec![b'<', 0xff, b'>']);
        assert_eq!(file.read(), "<\u{fffd}>");
    }
}
