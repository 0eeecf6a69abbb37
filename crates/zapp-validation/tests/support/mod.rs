//! In-memory [`Package`] for validator tests.

#![allow(dead_code)]

use std::collections::BTreeMap;

use serde_json::{json, Value};
use zapp_validation::error::{PackageError, PackageResult};
use zapp_validation::{AppFile, Package};

/// A bundle held entirely in memory.
#[derive(Debug, Clone, Default)]
pub struct FakePackage {
    files: BTreeMap<String, Vec<u8>>,
    warnings: Vec<String>,
    has_location: Option<bool>,
}

impl FakePackage {
    pub fn new() -> Self {
        Self::default()
    }

    /// A bundle every validator accepts: an iframe-only app on framework
    /// 2.0 with one sidebar location served from its own assets.
    pub fn valid() -> Self {
        Self::new()
            .with_manifest(valid_manifest())
            .with_file("translations/en.json", "{}")
            .with_file("assets/iframe.html", "<html></html>")
    }

    pub fn with_file(mut self, path: &str, contents: impl Into<Vec<u8>>) -> Self {
        self.files.insert(path.to_string(), contents.into());
        self
    }

    pub fn without_file(mut self, path: &str) -> Self {
        self.files.remove(path);
        self
    }

    pub fn with_manifest(self, manifest: Value) -> Self {
        self.with_file("manifest.json", manifest.to_string())
    }

    /// Install the valid manifest with `fields` replaced; a `null` value
    /// removes the field.
    pub fn with_manifest_fields(self, fields: Value) -> Self {
        let mut manifest = valid_manifest();
        let target = manifest.as_object_mut().expect("manifest is an object");
        for (key, value) in fields.as_object().expect("fields is an object") {
            if value.is_null() {
                target.remove(key);
            } else {
                target.insert(key.clone(), value.clone());
            }
        }
        self.with_manifest(manifest)
    }

    pub fn with_requirements(self, text: &str) -> Self {
        self.with_file("requirements.json", text)
    }

    /// Force `has_location()` instead of deriving it from the manifest.
    pub fn with_has_location(mut self, has_location: bool) -> Self {
        self.has_location = Some(has_location);
        self
    }
}

pub fn valid_manifest() -> Value {
    json!({
        "name": "Sidebar Helper",
        "author": {"name": "Ada", "email": "ada@example.com"},
        "defaultLocale": "en",
        "private": true,
        "location": {"support": {"ticket_sidebar": "assets/iframe.html"}},
        "frameworkVersion": "2.0"
    })
}

impl Package for FakePackage {
    fn has_file(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    fn read_file(&self, path: &str) -> PackageResult<String> {
        let bytes = self.files.get(path).ok_or_else(|| PackageError::NotFound {
            path: path.to_string(),
        })?;
        String::from_utf8(bytes.clone()).map_err(|_| PackageError::NotUtf8 {
            path: path.to_string(),
        })
    }

    fn files(&self) -> Vec<AppFile> {
        self.files
            .iter()
            .map(|(path, contents)| AppFile::new(path.as_str(), contents.clone()))
            .collect()
    }

    fn warnings(&self) -> &[String] {
        &self.warnings
    }

    fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    fn has_location(&self) -> bool {
        self.has_location
            .unwrap_or_else(|| self.manifest().is_ok_and(|m| m.has_location()))
    }
}
