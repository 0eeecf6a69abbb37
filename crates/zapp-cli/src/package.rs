//! # Directory Package
//!
//! [`DirPackage`] reads an unpacked app bundle from disk into memory and
//! serves it to the validators through the [`Package`] trait.
//!
//! The walk skips dotfiles and dot-directories anywhere in the tree, the
//! top-level `tmp/` directory, and symbolic links. Paths are stored
//! relative to the bundle root with `/` separators on every platform.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use zapp_validation::error::{PackageError, PackageResult};
use zapp_validation::{AppFile, Package};

/// Top-level directory holding build scratch files, never part of a bundle.
const TMP_DIR: &str = "tmp";

/// An app bundle loaded from a directory.
#[derive(Debug, Clone)]
pub struct DirPackage {
    root: PathBuf,
    files: BTreeMap<String, Vec<u8>>,
    warnings: Vec<String>,
}

impl DirPackage {
    /// Load every bundle file under `root`.
    pub fn open(root: &Path) -> PackageResult<Self> {
        let mut files = BTreeMap::new();
        walk(root, "", &mut files)?;
        tracing::debug!(root = %root.display(), files = files.len(), "loaded bundle directory");
        Ok(Self {
            root: root.to_path_buf(),
            files,
            warnings: Vec::new(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Relative paths of every loaded file, sorted.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }
}

fn io_error(path: &Path, source: std::io::Error) -> PackageError {
    PackageError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn walk(dir: &Path, prefix: &str, files: &mut BTreeMap<String, Vec<u8>>) -> PackageResult<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_error(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_error(dir, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            tracing::warn!(path = %entry.path().display(), "skipping non-UTF-8 file name");
            continue;
        };
        if name.starts_with('.') || (prefix.is_empty() && name == TMP_DIR) {
            continue;
        }

        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| io_error(&path, e))?;
        let relative = if prefix.is_empty() {
            name.to_string()
        } else {
            format!("{prefix}/{name}")
        };

        if file_type.is_symlink() {
            tracing::warn!(path = %path.display(), "skipping symbolic link");
        } else if file_type.is_dir() {
            walk(&path, &relative, files)?;
        } else if file_type.is_file() {
            let contents = std::fs::read(&path).map_err(|e| io_error(&path, e))?;
            files.insert(relative, contents);
        }
    }
    Ok(())
}

impl Package for DirPackage {
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
}
