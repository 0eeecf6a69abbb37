//! # zapp-cli: App Bundle Validator
//!
//! Provides the `zapp` command-line interface over `zapp-validation`.
//!
//! ## Subcommands
//!
//! - `zapp validate <DIR>...`: run every validator over bundle directories.
//! - `zapp registry`: print the products, locations, framework versions,
//!   and requirement types the validators check against.
//!
//! ```bash
//! zapp validate ./my_app
//! zapp -vv --format json validate ./app_one ./app_two
//! zapp --messages messages/de.yml validate ./my_app
//! ```
//!
//! ## Exit codes
//!
//! `0` every bundle passed, `1` at least one bundle failed validation,
//! `2` a bundle or catalog could not be read.

pub mod package;
pub mod registry;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use zapp_validation::Catalog;

/// Output format for subcommand results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON document on stdout.
    Json,
}

/// The English catalog, with the YAML file at `overrides` layered on top.
pub fn load_catalog(overrides: Option<&Path>) -> Result<Catalog> {
    let english = Catalog::english();
    let Some(path) = overrides else {
        return Ok(english);
    };
    let overrides = Catalog::load(path)
        .with_context(|| format!("failed to load message catalog {}", path.display()))?;
    Ok(english.merged(overrides))
}
