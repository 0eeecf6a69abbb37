//! # Validate Subcommand
//!
//! Loads each bundle directory, runs every validator over it, and prints
//! the rendered report.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::{Map, Value};

use zapp_validation::{validate_package_with_catalog, Catalog, Package, Severity, ValidationReport};

use crate::package::DirPackage;
use crate::OutputFormat;

/// Arguments for the `zapp validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// App bundle directories to validate.
    #[arg(value_name = "DIR", required = true)]
    pub dirs: Vec<PathBuf>,
}

/// The validation result for one bundle, ready for output.
#[derive(Debug, Clone, Serialize)]
pub struct BundleOutcome {
    pub path: PathBuf,
    pub passed: bool,
    pub errors: Vec<RenderedError>,
    pub warnings: Vec<String>,
}

/// One error with its rendered message.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedError {
    pub key: String,
    pub severity: Severity,
    pub message: String,
    pub data: Map<String, Value>,
}

impl BundleOutcome {
    fn new(path: &Path, report: &ValidationReport, warnings: &[String], catalog: &Catalog) -> Self {
        let errors = report
            .iter()
            .map(|error| RenderedError {
                key: error.key().to_string(),
                severity: error.severity(),
                message: catalog.render(error),
                data: error.data().clone(),
            })
            .collect();
        Self {
            path: path.to_path_buf(),
            passed: report.passed(),
            errors,
            warnings: warnings.to_vec(),
        }
    }
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 when every bundle passed, 1 when any failed.
/// A bundle that cannot be read is an `Err`.
pub fn run_validate(args: &ValidateArgs, format: OutputFormat, catalog: &Catalog) -> Result<u8> {
    let outcomes = validate_dirs(&args.dirs, catalog)?;

    match format {
        OutputFormat::Text => print!("{}", render_text(&outcomes)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&outcomes).context("failed to serialize report")?
        ),
    }

    Ok(if outcomes.iter().all(|o| o.passed) { 0 } else { 1 })
}

/// Validate every directory in order.
pub fn validate_dirs(dirs: &[PathBuf], catalog: &Catalog) -> Result<Vec<BundleOutcome>> {
    dirs.iter()
        .map(|dir| {
            let mut package = DirPackage::open(dir)
                .with_context(|| format!("failed to read bundle {}", dir.display()))?;
            let report = validate_package_with_catalog(&mut package, catalog);
            tracing::info!(
                bundle = %dir.display(),
                errors = report.len(),
                "validated bundle"
            );
            Ok(BundleOutcome::new(dir, &report, package.warnings(), catalog))
        })
        .collect()
}

/// Human-readable rendering of outcomes.
pub fn render_text(outcomes: &[BundleOutcome]) -> String {
    let mut out = String::new();
    for outcome in outcomes {
        if outcome.passed {
            let _ = writeln!(out, "{}: PASS", outcome.path.display());
        } else {
            let _ = writeln!(
                out,
                "{}: FAIL ({} error{})",
                outcome.path.display(),
                outcome.errors.len(),
                if outcome.errors.len() == 1 { "" } else { "s" }
            );
        }
        for error in &outcome.errors {
            let _ = writeln!(out, "  [{}] {}: {}", error.severity, error.key, error.message);
        }
        for warning in &outcome.warnings {
            let _ = writeln!(out, "  WARN: {warning}");
        }
    }
    out
}
