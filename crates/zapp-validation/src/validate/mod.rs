//! # Validators
//!
//! Each validator is a free function over a [`Package`] that returns a
//! [`ValidationReport`]. They are independent: a caller may run any subset.
//! [`validate_package`] runs all of them the way a bundle upload does.

pub mod manifest;
pub mod requirements;
pub mod templates;

use crate::messages::Catalog;
use crate::package::{Package, MANIFEST_PATH};
use crate::report::ValidationReport;

/// Run every validator and concatenate the reports.
///
/// The requirements and template validators only run when the bundle has a
/// manifest; without one the single `missing_manifest` error is the report.
pub fn validate_package<P: Package + ?Sized>(package: &mut P) -> ValidationReport {
    validate_package_with_catalog(package, &Catalog::english())
}

/// [`validate_package`], rendering warnings with `catalog`.
pub fn validate_package_with_catalog<P: Package + ?Sized>(
    package: &mut P,
    catalog: &Catalog,
) -> ValidationReport {
    let mut report = manifest::validate_with_catalog(package, catalog);
    if package.has_file(MANIFEST_PATH) {
        report.append(requirements::validate(&*package));
        report.append(templates::validate(&*package));
    }
    tracing::info!(
        errors = report.len(),
        warnings = package.warnings().len(),
        "package validation finished"
    );
    report
}
