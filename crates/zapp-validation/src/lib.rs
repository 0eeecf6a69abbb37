//! # zapp-validation: App Bundle Validation
//!
//! Rule-based checks over an app bundle's `manifest.json`,
//! `requirements.json`, and templates. Validators read the bundle through
//! the [`Package`] trait and return a [`ValidationReport`] of keyed
//! [`ValidationError`] records; a [`Catalog`] renders those into text.
//!
//! ## Modules
//!
//! - [`document`]: typed views over the raw manifest and requirements JSON.
//! - [`json`]: JSON decoding that reports duplicate object keys.
//! - [`validate`]: the manifest, requirements, and template validators.
//! - [`report`]: error keys, error records, and ordered reports.
//! - [`messages`]: message templates, interpolation, YAML overrides.
//! - [`package`]: the bundle collaborator trait.
//!
//! ## Crate Policy
//!
//! - Validators never return `Err` and never panic on bundle contents.
//!   Every fault of the input becomes a [`ValidationError`].
//! - Reports are ordered. The same package yields the same report on every
//!   call.
//! - The only mutation a validator performs is appending a warning to the
//!   package.

pub mod document;
pub mod error;
pub mod json;
pub mod messages;
pub mod package;
pub mod report;
pub mod validate;

pub use document::{ManifestDocument, Parameter, RequirementsDocument};
pub use error::{CatalogError, ManifestParseError, PackageError, RequirementsParseError};
pub use messages::Catalog;
pub use package::{AppFile, Package};
pub use report::{ErrorKey, Severity, ValidationError, ValidationReport};
pub use validate::{validate_package, validate_package_with_catalog};
