//! # zapp-core: Reference Data for App Bundle Validation
//!
//! This crate holds the frozen registries every validator reads from. It
//! depends on nothing internal; every other `zapp-*` crate depends on it.
//!
//! ## Contents
//!
//! - **Products** ([`Product`]): client products that can host an app.
//! - **Locations** ([`Location`]): named UI placements within a product.
//! - **Framework versions** ([`AppVersion`]): which framework versions are
//!   served, which one is deprecated, and dotted version comparison.
//! - **Requirement types** ([`RequirementType`]): the closed set of
//!   top-level keys accepted in `requirements.json`.
//!
//! ## Crate Policy
//!
//! - Registries are `static` slices of `const` values. There is no
//!   initialization step and nothing can mutate them.
//! - The ids and codes below match values persisted elsewhere. Never
//!   renumber or reuse them.
//! - No `panic!()` or `.unwrap()` outside tests. A broken registry surfaces
//!   as a [`RegistryError`] from [`verify_registry`].

pub mod error;
pub mod location;
pub mod product;
pub mod registry;
pub mod requirement;
pub mod version;

// Re-export primary types for ergonomic imports.
pub use error::{RegistryError, ZappError};
pub use location::{Location, LOCATIONS};
pub use product::{Product, PRODUCTS};
pub use registry::{verify_registry, Registry};
pub use requirement::{RequirementType, MAX_REQUIREMENTS};
pub use version::AppVersion;
