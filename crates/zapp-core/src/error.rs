//! # Error Types
//!
//! Errors raised by the reference data layer. All errors use `thiserror`
//! for derive-based `Display` and `Error` implementations.

use thiserror::Error;

/// Top-level error type for `zapp-core`.
#[derive(Error, Debug)]
pub enum ZappError {
    /// A registry lookup or integrity check failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A requirement type string did not name a known type.
    #[error("unknown requirement type: {0:?}")]
    UnknownRequirementType(String),
}

/// Error raised when a frozen registry cannot satisfy a lookup that must
/// succeed, or when the registry contents are inconsistent.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A mandatory lookup found no entry.
    #[error("no {registry} matches {criteria}")]
    NotFound {
        /// Registry that was searched ("product", "location").
        registry: &'static str,
        /// Human-readable description of the lookup.
        criteria: String,
    },

    /// A location references a product code that does not exist.
    #[error("location {location:?} references unknown product code {product_code}")]
    DanglingProduct {
        /// Name of the offending location.
        location: &'static str,
        /// Product code that failed to resolve.
        product_code: u32,
    },

    /// Two entries of one registry share an identifier.
    #[error("duplicate {registry} identifier {id}")]
    DuplicateId {
        /// Registry containing the duplicate.
        registry: &'static str,
        /// The repeated identifier.
        id: u32,
    },
}
