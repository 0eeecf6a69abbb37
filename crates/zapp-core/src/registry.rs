//! # Frozen Registries
//!
//! Shared lookup helpers for the `static` registries in this crate, plus
//! [`verify_registry`], the integrity check run once at process start.

use std::collections::HashSet;

use crate::error::RegistryError;
use crate::location::Location;
use crate::product::Product;

/// A registry of immutable entries known at compile time.
///
/// Implementors only provide [`Registry::all`]; lookups are derived from it.
pub trait Registry: Sized + 'static {
    /// Registry name used in error messages.
    const NAME: &'static str;

    /// Every entry, in registry order.
    fn all() -> &'static [Self];

    /// First entry matching `predicate`, if any.
    fn find_by<P>(predicate: P) -> Option<&'static Self>
    where
        P: Fn(&Self) -> bool,
    {
        Self::all().iter().find(|entry| predicate(entry))
    }

    /// First entry matching `predicate`, or a [`RegistryError::NotFound`]
    /// naming `criteria`.
    ///
    /// Used for lookups that must succeed; a miss means the registry itself
    /// is broken.
    fn find_by_or_fail<P>(predicate: P, criteria: &str) -> Result<&'static Self, RegistryError>
    where
        P: Fn(&Self) -> bool,
    {
        Self::find_by(predicate).ok_or_else(|| RegistryError::NotFound {
            registry: Self::NAME,
            criteria: criteria.to_string(),
        })
    }

    /// Every entry matching `predicate`, in registry order.
    fn filter_by<P>(predicate: P) -> Vec<&'static Self>
    where
        P: Fn(&Self) -> bool,
    {
        Self::all().iter().filter(|entry| predicate(entry)).collect()
    }
}

/// Check the registries for internal consistency.
///
/// - Product codes are unique.
/// - Location ids are unique.
/// - Every location references an existing product.
///
/// Callers run this once at startup so a broken registry fails fast instead
/// of producing silently wrong validation results.
pub fn verify_registry() -> Result<(), RegistryError> {
    let mut codes = HashSet::new();
    for product in Product::all() {
        if !codes.insert(product.code) {
            return Err(RegistryError::DuplicateId {
                registry: Product::NAME,
                id: product.code,
            });
        }
    }

    let mut ids = HashSet::new();
    for location in Location::all() {
        if !ids.insert(location.id) {
            return Err(RegistryError::DuplicateId {
                registry: Location::NAME,
                id: location.id,
            });
        }
        location.product()?;
    }

    Ok(())
}
