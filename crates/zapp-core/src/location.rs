//! # Location Registry
//!
//! Named UI placements within a host product.

use serde::Serialize;

use crate::error::RegistryError;
use crate::product::Product;
use crate::registry::Registry;

/// A named UI placement within a host product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Location {
    /// Stable location id. Matches persisted values; never reused.
    pub id: u32,
    /// Location name as written in manifests.
    pub name: &'static str,
    /// Whether apps in this location can be reordered by an admin.
    pub orderable: bool,
    /// Code of the hosting [`Product`].
    pub product_code: u32,
}

impl Location {
    /// The product hosting this location.
    ///
    /// Fails only if the registry itself is inconsistent.
    pub fn product(&self) -> Result<&'static Product, RegistryError> {
        Product::find_by(|p| p.code == self.product_code).ok_or(RegistryError::DanglingProduct {
            location: self.name,
            product_code: self.product_code,
        })
    }

    /// Every location hosted by the product with `product_code`.
    pub fn where_product(product_code: u32) -> Vec<&'static Location> {
        Self::filter_by(|l| l.product_code == product_code)
    }

    /// Look up a location by name, across all products.
    pub fn find_by_name(name: &str) -> Option<&'static Location> {
        Self::find_by(|l| l.name == name)
    }
}

impl Registry for Location {
    const NAME: &'static str = "location";

    fn all() -> &'static [Location] {
        LOCATIONS
    }
}

/// Every location, in id order.
///
/// The ids match the values persisted by the app platform. Do not change
/// them.
#[rustfmt::skip]
pub static LOCATIONS: &[Location] = &[
    Location { id: 1, orderable: true, name: "top_bar", product_code: Product::SUPPORT.code },
    Location { id: 2, orderable: true, name: "nav_bar", product_code: Product::SUPPORT.code },
    Location { id: 3, orderable: true, name: "ticket_sidebar", product_code: Product::SUPPORT.code },
    Location { id: 4, orderable: true, name: "new_ticket_sidebar", product_code: Product::SUPPORT.code },
    Location { id: 5, orderable: true, name: "user_sidebar", product_code: Product::SUPPORT.code },
    Location { id: 6, orderable: true, name: "organization_sidebar", product_code: Product::SUPPORT.code },
    Location { id: 7, orderable: false, name: "background", product_code: Product::SUPPORT.code },
    Location { id: 8, orderable: true, name: "chat_sidebar", product_code: Product::CHAT.code },
    Location { id: 9, orderable: false, name: "ticket_editor", product_code: Product::SUPPORT.code },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_location_resolves_its_product() {
        for location in Location::all() {
            assert!(location.product().is_ok(), "{} has no product", location.name);
        }
    }

    #[test]
    fn test_where_product_support() {
        let support = Location::where_product(Product::SUPPORT.code);
        assert_eq!(support.len(), 8);
        assert!(support.iter().all(|l| l.product_code == 1));
    }

    #[test]
    fn test_find_by_name() {
        let location = Location::find_by_name("chat_sidebar").unwrap();
        assert_eq!(location.id, 8);
        assert_eq!(location.product().unwrap(), &Product::CHAT);
        assert!(Location::find_by_name("side_panel").is_none());
    }

    #[test]
    fn test_dangling_product_is_reported() {
        let orphan = Location {
            id: 99,
            orderable: true,
            name: "orphan",
            product_code: 42,
        };
        assert_eq!(
            orphan.product(),
            Err(RegistryError::DanglingProduct {
                location: "orphan",
                product_code: 42,
            })
        );
    }
}
