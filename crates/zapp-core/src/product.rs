//! # Product Registry
//!
//! Client products capable of hosting app locations. Manifests may name a
//! product by its current name or by its legacy name.

use serde::Serialize;

use crate::location::Location;
use crate::registry::Registry;

/// A client product that can host app locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Product {
    /// Stable product code. Matches persisted values; never reused.
    pub code: u32,
    /// Current product name, used as the manifest host key.
    pub name: &'static str,
    /// Name the product had before the rename; still accepted as a host key.
    pub legacy_name: &'static str,
}

impl Product {
    /// The ticketing product. Default host for legacy location lists.
    pub const SUPPORT: Product = Product {
        code: 1,
        name: "support",
        legacy_name: "zendesk",
    };

    /// The embedded chat product.
    pub const CHAT: Product = Product {
        code: 2,
        name: "chat",
        legacy_name: "zopim",
    };

    /// The standalone chat product.
    pub const STANDALONE_CHAT: Product = Product {
        code: 3,
        name: "standalone_chat",
        legacy_name: "lotus_box",
    };

    /// Look up a product by its current name.
    pub fn find_by_name(name: &str) -> Option<&'static Product> {
        Self::find_by(|p| p.name == name)
    }

    /// Look up a product by its legacy name.
    pub fn find_by_legacy_name(legacy_name: &str) -> Option<&'static Product> {
        Self::find_by(|p| p.legacy_name == legacy_name)
    }

    /// Resolve a manifest host key to a product.
    ///
    /// Legacy names are tried first, then current names.
    pub fn find_by_host(host: &str) -> Option<&'static Product> {
        Self::find_by_legacy_name(host).or_else(|| Self::find_by_name(host))
    }

    /// Locations this product can host, in registry order.
    pub fn locations(&self) -> Vec<&'static Location> {
        Location::where_product(self.code)
    }

    /// Whether `location_name` is a valid location for this product.
    pub fn hosts_location(&self, location_name: &str) -> bool {
        Location::all()
            .iter()
            .any(|l| l.product_code == self.code && l.name == location_name)
    }
}

impl Registry for Product {
    const NAME: &'static str = "product";

    fn all() -> &'static [Product] {
        PRODUCTS
    }
}

impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)
    }
}

/// Every product, in code order.
///
/// The codes match the values persisted by the app platform. Do not change
/// them.
pub static PRODUCTS: &[Product] = &[Product::SUPPORT, Product::CHAT, Product::STANDALONE_CHAT];
