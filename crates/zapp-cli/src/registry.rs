//! # Registry Subcommand
//!
//! Prints the reference data the validators check manifests against.

use std::fmt::Write as _;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use zapp_core::{AppVersion, Location, Product, Registry, RequirementType, MAX_REQUIREMENTS};

use crate::OutputFormat;

/// Arguments for the `zapp registry` subcommand.
#[derive(Args, Debug)]
pub struct RegistryArgs {
    /// Only list locations hosted by this product (current or legacy name).
    #[arg(long, value_name = "NAME")]
    pub product: Option<String>,
}

/// Serializable view of the registries.
#[derive(Debug, Clone, Serialize)]
pub struct RegistrySnapshot {
    pub products: Vec<&'static Product>,
    pub locations: Vec<&'static Location>,
    pub framework_versions: FrameworkVersions,
    pub requirement_types: &'static [RequirementType],
    pub max_requirements: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct FrameworkVersions {
    pub deprecated: &'static str,
    pub current: &'static str,
    pub future: &'static str,
    pub served: &'static [&'static str],
}

/// Build the snapshot, optionally narrowed to one product.
pub fn registry_snapshot(product: Option<&str>) -> Result<RegistrySnapshot> {
    let (products, locations) = match product {
        Some(host) => {
            let product = Product::find_by_or_fail(
                |p| p.name == host || p.legacy_name == host,
                &format!("name or legacy name {host:?}"),
            )
            .context("unknown product")?;
            (vec![product], product.locations())
        }
        None => (
            Product::all().iter().collect(),
            Location::all().iter().collect(),
        ),
    };
    Ok(RegistrySnapshot {
        products,
        locations,
        framework_versions: FrameworkVersions {
            deprecated: AppVersion::DEPRECATED,
            current: AppVersion::CURRENT,
            future: AppVersion::FUTURE,
            served: AppVersion::TO_BE_SERVED,
        },
        requirement_types: RequirementType::all(),
        max_requirements: MAX_REQUIREMENTS,
    })
}

/// Execute the registry subcommand.
pub fn run_registry(args: &RegistryArgs, format: OutputFormat) -> Result<u8> {
    let snapshot = registry_snapshot(args.product.as_deref())?;
    match format {
        OutputFormat::Text => print!("{}", render_text(&snapshot)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&snapshot).context("failed to serialize registry")?
        ),
    }
    Ok(0)
}

fn render_text(snapshot: &RegistrySnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Products:");
    for p in &snapshot.products {
        let _ = writeln!(out, "  {:>2}  {} (legacy: {})", p.code, p.name, p.legacy_name);
    }
    let _ = writeln!(out, "Locations:");
    for l in &snapshot.locations {
        let product = l.product().map(|p| p.name).unwrap_or("?");
        let orderable = if l.orderable { "" } else { ", not orderable" };
        let _ = writeln!(out, "  {:>2}  {} ({product}{orderable})", l.id, l.name);
    }
    let _ = writeln!(
        out,
        "Framework versions: {} (deprecated: {}, current: {})",
        snapshot.framework_versions.served.join(", "),
        snapshot.framework_versions.deprecated,
        snapshot.framework_versions.current,
    );
    let types: Vec<&str> = snapshot.requirement_types.iter().map(|t| t.as_str()).collect();
    let _ = writeln!(
        out,
        "Requirement types (max {} entries): {}",
        snapshot.max_requirements,
        types.join(", ")
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_snapshot() {
        let snapshot = registry_snapshot(None).unwrap();
        assert_eq!(snapshot.products.len(), 3);
        assert_eq!(snapshot.locations.len(), 9);
        assert_eq!(snapshot.max_requirements, 5000);
    }

    #[test]
    fn snapshot_for_legacy_product_name() {
        let snapshot = registry_snapshot(Some("zopim")).unwrap();
        assert_eq!(snapshot.products, vec![&Product::CHAT]);
        let names: Vec<&str> = snapshot.locations.iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["chat_sidebar"]);
    }

    #[test]
    fn unknown_product_is_an_error() {
        let err = registry_snapshot(Some("helpdesk")).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("unknown product"), "{message}");
        assert!(message.contains("helpdesk"), "{message}");
    }

    #[test]
    fn json_uses_snake_case_types() {
        let value = serde_json::to_value(registry_snapshot(None).unwrap()).unwrap();
        assert_eq!(value["requirement_types"][1], "channel_integrations");
        assert_eq!(value["products"][0]["legacy_name"], "zendesk");
        assert_eq!(value["framework_versions"]["served"][2], "2.0");
    }

    #[test]
    fn text_lists_every_section() {
        let text = render_text(&registry_snapshot(Some("support")).unwrap());
        assert!(text.contains("support (legacy: zendesk)"));
        assert!(text.contains("background (support, not orderable)"));
        assert!(!text.contains("chat_sidebar"));
        assert!(text.contains("Framework versions: 0.5, 1.0, 2.0"));
    }
}
