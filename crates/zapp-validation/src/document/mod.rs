//! Typed views over the raw JSON documents of an app bundle.
//!
//! Documents are built once per validation call and never modified. They
//! keep the raw JSON so validators can inspect fields whose type is wrong
//! (a string where an array belongs, `null` where a value belongs), which
//! a strict `#[derive(Deserialize)]` model would reject outright.

pub mod manifest;
pub mod parameter;
pub mod requirements;

pub use manifest::{LocationDeclaration, ManifestDocument, OAuthConfig, LEGACY_URI_STUB};
pub use parameter::{Parameter, PARAMETER_TYPES};
pub use requirements::{RequirementEntry, RequirementsDocument};
