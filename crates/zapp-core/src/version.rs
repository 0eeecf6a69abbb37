//! # Framework Version Policy
//!
//! Which framework versions the platform serves, which one is deprecated,
//! and how two version strings compare.
//!
//! Versions compare segment by segment on `.`. Numeric segments compare as
//! integers, so `"10.0" > "9.1"`. Missing trailing segments count as zero,
//! so `"2" == "2.0"`. A non-numeric segment (`"2.0.beta"`) sorts before any
//! numeric one at the same position, which makes pre-releases lower than
//! the release they lead up to.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// A framework version as declared by a manifest's `frameworkVersion`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppVersion(String);

impl AppVersion {
    /// Still served, but apps targeting it get a deprecation warning.
    pub const DEPRECATED: &'static str = "0.5";
    /// The version new apps should target.
    pub const CURRENT: &'static str = "1.0";
    /// The iframe-only framework.
    pub const FUTURE: &'static str = "2.0";
    /// Every version the platform currently serves, oldest first.
    pub const TO_BE_SERVED: &'static [&'static str] =
        &[Self::DEPRECATED, Self::CURRENT, Self::FUTURE];
    /// Lowest version an iframe-only app may target.
    pub const IFRAME_ONLY_MINIMUM: &'static str = "2.0";

    /// Wrap a version string. No validation happens here.
    pub fn new(version: impl Into<String>) -> Self {
        Self(version.into())
    }

    /// The version string as declared.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the platform serves this exact version string.
    pub fn is_servable(&self) -> bool {
        Self::TO_BE_SERVED.contains(&self.0.as_str())
    }

    /// Whether this is the deprecated (but still served) version.
    pub fn is_deprecated(&self) -> bool {
        self.0 == Self::DEPRECATED
    }

    /// Whether this version is at least `minimum` under dotted comparison.
    pub fn at_least(&self, minimum: &str) -> bool {
        compare_versions(&self.0, minimum) != Ordering::Less
    }

    /// Order this version against `other` under dotted comparison.
    ///
    /// Not an `Ord` impl: `"2"` and `"2.0"` compare equal here but are
    /// different declared strings.
    pub fn compare(&self, other: &AppVersion) -> Ordering {
        compare_versions(&self.0, &other.0)
    }

    /// The servable versions joined for display, e.g. `"0.5, 1.0, 2.0"`.
    pub fn available_versions() -> String {
        Self::TO_BE_SERVED.join(", ")
    }
}

impl std::fmt::Display for AppVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Segment<'a> {
    // Declaration order gives text < number.
    Text(&'a str),
    Number(u64),
}

fn segments(version: &str) -> Vec<Segment<'_>> {
    version
        .trim()
        .split('.')
        .filter(|s| !s.is_empty())
        .map(|s| match s.parse::<u64>() {
            Ok(n) => Segment::Number(n),
            Err(_) => Segment::Text(s),
        })
        .collect()
}

/// Compare two version strings using dotted segment ordering.
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let left = segments(left);
    let right = segments(right);
    let len = left.len().max(right.len());
    for i in 0..len {
        let ordering = match (left.get(i), right.get(i)) {
            (Some(l), Some(r)) => l.cmp(r),
            // A missing segment is zero against a number, and a release
            // against text.
            (Some(Segment::Number(n)), None) => n.cmp(&0),
            (None, Some(Segment::Number(n))) => 0.cmp(n),
            (Some(Segment::Text(_)), None) => Ordering::Less,
            (None, Some(Segment::Text(_))) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_servable_versions() {
        assert!(AppVersion::new("0.5").is_servable());
        assert!(AppVersion::new("1.0").is_servable());
        assert!(AppVersion::new("2.0").is_servable());
        assert!(!AppVersion::new("0.7").is_servable());
        assert!(!AppVersion::new("1").is_servable()); // exact string match
    }

    #[test]
    fn test_deprecated() {
        assert!(AppVersion::new(AppVersion::DEPRECATED).is_deprecated());
        assert!(!AppVersion::new(AppVersion::CURRENT).is_deprecated());
    }

    #[test]
    fn test_available_versions() {
        assert_eq!(AppVersion::available_versions(), "0.5, 1.0, 2.0");
    }

    #[test]
    fn test_compare_numeric_segments() {
        assert_eq!(compare_versions("1.0", "2.0"), Ordering::Less);
        assert_eq!(compare_versions("10.0", "9.1"), Ordering::Greater);
        assert_eq!(compare_versions("2", "2.0"), Ordering::Equal);
        assert_eq!(compare_versions("2.0.0", "2"), Ordering::Equal);
        assert_eq!(compare_versions("2.0.1", "2.0"), Ordering::Greater);
    }

    #[test]
    fn test_prerelease_sorts_before_release() {
        assert_eq!(compare_versions("2.0.beta", "2.0"), Ordering::Less);
        assert_eq!(compare_versions("2.0", "2.0.beta"), Ordering::Greater);
        assert_eq!(compare_versions("2.1.beta", "2.0"), Ordering::Greater);
    }

    #[test]
    fn test_at_least() {
        assert!(AppVersion::new("2.0").at_least(AppVersion::IFRAME_ONLY_MINIMUM));
        assert!(AppVersion::new("2.1").at_least(AppVersion::IFRAME_ONLY_MINIMUM));
        assert!(!AppVersion::new("1.0").at_least(AppVersion::IFRAME_ONLY_MINIMUM));
        assert!(!AppVersion::new("").at_least(AppVersion::IFRAME_ONLY_MINIMUM));
    }

    #[test]
    fn test_compare_sorts_versions() {
        let mut versions = vec![
            AppVersion::new("2.0"),
            AppVersion::new("0.5"),
            AppVersion::new("1.0"),
        ];
        versions.sort_by(AppVersion::compare);
        let sorted: Vec<&str> = versions.iter().map(AppVersion::as_str).collect();
        assert_eq!(sorted, vec!["0.5", "1.0", "2.0"]);
    }
}
