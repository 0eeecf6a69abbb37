//! Template checks. Styles belong in `app.css`, not inline in a template.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::package::Package;
use crate::report::{ErrorKey, ValidationError, ValidationReport};

/// One `style_in_template` error per template containing a `<style` tag.
pub fn validate<P: Package + ?Sized>(package: &P) -> ValidationReport {
    let report: ValidationReport = package
        .template_files()
        .iter()
        .filter(|template| contains_style_tag(&template.read()))
        .map(|template| {
            ValidationError::new(ErrorKey::StyleInTemplate)
                .with("template", template.relative_path.as_str())
        })
        .collect();
    tracing::debug!(errors = report.len(), "template validation finished");
    report
}

/// `<`, optional whitespace, then `style` in any case as a whole word.
static STYLE_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i-u)<\s*style\b").expect("style tag pattern compiles"));

fn contains_style_tag(source: &str) -> bool {
    STYLE_TAG.is_match(source)
}
