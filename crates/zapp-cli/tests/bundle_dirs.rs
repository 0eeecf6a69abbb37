//! # Bundle Directory Tests
//!
//! End-to-end checks of the `validate` subcommand over bundles written to
//! temporary directories.

use std::path::Path;

use serde_json::json;
use tempfile::TempDir;
use zapp_cli::package::DirPackage;
use zapp_cli::validate::{render_text, run_validate, validate_dirs, ValidateArgs};
use zapp_cli::OutputFormat;
use zapp_validation::{validate_package, Catalog, ErrorKey, Package};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn write(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

/// An iframe-only bundle that passes every validator.
fn valid_bundle() -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let manifest = json!({
        "name": "Sidebar Helper",
        "author": {"name": "Ada", "email": "ada@example.com"},
        "defaultLocale": "en",
        "location": {"support": {"ticket_sidebar": "assets/iframe.html"}},
        "frameworkVersion": "2.0"
    });
    write(dir.path(), "manifest.json", &manifest.to_string());
    write(dir.path(), "translations/en.json", "{}");
    write(dir.path(), "assets/iframe.html", "<html></html>");
    write(dir.path(), "requirements.json", r#"{"targets": {"t": {"title": "T"}}}"#);
    write(dir.path(), "templates/layout.hdbs", "<div>{{name}}</div>");
    dir
}

// ---------------------------------------------------------------------------
// 1. Directory package
// ---------------------------------------------------------------------------

#[test]
fn valid_bundle_passes() {
    let dir = valid_bundle();
    let mut package = DirPackage::open(dir.path()).unwrap();
    assert!(package.iframe_only());
    assert!(validate_package(&mut package).passed());
}

#[test]
fn translation_and_template_files_are_classified() {
    let dir = valid_bundle();
    write(dir.path(), "translations/notes.txt", "");
    let package = DirPackage::open(dir.path()).unwrap();
    let translations: Vec<String> = package
        .translation_files()
        .into_iter()
        .map(|f| f.relative_path)
        .collect();
    assert_eq!(translations, vec!["translations/en.json"]);
    assert_eq!(package.template_files().len(), 1);
    assert!(package.iframe_only());
}

#[test]
fn tmp_directory_is_not_part_of_the_bundle() {
    let dir = valid_bundle();
    write(dir.path(), "tmp/templates/debug.hdbs", "<style>");
    let mut package = DirPackage::open(dir.path()).unwrap();
    assert!(validate_package(&mut package).passed());
}

#[test]
fn failing_bundle_reports_in_order() {
    let dir = valid_bundle();
    write(dir.path(), "templates/layout.hdbs", "<style>p{}</style>");
    write(dir.path(), "requirements.json", r#"{"targets": {"t": {}}}"#);
    write(
        dir.path(),
        "manifest.json",
        &json!({
            "author": "Ada",
            "defaultLocale": "en",
            "location": "ticket_sidebar",
            "frameworkVersion": "1.0"
        })
        .to_string(),
    );
    let mut package = DirPackage::open(dir.path()).unwrap();
    assert_eq!(
        validate_package(&mut package).keys(),
        vec![
            ErrorKey::OldVersion,
            ErrorKey::MissingRequiredFields,
            ErrorKey::StyleInTemplate,
        ]
    );
}

// ---------------------------------------------------------------------------
// 2. validate subcommand
// ---------------------------------------------------------------------------

#[test]
fn outcomes_keep_argument_order() {
    let good = valid_bundle();
    let bad = tempfile::tempdir().unwrap();
    write(bad.path(), "README.md", "no manifest here");

    let outcomes = validate_dirs(
        &[bad.path().to_path_buf(), good.path().to_path_buf()],
        &Catalog::english(),
    )
    .unwrap();
    assert_eq!(outcomes.len(), 2);
    assert!(!outcomes[0].passed);
    assert_eq!(outcomes[0].errors[0].key, "missing_manifest");
    assert_eq!(outcomes[0].errors[0].message, "Could not find manifest.json");
    assert!(outcomes[1].passed);

    let text = render_text(&outcomes);
    assert!(text.contains(
        ": FAIL (1 error)\n  [fatal] missing_manifest: Could not find manifest.json\n"
    ));
    assert!(text.ends_with(": PASS\n"));
}

#[test]
fn deprecation_warning_reaches_the_outcome() {
    let dir = valid_bundle();
    write(dir.path(), "app.js", "var app = {};");
    write(
        dir.path(),
        "manifest.json",
        &json!({
            "author": "Ada",
            "defaultLocale": "en",
            "location": ["ticket_sidebar"],
            "frameworkVersion": "0.5"
        })
        .to_string(),
    );
    let outcomes = validate_dirs(&[dir.path().to_path_buf()], &Catalog::english()).unwrap();
    assert!(outcomes[0].passed);
    assert_eq!(outcomes[0].warnings.len(), 1);
}

#[test]
fn exit_codes() {
    let good = valid_bundle();
    let args = ValidateArgs {
        dirs: vec![good.path().to_path_buf()],
    };
    assert_eq!(run_validate(&args, OutputFormat::Json, &Catalog::english()).unwrap(), 0);

    let bad = tempfile::tempdir().unwrap();
    let args = ValidateArgs {
        dirs: vec![good.path().to_path_buf(), bad.path().to_path_buf()],
    };
    assert_eq!(run_validate(&args, OutputFormat::Text, &Catalog::english()).unwrap(), 1);
}

#[test]
fn unreadable_bundle_is_an_error() {
    let parent = tempfile::tempdir().unwrap();
    let args = ValidateArgs {
        dirs: vec![parent.path().join("does-not-exist")],
    };
    let err = run_validate(&args, OutputFormat::Text, &Catalog::english()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to read bundle"));
}
