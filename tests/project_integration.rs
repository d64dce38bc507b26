//! Integration tests for project runs against the testdata fixtures.

use std::fs;
use std::path::PathBuf;

use styleprint::analysis::StyleTag;
use styleprint::formatting::{IndentationKind, QuoteStyle};
use styleprint::report;
use styleprint::{DiscoveryConfig, Language, ProjectReport, Runner, WarningKind};
use tempfile::TempDir;

fn project_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("testdata/project")
}

fn run_project() -> ProjectReport {
    styleprint::init();
    Runner::new(project_path())
        .run()
        .expect("project run should succeed")
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_project_counts() {
    let report = run_project();

    assert_eq!(report.project, "project");
    // broken.py, legacy.py, loader.py, index.js; node_modules and README skipped.
    assert_eq!(report.total_files, 4);
    assert_eq!(report.languages.len(), 2);
    assert_eq!(report.languages[&Language::Python].file_count, 3);
    assert_eq!(report.languages[&Language::JavaScript].file_count, 1);
}

#[test]
fn test_project_naming_is_averaged_per_file() {
    let report = run_project();
    let naming = &report.languages[&Language::Python].naming;

    // legacy.py is all camelCase, loader.py all snake_case, broken.py absent.
    assert!(approx(naming.functions.get(StyleTag::SnakeCase), 0.5));
    assert!(approx(naming.functions.get(StyleTag::CamelCase), 0.5));

    assert!(approx(naming.variables.get(StyleTag::CamelCase), 0.5));
    assert!(approx(naming.variables.get(StyleTag::Other), 0.4));
    assert!(approx(naming.variables.get(StyleTag::SnakeCase), 0.1));

    assert!(approx(naming.classes.get(StyleTag::PascalCase), 1.0));
}

#[test]
fn test_project_formatting() {
    let report = run_project();

    let python = &report.languages[&Language::Python].formatting;
    assert_eq!(python.indentation_type, IndentationKind::Spaces);
    assert_eq!(python.indentation_size, 4);
    // broken.py and legacy.py use single quotes, loader.py double.
    assert_eq!(python.quote_style, QuoteStyle::Single);
    assert!(python.trailing_newline);

    let js = &report.languages[&Language::JavaScript].formatting;
    assert_eq!(js.indentation_type, IndentationKind::Tabs);
}

#[test]
fn test_project_warnings() {
    let report = run_project();

    assert_eq!(report.warnings.len(), 1);
    assert_eq!(report.warnings[0].kind, WarningKind::Parse);
    assert!(report.warnings[0].file.ends_with("broken.py"));
}

#[test]
fn test_project_extension_filter() {
    styleprint::init();
    let config = DiscoveryConfig::default()
        .with_extensions(&["js".to_string()])
        .unwrap();
    let report = Runner::new(project_path()).config(config).run().unwrap();

    assert_eq!(report.total_files, 1);
    assert!(report.languages.contains_key(&Language::JavaScript));
    assert!(!report.languages.contains_key(&Language::Python));
}

#[test]
fn test_project_json_shape() {
    let report = run_project();
    let json: serde_json::Value =
        serde_json::from_str(&report::project_report_json(&report).unwrap()).unwrap();

    assert_eq!(json["total_files"], 4);
    assert_eq!(json["languages"]["python"]["naming"]["functions"]["snake_case"], 0.5);
    assert_eq!(json["languages"]["javascript"]["file_count"], 1);
    assert_eq!(json["warnings"][0]["kind"], "parse");
}

#[test]
fn test_excluded_only_directory_is_empty_report() {
    let temp = TempDir::new().unwrap();
    let vendored = temp.path().join("vendor");
    fs::create_dir(&vendored).unwrap();
    fs::write(vendored.join("lib.py"), "x = 1\n").unwrap();

    let report = Runner::new(temp.path()).run().unwrap();
    assert_eq!(report.total_files, 0);
    assert!(report.languages.is_empty());
    assert!(report.warnings.is_empty());
}

#[test]
fn test_identical_runs_are_identical() {
    let first = run_project();
    let second = run_project();
    assert_eq!(first, second);
}
