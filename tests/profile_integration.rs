//! Integration tests for single-file profiling against the testdata fixtures.

use std::path::PathBuf;

use styleprint::analysis::StyleTag;
use styleprint::formatting::{IndentationKind, QuoteStyle};
use styleprint::report;
use styleprint::{profile_file, Language};

fn fixture(rel: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("testdata/project")
        .join(rel)
}

fn setup() {
    styleprint::init();
}

#[test]
fn test_python_file_naming() {
    setup();
    let report = profile_file(fixture("app/loader.py")).expect("fixture should load");

    assert_eq!(report.language, Some(Language::Python));
    assert!(report.parse_error.is_none());

    let naming = &report.naming;
    assert_eq!(naming.functions.get(StyleTag::SnakeCase), 1.0);
    assert_eq!(naming.classes.get(StyleTag::PascalCase), 1.0);
    assert_eq!(naming.constants.get(StyleTag::UpperSnakeCase), 1.0);
    // self, path, self, line are "other"; default_timeout is snake_case.
    assert_eq!(naming.variables.get(StyleTag::Other), 0.8);
    assert_eq!(naming.variables.get(StyleTag::SnakeCase), 0.2);
    // __init__ and _parse_line
    assert_eq!(naming.private_vars.get(StyleTag::SnakeCase), 1.0);
}

#[test]
fn test_python_file_patterns() {
    setup();
    let report = profile_file(fixture("app/loader.py")).expect("fixture should load");
    let patterns = report.patterns.expect("python files have patterns");

    assert_eq!(patterns.function_count, 3);
    assert_eq!(patterns.class_count, 1);
    assert_eq!(patterns.function_length.max, 2);
    assert_eq!(patterns.function_length.min, 1);
    assert_eq!(patterns.type_hint_usage.count, 1);
    assert_eq!(patterns.docstring_usage.count, 1);
    assert_eq!(patterns.branch_count, 1);
    assert_eq!(patterns.nested_function_count, 0);
    assert_eq!(patterns.max_function_depth, 1);
    assert!(patterns.complex_functions.is_empty());
}

#[test]
fn test_python_file_formatting() {
    setup();
    let report = profile_file(fixture("app/loader.py")).expect("fixture should load");
    let f = &report.formatting;

    assert_eq!(f.indentation_type, IndentationKind::Spaces);
    assert_eq!(f.indentation_size, 4);
    assert_eq!(f.quote_style, QuoteStyle::Double);
    assert!(f.trailing_newline);
    assert!(f.line_length_mean <= f.line_length_max);
}

#[test]
fn test_broken_file_keeps_formatting() {
    setup();
    let report = profile_file(fixture("app/broken.py")).expect("fixture should load");

    assert!(report.parse_error.is_some());
    assert!(report.naming.is_empty());
    assert!(report.patterns.is_none());
    assert_eq!(report.formatting.quote_style, QuoteStyle::Single);
}

#[test]
fn test_javascript_file_is_formatting_only() {
    setup();
    let report = profile_file(fixture("web/index.js")).expect("fixture should load");

    assert_eq!(report.language, Some(Language::JavaScript));
    assert!(report.patterns.is_none());
    assert!(report.naming.is_empty());
    assert_eq!(report.formatting.indentation_type, IndentationKind::Tabs);
    assert_eq!(report.formatting.quote_style, QuoteStyle::Single);
}

#[test]
fn test_file_json_rounds_for_display() {
    setup();
    let report = profile_file(fixture("app/loader.py")).expect("fixture should load");
    let json: serde_json::Value =
        serde_json::from_str(&report::file_report_json(&report).unwrap()).unwrap();

    // (1 + 2 + 2) / 3
    assert_eq!(json["patterns"]["function_length"]["mean"], 1.7);
    assert_eq!(json["patterns"]["type_hint_usage"]["rate"], 0.33);
    assert_eq!(json["language"], "python");
    assert_eq!(json["naming"]["constants"]["UPPER_SNAKE_CASE"], 1.0);
}
