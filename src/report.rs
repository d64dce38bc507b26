//! Output formatting for style profiles.
//!
//! Supports two output formats:
//! - JSON: structured output for programmatic consumption
//! - Pretty: colored terminal summary for human readability
//!
//! Shares and rates are rounded to two decimals and the mean function length
//! to one decimal here, at the rendering boundary only.

use colored::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::aggregate::{FileWarning, ProjectReport};
use crate::analysis::{
    round_to, LengthStats, NamingDistribution, NamingProfile, Role, StructuralMetrics, Usage,
    COMPLEX_FUNCTION_THRESHOLD,
};
use crate::formatting::FormattingProfile;
use crate::profile::FileReport;

const SHARE_PLACES: i32 = 2;
const MEAN_PLACES: i32 = 1;

// =============================================================================
// JSON Format
// =============================================================================

/// JSON form of a single-file profile.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonFileReport {
    pub file_path: String,
    pub language: String,
    pub naming: NamingProfile,
    pub formatting: FormattingProfile,
    pub patterns: Option<StructuralMetrics>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parse_error: Option<String>,
}

/// JSON form of a project summary.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonProjectReport {
    pub project: String,
    pub total_files: usize,
    pub languages: BTreeMap<String, JsonLanguageSummary>,
    pub warnings: Vec<JsonWarning>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonLanguageSummary {
    pub file_count: usize,
    pub naming: NamingProfile,
    pub formatting: FormattingProfile,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonWarning {
    pub file: String,
    pub kind: String,
    pub message: String,
}

impl From<&FileReport> for JsonFileReport {
    fn from(report: &FileReport) -> Self {
        Self {
            file_path: report.file_path.clone(),
            language: report.language_id().to_string(),
            naming: report.naming.rounded(SHARE_PLACES),
            formatting: report.formatting.clone(),
            patterns: report.patterns.as_ref().map(round_metrics),
            parse_error: report.parse_error.clone(),
        }
    }
}

impl From<&ProjectReport> for JsonProjectReport {
    fn from(report: &ProjectReport) -> Self {
        Self {
            project: report.project.clone(),
            total_files: report.total_files,
            languages: report
                .languages
                .iter()
                .map(|(lang, summary)| {
                    (
                        lang.as_str().to_string(),
                        JsonLanguageSummary {
                            file_count: summary.file_count,
                            naming: summary.naming.rounded(SHARE_PLACES),
                            formatting: summary.formatting.clone(),
                        },
                    )
                })
                .collect(),
            warnings: report.warnings.iter().map(warning_to_json).collect(),
        }
    }
}

fn warning_to_json(w: &FileWarning) -> JsonWarning {
    JsonWarning {
        file: w.file.clone(),
        kind: w.kind.as_str().to_string(),
        message: w.message.clone(),
    }
}

fn round_metrics(m: &StructuralMetrics) -> StructuralMetrics {
    StructuralMetrics {
        function_length: LengthStats {
            mean: round_to(m.function_length.mean, MEAN_PLACES),
            ..m.function_length.clone()
        },
        type_hint_usage: round_usage(&m.type_hint_usage),
        docstring_usage: round_usage(&m.docstring_usage),
        ..m.clone()
    }
}

fn round_usage(u: &Usage) -> Usage {
    Usage {
        count: u.count,
        rate: round_to(u.rate, SHARE_PLACES),
    }
}

pub fn file_report_json(report: &FileReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&JsonFileReport::from(report))?)
}

pub fn project_report_json(report: &ProjectReport) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(&JsonProjectReport::from(report))?)
}

/// Print JSON to stdout, or write it to `output` when given.
pub fn write_json(json: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, format!("{}\n", json))
                .map_err(|e| anyhow::anyhow!("writing {}: {}", path.display(), e))?;
        }
        None => println!("{}", json),
    }
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// Write a single-file profile as a colored terminal summary.
pub fn write_pretty_file(report: &FileReport) {
    write_header();

    print!("  {}", "File:     ".dimmed());
    println!("{}", report.file_path);
    print!("  {}", "Language: ".dimmed());
    println!("{}", report.language_id().cyan());
    println!();

    if let Some(reason) = &report.parse_error {
        println!("  {} {}", "PARSE".yellow(), reason);
        println!();
    }

    if !report.naming.is_empty() {
        write_naming(&report.naming);
        println!();
    }

    write_formatting(&report.formatting);
    println!();

    if let Some(patterns) = &report.patterns {
        write_patterns(patterns);
        println!();
    }
}

/// Write a project summary as a colored terminal summary.
pub fn write_pretty_project(report: &ProjectReport) {
    write_header();

    print!("  {}", "Project: ".dimmed());
    println!("{}", report.project);
    print!("  {}", "Files:   ".dimmed());
    println!("{}", report.total_files);
    println!();

    if report.languages.is_empty() {
        println!("  {}", "No source files found".dimmed());
        println!();
    }

    for (lang, summary) in &report.languages {
        let plural = if summary.file_count != 1 { "s" } else { "" };
        println!(
            "  {} ({} file{})",
            lang.as_str().cyan().bold(),
            summary.file_count,
            plural
        );
        println!();
        if !summary.naming.is_empty() {
            write_naming(&summary.naming);
            println!();
        }
        write_formatting(&summary.formatting);
        println!();
    }

    if !report.warnings.is_empty() {
        write_warnings(&report.warnings);
        println!();
    }
}

fn write_header() {
    println!();
    print!("  ");
    print!("{}", "styleprint".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
}

fn write_naming(naming: &NamingProfile) {
    println!("  {}", "Naming:".bold());
    for role in Role::ALL {
        let dist = naming.role(role);
        if dist.is_empty() {
            continue;
        }
        print!("    {:<14}", role.as_str());
        write_distribution(dist);
        println!();
    }
}

fn write_distribution(dist: &NamingDistribution) {
    let dominant = dist.dominant().map(|(t, _)| t);
    let mut entries: Vec<_> = dist.iter().collect();
    entries.sort_by(|a, b| b.1.total_cmp(&a.1));

    let parts: Vec<String> = entries
        .into_iter()
        .map(|(tag, share)| {
            let text = format!("{} {:.0}%", tag, share * 100.0);
            if Some(tag) == dominant {
                text.green().to_string()
            } else {
                text.dimmed().to_string()
            }
        })
        .collect();
    print!("{}", parts.join("  "));
}

fn write_formatting(f: &FormattingProfile) {
    println!("  {}", "Formatting:".bold());
    if f.indentation_size > 0 {
        println!("    {:<14}{} ({})", "indentation", f.indentation_type, f.indentation_size);
    } else {
        println!("    {:<14}{}", "indentation", f.indentation_type);
    }
    println!(
        "    {:<14}mean {}, max {}",
        "line length", f.line_length_mean, f.line_length_max
    );
    println!("    {:<14}{}", "quotes", f.quote_style);
    let newline = if f.trailing_newline {
        "yes".green()
    } else {
        "no".yellow()
    };
    println!("    {:<14}{}", "final newline", newline);
}

fn write_patterns(m: &StructuralMetrics) {
    println!("  {}", "Structure:".bold());
    println!("    {:<14}{}", "functions", m.function_count);
    println!("    {:<14}{}", "classes", m.class_count);
    if m.function_count > 0 {
        println!(
            "    {:<14}mean {:.1}, min {}, max {}",
            "length", m.function_length.mean, m.function_length.min, m.function_length.max
        );
        write_usage("type hints", &m.type_hint_usage);
        write_usage("docstrings", &m.docstring_usage);
    }
    println!("    {:<14}{}", "branches", m.branch_count);
    println!("    {:<14}{}", "nested defs", m.nested_function_count);
    println!("    {:<14}{}", "max depth", m.max_function_depth);
    if !m.complex_functions.is_empty() {
        println!(
            "    {} (complexity > {}):",
            "Complex functions".yellow(),
            COMPLEX_FUNCTION_THRESHOLD
        );
        for f in &m.complex_functions {
            println!("      {} {}", f.name.blue(), f.complexity);
        }
    }
}

fn write_usage(label: &str, u: &Usage) {
    let pct = format!("{:.0}%", u.rate * 100.0);
    let colored_pct = match u.rate {
        r if r >= 0.75 => pct.green(),
        r if r >= 0.25 => pct.yellow(),
        _ => pct.red(),
    };
    println!("    {:<14}{} ({})", label, colored_pct, u.count);
}

fn write_warnings(warnings: &[FileWarning]) {
    println!("  {} ({}):", "Warnings".bold(), warnings.len());
    println!();
    for w in warnings {
        print!("    {} ", "WARN ".yellow());
        print!("{:<7}", w.kind.as_str().dimmed());
        println!("{}", w.file.blue());
        println!("            {}", w.message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{merge, WarningKind};
    use crate::profile::profile;
    use serde_json::Value;

    #[test]
    fn test_file_json_shape_and_rounding() {
        let source = "a = 1\nb = 2\nmyVar = 3\n\ndef run(x: int):\n    pass\n\ndef go():\n    pass\n\ndef stop():\n    pass\n";
        let report = profile("demo.py", source);
        let json: Value = serde_json::from_str(&file_report_json(&report).unwrap()).unwrap();

        assert_eq!(json["language"], "python");
        // a, b and the parameter x are "other"; myVar is camelCase.
        assert_eq!(json["naming"]["variables"]["other"], 0.75);
        assert_eq!(json["naming"]["variables"]["camelCase"], 0.25);
        assert_eq!(json["formatting"]["indentation_type"], "spaces");
        assert_eq!(json["patterns"]["function_count"], 3);
        assert_eq!(json["patterns"]["function_length"]["mean"], 1.0);
        assert_eq!(json["patterns"]["type_hint_usage"]["rate"], 0.33);
        assert!(json.get("parse_error").is_none());
        assert_eq!(json["patterns"]["max_function_depth"], 1);
        assert_eq!(json["patterns"]["complex_functions"], serde_json::json!([]));
    }

    #[test]
    fn test_file_json_lists_complex_functions() {
        let mut source = String::from("def handle(event):\n");
        for i in 0..10 {
            source.push_str(&format!("    if event == {}:\n        return {}\n", i, i));
        }
        source.push_str("    def fallback():\n        pass\n    return fallback\n");
        let report = profile("events.py", &source);
        let json: Value = serde_json::from_str(&file_report_json(&report).unwrap()).unwrap();

        assert_eq!(json["patterns"]["max_function_depth"], 2);
        assert_eq!(
            json["patterns"]["complex_functions"],
            serde_json::json!([{ "name": "handle", "complexity": 11 }])
        );
    }

    #[test]
    fn test_file_json_without_analyzer() {
        let report = profile("main.go", "package main\n");
        let json: Value = serde_json::from_str(&file_report_json(&report).unwrap()).unwrap();
        assert_eq!(json["language"], "go");
        assert!(json["patterns"].is_null());
        assert_eq!(json["naming"]["functions"], serde_json::json!({}));
    }

    #[test]
    fn test_project_json_shape() {
        let a = profile("a.py", "def load_data():\n    pass\n");
        let b = profile("b.js", "let x = \"y\";\n");
        let report = merge("demo", 3, &[a, b]).with_warnings(vec![FileWarning {
            file: "c.py".to_string(),
            kind: WarningKind::Read,
            message: "cannot read".to_string(),
        }]);

        let json: Value = serde_json::from_str(&project_report_json(&report).unwrap()).unwrap();
        assert_eq!(json["project"], "demo");
        assert_eq!(json["total_files"], 3);
        assert_eq!(json["languages"]["python"]["file_count"], 1);
        assert_eq!(json["languages"]["javascript"]["formatting"]["quote_style"], "double");
        assert_eq!(json["warnings"][0]["kind"], "read");
    }

    #[test]
    fn test_empty_project_json() {
        let report = ProjectReport::empty("nothing");
        let json: Value = serde_json::from_str(&project_report_json(&report).unwrap()).unwrap();
        assert_eq!(json["total_files"], 0);
        assert_eq!(json["languages"], serde_json::json!({}));
        assert_eq!(json["warnings"], serde_json::json!([]));
    }

    #[test]
    fn test_write_json_to_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let out = temp.path().join("out.json");
        write_json("{}", Some(&out)).unwrap();
        assert_eq!(fs::read_to_string(&out).unwrap(), "{}\n");
    }
}
