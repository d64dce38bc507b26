//! Command-line interface for styleprint.

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{debug, error};

use crate::config::{DiscoveryConfig, StyleConfig};
use crate::profile;
use crate::report;
use crate::runner::Runner;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_ERROR: i32 = 2;

/// Source code style fingerprinting.
///
/// Styleprint measures how a codebase is written: naming conventions per
/// identifier role, indentation, line length, quote style, and structural
/// habits such as function length, type hints and docstrings.
#[derive(Parser)]
#[command(name = "styleprint")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a single source file
    File(FileArgs),
    /// Profile every source file under a directory
    #[command(visible_alias = "dir")]
    Project(ProjectArgs),
}

/// Arguments for the file command.
#[derive(Parser)]
pub struct FileArgs {
    /// File to profile
    pub path: PathBuf,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: json or pretty
    #[arg(short, long, default_value = "json")]
    pub format: String,
}

/// Arguments for the project command.
#[derive(Parser)]
pub struct ProjectArgs {
    /// Project root (a directory, or a single file)
    pub path: PathBuf,

    /// Comma-separated extensions to include (default: all known)
    #[arg(short, long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Path to config YAML file (default: auto-discover in the project root)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format: json or pretty
    #[arg(short, long, default_value = "json")]
    pub format: String,

    /// Do not draw a progress bar
    #[arg(long)]
    pub no_progress: bool,
}

fn valid_format(format: &str) -> bool {
    format == "json" || format == "pretty"
}

/// Run the file command.
pub fn run_file(args: &FileArgs) -> anyhow::Result<i32> {
    crate::init();

    if !valid_format(&args.format) {
        eprintln!(
            "Error: invalid format {:?}, must be 'json' or 'pretty'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    if !args.path.is_file() {
        eprintln!("Error: not a file: {}", args.path.display());
        return Ok(EXIT_ERROR);
    }

    let file_report = match profile::profile_file(&args.path) {
        Ok(r) => r,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if file_report.language.is_none() {
        debug!(file = %args.path.display(), "unrecognized extension, formatting only");
    }

    emit(
        &args.format,
        args.output.as_deref(),
        &report::file_report_json(&file_report)?,
        || report::write_pretty_file(&file_report),
    )?;
    Ok(EXIT_SUCCESS)
}

/// Run the project command.
pub fn run_project(args: &ProjectArgs) -> anyhow::Result<i32> {
    crate::init();

    if !valid_format(&args.format) {
        eprintln!(
            "Error: invalid format {:?}, must be 'json' or 'pretty'",
            args.format
        );
        return Ok(EXIT_ERROR);
    }

    let discovery = match resolve_config(&args.path, args.config.as_deref(), args.extensions.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    let runner = Runner::new(&args.path)
        .config(discovery)
        .progress(!args.no_progress);

    let project_report = match runner.run() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Ok(EXIT_ERROR);
        }
    };

    if project_report.total_files == 0 {
        eprintln!("Warning: no source files found");
    }

    emit(
        &args.format,
        args.output.as_deref(),
        &report::project_report_json(&project_report)?,
        || report::write_pretty_project(&project_report),
    )?;
    Ok(EXIT_SUCCESS)
}

/// Load, validate and resolve configuration for a project run.
///
/// An explicit `--config` wins over an auto-discovered file, and
/// `--extensions` wins over the file's extension list.
pub fn resolve_config(
    root: &Path,
    config_path: Option<&Path>,
    extensions: Option<&[String]>,
) -> anyhow::Result<DiscoveryConfig> {
    let path = match config_path {
        Some(p) => Some(p.to_path_buf()),
        None => StyleConfig::discover(root),
    };

    let config = match &path {
        Some(p) => {
            debug!(config = %p.display(), "loading config");
            let config = StyleConfig::parse_file(p)?;
            config.validate()?;
            config
        }
        None => StyleConfig::default(),
    };

    let mut discovery = DiscoveryConfig::from_config(&config);
    if let Some(exts) = extensions {
        discovery = discovery.with_extensions(exts)?;
    }
    Ok(discovery)
}

/// JSON goes to `output` when given; otherwise the chosen format goes to
/// stdout. Pretty output is still shown on the terminal alongside a file.
fn emit(
    format: &str,
    output: Option<&Path>,
    json: &str,
    pretty: impl FnOnce(),
) -> anyhow::Result<()> {
    match (output, format) {
        (Some(path), "pretty") => {
            report::write_json(json, Some(path))?;
            pretty();
        }
        (Some(path), _) => {
            report::write_json(json, Some(path))?;
            eprintln!("Wrote {}", path.display());
        }
        (None, "pretty") => pretty(),
        (None, _) => report::write_json(json, None)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_config_precedence() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join("styleprint.yaml"),
            "extensions: [js]\nexclude_dirs: [gen]\n",
        )
        .unwrap();

        let discovered = resolve_config(temp.path(), None, None).unwrap();
        assert_eq!(discovered.extensions, vec!["js"]);
        assert_eq!(discovered.exclude_dirs, vec!["gen"]);

        let overridden =
            resolve_config(temp.path(), None, Some(&["py".to_string()])).unwrap();
        assert_eq!(overridden.extensions, vec!["py"]);
        assert_eq!(overridden.exclude_dirs, vec!["gen"]);
    }

    #[test]
    fn test_resolve_config_errors() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing.yaml");
        assert!(resolve_config(temp.path(), Some(&missing), None).is_err());

        let bad = temp.path().join("bad.yaml");
        fs::write(&bad, "excluded_paths: [\"a/[\"]\n").unwrap();
        assert!(resolve_config(temp.path(), Some(&bad), None).is_err());
    }

    #[test]
    fn test_run_project_exit_codes() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.py"), "x = 1\n").unwrap();
        let out = temp.path().join("report.json");

        let args = ProjectArgs {
            path: temp.path().to_path_buf(),
            extensions: None,
            config: None,
            output: Some(out.clone()),
            format: "json".to_string(),
            no_progress: true,
        };
        assert_eq!(run_project(&args).unwrap(), EXIT_SUCCESS);
        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
        assert_eq!(json["total_files"], 1);

        let args = ProjectArgs {
            path: temp.path().join("missing"),
            format: "json".to_string(),
            ..args
        };
        assert_eq!(run_project(&args).unwrap(), EXIT_ERROR);
    }

    #[test]
    fn test_run_file_rejects_bad_format() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.py");
        fs::write(&path, "x = 1\n").unwrap();
        let args = FileArgs {
            path,
            output: None,
            format: "sarif".to_string(),
        };
        assert_eq!(run_file(&args).unwrap(), EXIT_ERROR);
    }
}
