//! Project configuration.
//!
//! An optional YAML file narrows which files a project run looks at.

use std::fs;
use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::language;

/// Config file names searched for in the project root, in order.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["styleprint.yaml", ".styleprint.yaml"];

/// Directory names skipped unless the config replaces the list.
pub const DEFAULT_EXCLUDE_DIRS: &[&str] = &[
    "node_modules",
    "vendor",
    "third_party",
    "build",
    "dist",
    "__pycache__",
    ".git",
    ".venv",
    "venv",
    ".tox",
    ".pytest_cache",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid excluded_paths pattern {pattern:?}: {source}")]
    Glob {
        pattern: String,
        #[source]
        source: globset::Error,
    },
    #[error("extension list is empty")]
    NoExtensions,
}

/// On-disk configuration. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct StyleConfig {
    /// Extensions to include, without the dot (default: all known).
    #[serde(default)]
    pub extensions: Option<Vec<String>>,
    /// Directory names to skip; replaces the default set when given.
    #[serde(default)]
    pub exclude_dirs: Option<Vec<String>>,
    /// Glob patterns for paths to skip (e.g. "**/generated/**").
    #[serde(default)]
    pub excluded_paths: Vec<String>,
}

impl StyleConfig {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        // An empty file deserializes to unit, not a mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Find a config file in `root`, if there is one.
    pub fn discover(root: &Path) -> Option<PathBuf> {
        if !root.is_dir() {
            return None;
        }
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| root.join(name))
            .find(|p| p.is_file())
    }

    /// Check that globs compile and the extension list is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(exts) = &self.extensions {
            if normalize_extensions(exts).is_empty() {
                return Err(ConfigError::NoExtensions);
            }
        }
        build_globset(&self.excluded_paths)?;
        Ok(())
    }
}

/// Resolved settings used by discovery.
#[derive(Debug, Clone)]
pub struct DiscoveryConfig {
    /// Lowercase extensions without the dot.
    pub extensions: Vec<String>,
    pub exclude_dirs: Vec<String>,
    pub excluded_paths: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            extensions: language::known_extensions(),
            exclude_dirs: DEFAULT_EXCLUDE_DIRS.iter().map(|s| s.to_string()).collect(),
            excluded_paths: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// Resolve a file config over the defaults.
    pub fn from_config(config: &StyleConfig) -> Self {
        let defaults = Self::default();
        Self {
            extensions: config
                .extensions
                .as_deref()
                .map(normalize_extensions)
                .unwrap_or(defaults.extensions),
            exclude_dirs: config.exclude_dirs.clone().unwrap_or(defaults.exclude_dirs),
            excluded_paths: config.excluded_paths.clone(),
        }
    }

    /// Replace the extension list, e.g. from `--extensions py,js`.
    pub fn with_extensions(mut self, extensions: &[String]) -> Result<Self, ConfigError> {
        let extensions = normalize_extensions(extensions);
        if extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        self.extensions = extensions;
        Ok(self)
    }

    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| {
                let e = e.to_ascii_lowercase();
                self.extensions.iter().any(|x| *x == e)
            })
            .unwrap_or(false)
    }

    pub fn excluded_paths_set(&self) -> Result<GlobSet, ConfigError> {
        build_globset(&self.excluded_paths)
    }
}

/// Lowercase, strip leading dots, drop blanks and duplicates.
fn normalize_extensions(exts: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for ext in exts {
        let ext = ext.trim().trim_start_matches('.').to_ascii_lowercase();
        if !ext.is_empty() && !out.contains(&ext) {
            out.push(ext);
        }
    }
    out
}

fn build_globset(patterns: &[String]) -> Result<GlobSet, ConfigError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ConfigError::Glob {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ConfigError::Glob {
        pattern: patterns.join(", "),
        source,
    })
}
