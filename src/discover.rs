//! Deterministic source file discovery.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::{ConfigError, DiscoveryConfig};

#[derive(Error, Debug)]
pub enum DiscoveryError {
    #[error("path does not exist: {}", .0.display())]
    RootNotFound(PathBuf),
    #[error("cannot walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// An entry below the root that could not be read during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unreadable {
    pub path: PathBuf,
    pub reason: String,
}

/// Files found by a walk, plus the entries the walk had to skip.
#[derive(Debug, Default)]
pub struct Discovered {
    pub files: Vec<PathBuf>,
    pub unreadable: Vec<Unreadable>,
}

/// Collect the files a project run should profile.
///
/// See [`discover`]; entries that could not be read are dropped.
pub fn collect_files(root: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>, DiscoveryError> {
    discover(root, config).map(|d| d.files)
}

/// Walk `root` and collect matching files.
///
/// A root that is a file yields just that file. A directory is walked in
/// file-name order, so the result is the same on every run. Directories named
/// in `exclude_dirs` are pruned (the root itself is never pruned) and any path
/// matching an `excluded_paths` glob, relative to the root, is skipped.
///
/// Only a missing or unreadable root is an error. An entry below the root
/// that cannot be read is recorded in `unreadable` and the walk goes on.
pub fn discover(root: &Path, config: &DiscoveryConfig) -> Result<Discovered, DiscoveryError> {
    if !root.exists() {
        return Err(DiscoveryError::RootNotFound(root.to_path_buf()));
    }
    if root.is_file() {
        return Ok(Discovered {
            files: vec![root.to_path_buf()],
            unreadable: Vec::new(),
        });
    }

    let excluded = config.excluded_paths_set()?;
    let is_excluded = |path: &Path| {
        if excluded.is_empty() {
            return false;
        }
        let rel = path.strip_prefix(root).unwrap_or(path);
        excluded.is_match(rel)
    };

    let mut found = Discovered::default();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| {
            if e.depth() == 0 {
                return true;
            }
            if e.file_type().is_dir() {
                let name = e.file_name().to_string_lossy();
                if config.exclude_dirs.iter().any(|d| *d == name) {
                    debug!(dir = %e.path().display(), "skipping excluded directory");
                    return false;
                }
            }
            !is_excluded(e.path())
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() > 0 => {
                let path = err.path().unwrap_or(root).to_path_buf();
                warn!(path = %path.display(), error = %err, "skipping unreadable entry");
                found.unreadable.push(Unreadable {
                    path,
                    reason: err.to_string(),
                });
                continue;
            }
            Err(source) => {
                return Err(DiscoveryError::Walk {
                    path: root.to_path_buf(),
                    source,
                })
            }
        };
        if entry.file_type().is_file() && config.matches_extension(entry.path()) {
            found.files.push(entry.into_path());
        }
    }

    debug!(
        root = %root.display(),
        count = found.files.len(),
        unreadable = found.unreadable.len(),
        "discovered files"
    );
    Ok(found)
}
