//! Project runs: discover, profile each file, merge.

use std::io::IsTerminal;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::aggregate::{self, FileWarning, ProjectReport, WarningKind};
use crate::config::DiscoveryConfig;
use crate::discover::{self, DiscoveryError};
use crate::profile::{self, FileReport};

/// Result of processing one discovered file.
#[derive(Debug)]
pub enum FileOutcome {
    Profiled(FileReport),
    Skipped { path: PathBuf, reason: String },
}

/// Profiles every file under a project root.
pub struct Runner {
    root: PathBuf,
    config: DiscoveryConfig,
    progress: bool,
}

impl Runner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            config: DiscoveryConfig::default(),
            progress: false,
        }
    }

    pub fn config(mut self, config: DiscoveryConfig) -> Self {
        self.config = config;
        self
    }

    /// Draw a progress bar on stderr (only when stderr is a terminal).
    pub fn progress(mut self, enabled: bool) -> Self {
        self.progress = enabled;
        self
    }

    /// Name reported for the project: the root's final path component.
    pub fn project_name(&self) -> String {
        let resolved = self.root.canonicalize().unwrap_or_else(|_| self.root.clone());
        resolved
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| resolved.to_string_lossy().to_string())
    }

    /// Discover, profile and merge.
    ///
    /// Only a failure at the root is fatal. Unreadable files and directories
    /// are skipped and files that fail to parse keep their formatting; both
    /// are reported in `warnings`.
    pub fn run(&self) -> Result<ProjectReport, DiscoveryError> {
        let project = self.project_name();
        let discovered = discover::discover(&self.root, &self.config)?;
        let files = discovered.files;
        info!(project = %project, files = files.len(), "starting project run");

        let mut warnings: Vec<FileWarning> = discovered
            .unreadable
            .into_iter()
            .map(|u| FileWarning {
                file: u.path.to_string_lossy().to_string(),
                kind: WarningKind::Read,
                message: u.reason,
            })
            .collect();

        if files.is_empty() {
            return Ok(ProjectReport::empty(&project).with_warnings(warnings));
        }

        let bar = self.progress_bar(files.len() as u64);
        let mut reports = Vec::with_capacity(files.len());

        for path in &files {
            debug!(file = %path.display(), "profiling");
            match process_file(path) {
                FileOutcome::Profiled(report) => {
                    if let Some(reason) = &report.parse_error {
                        warn!(file = %path.display(), %reason, "parse failed, keeping formatting only");
                        warnings.push(FileWarning {
                            file: report.file_path.clone(),
                            kind: WarningKind::Parse,
                            message: reason.clone(),
                        });
                    }
                    reports.push(report);
                }
                FileOutcome::Skipped { path, reason } => {
                    warn!(file = %path.display(), %reason, "skipping file");
                    warnings.push(FileWarning {
                        file: path.to_string_lossy().to_string(),
                        kind: WarningKind::Read,
                        message: reason,
                    });
                }
            }
            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = bar {
            bar.finish_and_clear();
        }

        info!(
            profiled = reports.len(),
            warnings = warnings.len(),
            "project run finished"
        );
        Ok(aggregate::merge(&project, files.len(), &reports).with_warnings(warnings))
    }

    fn progress_bar(&self, len: u64) -> Option<ProgressBar> {
        if !self.progress || !std::io::stderr().is_terminal() {
            return None;
        }
        let bar = ProgressBar::new(len);
        bar.set_style(
            ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} files {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(bar)
    }
}

/// Read and profile one file, turning read failures into a skip.
pub fn process_file(path: &Path) -> FileOutcome {
    match profile::profile_file(path) {
        Ok(report) => FileOutcome::Profiled(report),
        Err(e) => FileOutcome::Skipped {
            path: path.to_path_buf(),
            reason: e.to_string(),
        },
    }
}
