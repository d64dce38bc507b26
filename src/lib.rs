//! Styleprint - source code style fingerprinting.
//!
//! Styleprint extracts a statistical description of how code is written:
//! naming conventions per identifier role, lexical formatting, and (for
//! Python) structural habits. Per-file profiles merge into per-language
//! project summaries.
//!
//! # Architecture
//!
//! - `language`: extension-based language detection and analyzer dispatch
//! - `analysis`: naming classifier and tree-sitter structural walkers
//! - `formatting`: grammar-free formatting scanner
//! - `profile`: single-file profiling
//! - `aggregate`: merging file profiles into project summaries
//! - `config` / `discover` / `runner`: project runs
//! - `report`: output formatting (JSON, pretty)
//!
//! # Adding a New Language
//!
//! See `src/analysis/languages/`. Implement `StructuralAnalyzer`, register it
//! in `languages/mod.rs` and return it from `get_analyzer`.

pub mod aggregate;
pub mod analysis;
pub mod cli;
pub mod config;
pub mod discover;
pub mod formatting;
pub mod language;
pub mod profile;
pub mod report;
pub mod runner;

pub use aggregate::{merge, FileWarning, LanguageSummary, ProjectReport, WarningKind};
pub use analysis::{
    classify, register_analyzers, NamingDistribution, NamingProfile, StructuralAnalyzer,
    StructuralMetrics, StyleTag,
};
pub use config::{DiscoveryConfig, StyleConfig};
pub use discover::collect_files;
pub use formatting::FormattingProfile;
pub use language::{detect, Language};
pub use profile::{profile, profile_file, FileReport, ProfileError};
pub use runner::{FileOutcome, Runner};

/// Initialize all subsystems.
///
/// Call this once at startup.
pub fn init() {
    register_analyzers();
}
