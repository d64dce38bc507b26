//! Grammar-aware naming and structure analysis.
//!
//! This module turns source text of the reference language into naming
//! inputs and structural metrics:
//! - Identifier classification into naming style tags
//! - Per-role style tallies (variables, functions, classes, constants, private)
//! - Function metrics (length, type hints, docstrings, branches)
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐     ┌──────────────┐     ┌───────────────┐
//! │ Source Text     │────▶│ Structural   │────▶│ WalkResult    │
//! └─────────────────┘     │ Analyzer     │     │ (NamingProfile│
//!                         │ (Python)     │     │  + Metrics)   │
//!                         └──────┬───────┘     └───────────────┘
//!                                │
//!                                ▼
//!                         ┌──────────────┐
//!                         │ walk_tree +  │
//!                         │ NodeVisitor  │
//!                         └──────────────┘
//! ```
//!
//! # Adding a New Language
//!
//! 1. Create a new module in `src/analysis/languages/`
//! 2. Implement `StructuralAnalyzer` and a `NodeVisitor` for its node kinds
//! 3. Register the analyzer in `languages/mod.rs`

mod facts;
mod languages;
pub mod naming;
mod traits;
pub mod walker;

pub use facts::{
    round_to, ComplexFunction, FunctionFacts, LengthStats, MetricsTally, NamingDistribution,
    NamingProfile, NamingTally, Role, StructuralMetrics, Usage, COMPLEX_FUNCTION_THRESHOLD,
};
pub use languages::{get_analyzer, register_analyzers, PythonAnalyzer};
pub use naming::{classify, classify_identifier, Classification, StyleTag};
pub use traits::{ParsedFile, StructuralAnalyzer, WalkOutcome, WalkResult};
