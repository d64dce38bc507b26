//! Language-specific structural analyzers.
//!
//! Only Python has a grammar-aware walker. Adding a language means adding a
//! module here, a static slot, and one arm in [`get_analyzer`].

mod python;

pub use python::PythonAnalyzer;

use super::StructuralAnalyzer;
use crate::language::Language;
use once_cell::sync::OnceCell;

/// Static storage for Python analyzer.
static PYTHON_ANALYZER: OnceCell<PythonAnalyzer> = OnceCell::new();

fn python() -> &'static PythonAnalyzer {
    PYTHON_ANALYZER.get_or_init(PythonAnalyzer::new)
}

/// Register all available structural analyzers.
///
/// This is idempotent - calling it multiple times is safe. Lookups
/// initialize lazily, so calling it is only needed to pay the cost up front.
pub fn register_analyzers() {
    python();
}

/// Get the structural analyzer for a language.
///
/// Returns None for languages that only get formatting analysis.
pub fn get_analyzer(language: Language) -> Option<&'static dyn StructuralAnalyzer> {
    match language {
        Language::Python => Some(python() as &'static dyn StructuralAnalyzer),
        Language::C
        | Language::Cpp
        | Language::Go
        | Language::Java
        | Language::JavaScript
        | Language::Rust
        | Language::TypeScript => None,
    }
}
