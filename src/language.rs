//! Language detection from file extensions.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{get_analyzer, StructuralAnalyzer};

/// Languages the profiler recognizes.
///
/// Every variant gets formatting analysis. Only languages with a registered
/// [`StructuralAnalyzer`] also get naming and structural analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    C,
    Cpp,
    Go,
    Java,
    JavaScript,
    Python,
    Rust,
    TypeScript,
}

impl Language {
    /// All known languages, in id order.
    pub const ALL: [Language; 8] = [
        Language::C,
        Language::Cpp,
        Language::Go,
        Language::Java,
        Language::JavaScript,
        Language::Python,
        Language::Rust,
        Language::TypeScript,
    ];

    /// Returns the language identifier used in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::C => "c",
            Language::Cpp => "cpp",
            Language::Go => "go",
            Language::Java => "java",
            Language::JavaScript => "javascript",
            Language::Python => "python",
            Language::Rust => "rust",
            Language::TypeScript => "typescript",
        }
    }

    /// File extensions (lowercase, without dot) mapped to this language.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::C => &["c"],
            Language::Cpp => &["cpp", "cc", "cxx", "h", "hpp"],
            Language::Go => &["go"],
            Language::Java => &["java"],
            Language::JavaScript => &["js"],
            Language::Python => &["py"],
            Language::Rust => &["rs"],
            Language::TypeScript => &["ts"],
        }
    }

    /// Determine the language from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "c" => Some(Language::C),
            "cpp" | "cc" | "cxx" | "h" | "hpp" => Some(Language::Cpp),
            "go" => Some(Language::Go),
            "java" => Some(Language::Java),
            "js" => Some(Language::JavaScript),
            "py" => Some(Language::Python),
            "rs" => Some(Language::Rust),
            "ts" => Some(Language::TypeScript),
            _ => None,
        }
    }

    /// The grammar-aware walker for this language, if one exists.
    pub fn structural_analyzer(&self) -> Option<&'static dyn StructuralAnalyzer> {
        get_analyzer(*self)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Detect the language of a file from its extension.
///
/// No file content is read. Returns `None` for unknown extensions.
pub fn detect<P: AsRef<Path>>(path: P) -> Option<Language> {
    path.as_ref()
        .extension()
        .and_then(|e| e.to_str())
        .and_then(Language::from_extension)
}

/// Every extension the detector knows, in language order.
pub fn known_extensions() -> Vec<String> {
    Language::ALL
        .iter()
        .flat_map(|l| l.extensions().iter().map(|e| e.to_string()))
        .collect()
}
