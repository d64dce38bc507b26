//! Single-file style profiling.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::analysis::{NamingProfile, StructuralMetrics, WalkOutcome};
use crate::formatting::{self, FormattingProfile};
use crate::language::{self, Language};

/// Errors that keep a file from being profiled at all.
#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("cannot read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{} is not UTF-8 text", path.display())]
    Decode { path: PathBuf },
    #[error("{} looks like a binary file", path.display())]
    Binary { path: PathBuf },
}

/// Everything derived from one file.
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub file_path: String,
    /// `None` when the extension is not recognized.
    pub language: Option<Language>,
    pub naming: NamingProfile,
    pub formatting: FormattingProfile,
    /// Present only for languages with a structural analyzer whose walk
    /// succeeded.
    pub patterns: Option<StructuralMetrics>,
    /// Why the structural walk failed, if it did.
    pub parse_error: Option<String>,
}

impl FileReport {
    pub fn language_id(&self) -> &'static str {
        self.language.map(|l| l.as_str()).unwrap_or("unknown")
    }
}

/// Profile already-loaded source text.
///
/// Formatting is always scanned. Naming and structure are extracted only when
/// the detected language has a structural analyzer; a parse failure leaves
/// them empty and is recorded in `parse_error`.
pub fn profile<P: AsRef<Path>>(path: P, text: &str) -> FileReport {
    let path = path.as_ref();
    let language = language::detect(path);

    let mut report = FileReport {
        file_path: path.to_string_lossy().to_string(),
        language,
        naming: NamingProfile::default(),
        formatting: formatting::scan(text),
        patterns: None,
        parse_error: None,
    };

    if let Some(analyzer) = language.and_then(|l| l.structural_analyzer()) {
        match analyzer.analyze(path, text.as_bytes()) {
            WalkOutcome::Walked(result) => {
                report.naming = result.naming;
                report.patterns = Some(result.metrics);
            }
            WalkOutcome::ParseFailed { reason } => {
                report.parse_error = Some(reason);
            }
        }
    }

    report
}

/// Read a file and profile it.
pub fn profile_file<P: AsRef<Path>>(path: P) -> Result<FileReport, ProfileError> {
    let path = path.as_ref();
    let text = read_text(path)?;
    Ok(profile(path, &text))
}

/// Read a file as UTF-8 text, rejecting binary content.
pub fn read_text(path: &Path) -> Result<String, ProfileError> {
    let bytes = fs::read(path).map_err(|source| ProfileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if bytes.contains(&0) {
        return Err(ProfileError::Binary {
            path: path.to_path_buf(),
        });
    }
    String::from_utf8(bytes).map_err(|_| ProfileError::Decode {
        path: path.to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::StyleTag;
    use crate::formatting::{IndentationKind, QuoteStyle};
    use tempfile::TempDir;

    #[test]
    fn test_profile_python_runs_walker() {
        let source = "def load_data(path):\n    return open(path)\n";
        let report = profile("pkg/loader.py", source);

        assert_eq!(report.language, Some(Language::Python));
        assert_eq!(report.naming.functions.get(StyleTag::SnakeCase), 1.0);
        assert_eq!(report.formatting.indentation_type, IndentationKind::Spaces);
        assert_eq!(report.patterns.as_ref().unwrap().function_count, 1);
        assert!(report.parse_error.is_none());
    }

    #[test]
    fn test_profile_other_language_is_formatting_only() {
        let source = "function loadData() {\n\treturn \"x\";\n}\n";
        let report = profile("app.js", source);

        assert_eq!(report.language, Some(Language::JavaScript));
        assert!(report.naming.is_empty());
        assert!(report.patterns.is_none());
        assert_eq!(report.formatting.indentation_type, IndentationKind::Tabs);
        assert_eq!(report.formatting.quote_style, QuoteStyle::Double);
    }

    #[test]
    fn test_profile_parse_failure_keeps_formatting() {
        let source = "def broken(:\n    return 'x'\n";
        let report = profile("broken.py", source);

        assert!(report.parse_error.is_some());
        assert!(report.naming.is_empty());
        assert!(report.patterns.is_none());
        assert_eq!(report.formatting.indentation_size, 4);
        assert_eq!(report.formatting.quote_style, QuoteStyle::Single);
    }

    #[test]
    fn test_profile_python2_source_is_parse_failure() {
        let report = profile("old.py", "def doIt(x):\n    print \"hi\", x\n");

        assert_eq!(
            report.parse_error.as_deref(),
            Some("unsupported syntax (print_statement) at 2:5")
        );
        assert!(report.naming.is_empty());
        assert!(report.patterns.is_none());
        assert_eq!(report.formatting.indentation_size, 4);
    }

    #[test]
    fn test_profile_unknown_extension() {
        let report = profile("notes.txt", "hello\n");
        assert_eq!(report.language, None);
        assert_eq!(report.language_id(), "unknown");
    }

    #[test]
    fn test_profile_file_errors() {
        let temp = TempDir::new().unwrap();

        let missing = temp.path().join("missing.py");
        assert!(matches!(
            profile_file(&missing),
            Err(ProfileError::Read { .. })
        ));

        let binary = temp.path().join("blob.py");
        fs::write(&binary, [0x7f, 0x45, 0x00, 0x01]).unwrap();
        assert!(matches!(
            profile_file(&binary),
            Err(ProfileError::Binary { .. })
        ));

        let latin1 = temp.path().join("latin1.py");
        fs::write(&latin1, [b'x', b'=', 0xe9, b'\n']).unwrap();
        assert!(matches!(
            profile_file(&latin1),
            Err(ProfileError::Decode { .. })
        ));
    }

    #[test]
    fn test_profile_file_reads_text() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("ok.py");
        fs::write(&path, "VALUE = 1\n").unwrap();

        let report = profile_file(&path).unwrap();
        assert_eq!(report.naming.constants.get(StyleTag::PascalCase), 1.0);
        assert!(report.formatting.trailing_newline);
    }
}
