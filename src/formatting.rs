//! Lexical formatting analysis.
//!
//! Works on raw text with no grammar, so it applies to every language.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Leading whitespace style of indented lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndentationKind {
    Spaces,
    Tabs,
    Mixed,
    #[default]
    Unknown,
}

impl IndentationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IndentationKind::Spaces => "spaces",
            IndentationKind::Tabs => "tabs",
            IndentationKind::Mixed => "mixed",
            IndentationKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for IndentationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Which quote character string literals use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteStyle {
    Single,
    Double,
    Mixed,
    #[default]
    Unknown,
}

impl QuoteStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStyle::Single => "single",
            QuoteStyle::Double => "double",
            QuoteStyle::Mixed => "mixed",
            QuoteStyle::Unknown => "unknown",
        }
    }

    fn from_counts(single: usize, double: usize) -> Self {
        match (single > 0, double > 0) {
            (true, false) => QuoteStyle::Single,
            (false, true) => QuoteStyle::Double,
            (true, true) => QuoteStyle::Mixed,
            (false, false) => QuoteStyle::Unknown,
        }
    }
}

impl fmt::Display for QuoteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Formatting facts for one file (or a merged group of files).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattingProfile {
    pub indentation_type: IndentationKind,
    /// Smallest common indent unit; 0 when nothing is indented.
    pub indentation_size: usize,
    pub line_length_mean: usize,
    pub line_length_max: usize,
    pub quote_style: QuoteStyle,
    pub trailing_newline: bool,
}

impl Default for FormattingProfile {
    fn default() -> Self {
        Self {
            indentation_type: IndentationKind::Unknown,
            indentation_size: 0,
            line_length_mean: 0,
            line_length_max: 0,
            quote_style: QuoteStyle::Unknown,
            trailing_newline: true,
        }
    }
}

/// Counts of closed quote spans found in a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuoteCounts {
    pub single: usize,
    pub double: usize,
}

/// Scan raw text and build its formatting profile.
pub fn scan(text: &str) -> FormattingProfile {
    let mut indents = BTreeSet::new();
    let mut space_lines = 0usize;
    let mut tab_lines = 0usize;
    let mut lengths_total = 0usize;
    let mut lengths_count = 0usize;
    let mut line_length_max = 0usize;

    for line in split_lines(text) {
        if line.trim().is_empty() {
            continue;
        }

        let length = line.chars().count();
        lengths_total += length;
        lengths_count += 1;
        line_length_max = line_length_max.max(length);

        let indent = line.chars().take_while(|c| c.is_whitespace()).count();
        if indent > 0 {
            indents.insert(indent);
            match line.chars().next() {
                Some(' ') => space_lines += 1,
                Some('\t') => tab_lines += 1,
                _ => {}
            }
        }
    }

    let indentation_type = match (space_lines > 0, tab_lines > 0) {
        (true, false) => IndentationKind::Spaces,
        (false, true) => IndentationKind::Tabs,
        (true, true) => IndentationKind::Mixed,
        (false, false) => IndentationKind::Unknown,
    };

    let quotes = count_quote_spans(text);

    FormattingProfile {
        indentation_type,
        indentation_size: indentation_width(&indents),
        line_length_mean: if lengths_count == 0 {
            0
        } else {
            lengths_total / lengths_count
        },
        line_length_max,
        quote_style: QuoteStyle::from_counts(quotes.single, quotes.double),
        trailing_newline: text.ends_with('\n'),
    }
}

/// Split on `\n`, dropping a trailing `\r` from each line.
fn split_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Greatest common divisor of the distinct indent widths.
///
/// Depths {4, 8, 12} give 4; a single distinct width is its own unit.
pub fn indentation_width(indents: &BTreeSet<usize>) -> usize {
    indents.iter().copied().fold(0, gcd)
}

fn gcd(a: usize, b: usize) -> usize {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Count single- and double-quoted spans line by line.
///
/// The opening quote decides the span kind; the other quote character is
/// plain content inside it, and a backslash escapes the next character.
/// A span left open at the end of a line is not counted.
pub fn count_quote_spans(text: &str) -> QuoteCounts {
    let mut counts = QuoteCounts::default();

    for line in split_lines(text) {
        let mut open: Option<char> = None;
        let mut escaped = false;

        for ch in line.chars() {
            match open {
                None => {
                    if ch == '\'' || ch == '"' {
                        open = Some(ch);
                    }
                }
                Some(quote) => {
                    if escaped {
                        escaped = false;
                    } else if ch == '\\' {
                        escaped = true;
                    } else if ch == quote {
                        if quote == '\'' {
                            counts.single += 1;
                        } else {
                            counts.double += 1;
                        }
                        open = None;
                    }
                }
            }
        }
    }

    counts
}
