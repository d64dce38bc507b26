//! Core traits for grammar-aware structural analysis.

use std::path::Path;

use super::{NamingProfile, StructuralMetrics};
use crate::language::Language;

/// Holds a parsed tree-sitter tree and the source it was built from.
pub struct ParsedFile {
    /// The tree-sitter parse tree.
    pub tree: tree_sitter::Tree,
    /// Source bytes the tree was parsed from.
    pub source: Vec<u8>,
}

impl ParsedFile {
    /// Get text for a tree-sitter node.
    pub fn node_text(&self, node: tree_sitter::Node) -> &str {
        node.utf8_text(&self.source).unwrap_or("")
    }

    /// Whether the tree contains ERROR or MISSING nodes.
    pub fn has_syntax_errors(&self) -> bool {
        self.tree.root_node().has_error()
    }

    /// Position of the first syntax error, 1-indexed, if any.
    pub fn first_error_position(&self) -> Option<(usize, usize)> {
        let mut stack = vec![self.tree.root_node()];
        while let Some(node) = stack.pop() {
            if node.is_error() || node.is_missing() {
                let p = node.start_position();
                return Some((p.row + 1, p.column + 1));
            }
            if !node.has_error() {
                continue;
            }
            let mut cursor = node.walk();
            let children: Vec<_> = node.children(&mut cursor).collect();
            // Reverse so the leftmost child is examined first.
            stack.extend(children.into_iter().rev());
        }
        None
    }

    /// First node, in document order, whose kind is in `kinds`, with its
    /// 1-indexed position.
    pub fn find_kind(&self, kinds: &[&str]) -> Option<(&'static str, usize, usize)> {
        if kinds.is_empty() {
            return None;
        }
        let root = self.tree.root_node();
        let mut stack = vec![root];
        let mut cursor = root.walk();
        while let Some(node) = stack.pop() {
            if kinds.contains(&node.kind()) {
                let p = node.start_position();
                return Some((node.kind(), p.row + 1, p.column + 1));
            }
            let children: Vec<_> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }
        None
    }
}

/// Naming inputs and metrics from one successful walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WalkResult {
    pub naming: NamingProfile,
    pub metrics: StructuralMetrics,
}

/// Outcome of walking one file.
///
/// A parse failure is data, not an error: the caller keeps the file's
/// formatting profile and reports the reason.
#[derive(Debug, Clone, PartialEq)]
pub enum WalkOutcome {
    Walked(WalkResult),
    ParseFailed { reason: String },
}

/// Grammar-aware analyzer for one language.
///
/// # Thread Safety
///
/// tree_sitter::Parser is not Sync, so implementations create a parser per
/// call.
pub trait StructuralAnalyzer: Send + Sync {
    /// The language this analyzer handles.
    fn language(&self) -> Language;

    /// Parse source text into a tree.
    ///
    /// Returns an error only if the parser could not run at all. Syntax
    /// errors still produce a tree with ERROR nodes.
    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile>;

    /// Node kinds the grammar accepts but the language itself rejects
    /// (e.g. legacy syntax kept for error recovery). A tree containing one is
    /// treated as a parse failure.
    fn rejected_kinds(&self) -> &'static [&'static str] {
        &[]
    }

    /// Extract naming inputs and structural metrics from a parsed file.
    fn walk(&self, parsed: &ParsedFile) -> WalkResult;

    /// Parse and walk in one step, turning any failure into
    /// [`WalkOutcome::ParseFailed`].
    fn analyze(&self, path: &Path, source: &[u8]) -> WalkOutcome {
        let parsed = match self.parse(path, source) {
            Ok(p) => p,
            Err(e) => {
                return WalkOutcome::ParseFailed {
                    reason: e.to_string(),
                }
            }
        };
        if let Some((line, col)) = parsed.first_error_position() {
            return WalkOutcome::ParseFailed {
                reason: format!("syntax error at {}:{}", line, col),
            };
        }
        if parsed.has_syntax_errors() {
            return WalkOutcome::ParseFailed {
                reason: "syntax error".to_string(),
            };
        }
        if let Some((kind, line, col)) = parsed.find_kind(self.rejected_kinds()) {
            return WalkOutcome::ParseFailed {
                reason: format!("unsupported syntax ({}) at {}:{}", kind, line, col),
            };
        }
        WalkOutcome::Walked(self.walk(&parsed))
    }
}
