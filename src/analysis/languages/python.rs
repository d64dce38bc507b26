//! Python structural analyzer using tree-sitter.

use std::path::Path;

use tree_sitter::{Language as TsLanguage, Node, Parser};

use crate::analysis::naming::is_all_upper;
use crate::analysis::walker::{count_descendants, walk_tree, NodeCategory, NodeVisitor};
use crate::analysis::{
    FunctionFacts, MetricsTally, NamingTally, ParsedFile, Role, StructuralAnalyzer, WalkResult,
};
use crate::language::Language;

pub struct PythonAnalyzer {
    language: TsLanguage,
}

impl PythonAnalyzer {
    pub fn new() -> Self {
        Self {
            language: tree_sitter_python::LANGUAGE.into(),
        }
    }

    fn create_parser(&self) -> anyhow::Result<Parser> {
        let mut parser = Parser::new();
        parser.set_language(&self.language)?;
        Ok(parser)
    }
}

impl Default for PythonAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl StructuralAnalyzer for PythonAnalyzer {
    fn language(&self) -> Language {
        Language::Python
    }

    fn parse(&self, path: &Path, source: &[u8]) -> anyhow::Result<ParsedFile> {
        let mut parser = self.create_parser()?;
        let tree = parser
            .parse(source, None)
            .ok_or_else(|| anyhow::anyhow!("failed to parse Python source: {}", path.display()))?;

        Ok(ParsedFile {
            tree,
            source: source.to_vec(),
        })
    }

    /// Python 2 statements that the grammar still parses.
    fn rejected_kinds(&self) -> &'static [&'static str] {
        &["print_statement", "exec_statement"]
    }

    fn walk(&self, parsed: &ParsedFile) -> WalkResult {
        let mut visitor = PythonVisitor::new(parsed);
        walk_tree(parsed.tree.root_node(), &mut visitor);
        visitor.finish()
    }
}

/// Collects naming and metric facts from a Python tree.
struct PythonVisitor<'a> {
    parsed: &'a ParsedFile,
    naming: NamingTally,
    metrics: MetricsTally,
}

impl<'a> PythonVisitor<'a> {
    fn new(parsed: &'a ParsedFile) -> Self {
        Self {
            parsed,
            naming: NamingTally::new(),
            metrics: MetricsTally::new(),
        }
    }

    fn finish(self) -> WalkResult {
        WalkResult {
            naming: self.naming.into_profile(),
            metrics: self.metrics.finish(),
        }
    }

    fn field_text(&self, node: Node, field: &str) -> Option<&'a str> {
        let parsed = self.parsed;
        node.child_by_field_name(field)
            .map(|n| parsed.node_text(n))
            .filter(|s| !s.is_empty())
    }

    /// Record positional parameter names; returns whether any of them is
    /// annotated.
    fn record_positional_parameters(&mut self, params: Node) -> bool {
        let parsed = self.parsed;
        let mut annotated = false;
        let mut cursor = params.walk();

        for param in params.named_children(&mut cursor) {
            let (name_node, typed) = match param.kind() {
                "identifier" => (Some(param), false),
                "default_parameter" => (param.child_by_field_name("name"), false),
                "typed_default_parameter" => (param.child_by_field_name("name"), true),
                "typed_parameter" => match param.named_child(0) {
                    Some(inner) if inner.kind() == "identifier" => (Some(inner), true),
                    // `*args: T` or `**kw: T`: the positional list has ended.
                    _ => break,
                },
                // `*`, `*args`, `**kwargs`: everything after is keyword-only.
                "keyword_separator" | "list_splat_pattern" | "dictionary_splat_pattern" => break,
                _ => (None, false),
            };

            if let Some(n) = name_node {
                let name = parsed.node_text(n);
                if !name.is_empty() {
                    self.naming.record_name_plain(Role::Variables, name);
                    annotated |= typed;
                }
            }
        }

        annotated
    }

    /// Direct statements of a block, comments excluded.
    fn statements<'t>(block: Node<'t>) -> Vec<Node<'t>> {
        let mut cursor = block.walk();
        block
            .named_children(&mut cursor)
            .filter(|n| n.kind() != "comment")
            .collect()
    }

    /// A standalone text string literal (not an f-string or bytes) as a
    /// statement.
    fn is_docstring(&self, statement: Node) -> bool {
        if statement.kind() != "expression_statement" || statement.named_child_count() != 1 {
            return false;
        }
        let Some(expr) = statement.named_child(0) else {
            return false;
        };
        match expr.kind() {
            "string" => self.is_text_literal(expr),
            "concatenated_string" => {
                let mut cursor = expr.walk();
                let parts: Vec<Node> = expr.named_children(&mut cursor).collect();
                parts.iter().all(|p| self.is_text_literal(*p))
            }
            _ => false,
        }
    }

    /// A `string` node with no interpolation and no bytes prefix.
    fn is_text_literal(&self, string: Node) -> bool {
        if has_interpolation(string) {
            return false;
        }
        let mut cursor = string.walk();
        let start = string
            .named_children(&mut cursor)
            .find(|c| c.kind() == "string_start");
        let prefix = start.map(|s| self.parsed.node_text(s)).unwrap_or("");
        !prefix
            .chars()
            .take_while(|c| *c != '"' && *c != '\'')
            .any(|c| c == 'b' || c == 'B')
    }
}

fn has_interpolation(string: Node) -> bool {
    let mut cursor = string.walk();
    let found = string
        .named_children(&mut cursor)
        .any(|c| c.kind() == "interpolation");
    found
}

fn is_branch_kind(kind: &str) -> bool {
    matches!(
        kind,
        "if_statement"
            | "elif_clause"
            | "for_statement"
            | "while_statement"
            | "except_clause"
            | "except_group_clause"
    )
}

impl<'tree, 'a> NodeVisitor<'tree> for PythonVisitor<'a> {
    fn category(&self, kind: &str) -> Option<NodeCategory> {
        match kind {
            "function_definition" => Some(NodeCategory::Function),
            "class_definition" => Some(NodeCategory::Class),
            "assignment" => Some(NodeCategory::Assignment),
            k if is_branch_kind(k) => Some(NodeCategory::Branch),
            _ => None,
        }
    }

    fn visit_function(&mut self, node: Node<'tree>, enclosing_functions: usize) {
        let name = self.field_text(node, "name");
        if let Some(name) = name {
            self.naming.record_name(Role::Functions, name);
        }

        let params_annotated = node
            .child_by_field_name("parameters")
            .map(|p| self.record_positional_parameters(p))
            .unwrap_or(false);
        let type_hinted = params_annotated || node.child_by_field_name("return_type").is_some();

        let statements = node
            .child_by_field_name("body")
            .map(Self::statements)
            .unwrap_or_default();
        let documented = statements.first().is_some_and(|s| self.is_docstring(*s));

        self.metrics.record_function(FunctionFacts {
            name: name.unwrap_or(""),
            statements: statements.len(),
            type_hinted,
            documented,
            depth: enclosing_functions + 1,
            complexity: 1 + count_descendants(node, is_branch_kind),
        });
    }

    fn visit_class(&mut self, node: Node<'tree>) {
        if let Some(name) = self.field_text(node, "name") {
            self.naming.record_name_plain(Role::Classes, name);
        }
        self.metrics.record_class();
    }

    fn visit_assignment(&mut self, node: Node<'tree>) {
        // `x: int = 0` is an annotated assignment, not a plain one.
        if node.child_by_field_name("type").is_some() {
            return;
        }
        let Some(left) = node.child_by_field_name("left") else {
            return;
        };
        if left.kind() != "identifier" {
            return;
        }
        let parsed = self.parsed;
        let name = parsed.node_text(left);
        if name.is_empty() {
            return;
        }
        let role = if is_all_upper(name) {
            Role::Constants
        } else {
            Role::Variables
        };
        self.naming.record_name(role, name);
    }

    fn visit_branch(&mut self, _node: Node<'tree>) {
        self.metrics.record_branch();
    }
}
