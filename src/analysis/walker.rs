//! Stack-based syntax tree traversal.
//!
//! Deeply nested files would overflow the call stack with a recursive
//! visitor, so the tree is walked with an explicit worklist. Each language
//! maps its node kinds onto a small set of categories and receives one
//! callback per category.

use tree_sitter::Node;

/// Node categories the structural walk cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    Function,
    Class,
    Assignment,
    Branch,
}

/// Per-language callbacks invoked during a walk.
pub trait NodeVisitor<'tree> {
    /// Map a node kind to a category, or `None` to only descend.
    fn category(&self, kind: &str) -> Option<NodeCategory>;

    /// A function definition. `enclosing_functions` counts the function
    /// definitions that contain this one.
    fn visit_function(&mut self, node: Node<'tree>, enclosing_functions: usize);

    fn visit_class(&mut self, node: Node<'tree>);

    fn visit_assignment(&mut self, node: Node<'tree>);

    fn visit_branch(&mut self, node: Node<'tree>);
}

/// Visit every node under `root` once, in document order.
pub fn walk_tree<'tree, V: NodeVisitor<'tree>>(root: Node<'tree>, visitor: &mut V) {
    let mut stack: Vec<(Node<'tree>, usize)> = vec![(root, 0)];
    let mut cursor = root.walk();

    while let Some((node, depth)) = stack.pop() {
        let category = visitor.category(node.kind());
        match category {
            Some(NodeCategory::Function) => visitor.visit_function(node, depth),
            Some(NodeCategory::Class) => visitor.visit_class(node),
            Some(NodeCategory::Assignment) => visitor.visit_assignment(node),
            Some(NodeCategory::Branch) => visitor.visit_branch(node),
            None => {}
        }

        let child_depth = if category == Some(NodeCategory::Function) {
            depth + 1
        } else {
            depth
        };

        let children: Vec<Node<'tree>> = node.children(&mut cursor).collect();
        // Reverse so the leftmost child is popped first.
        stack.extend(children.into_iter().rev().map(|c| (c, child_depth)));
    }
}

/// Count the nodes strictly below `node` whose kind satisfies `matches`.
pub fn count_descendants<'tree, F: Fn(&str) -> bool>(node: Node<'tree>, matches: F) -> usize {
    let mut count = 0;
    let mut cursor = node.walk();
    let mut stack: Vec<Node<'tree>> = node.children(&mut cursor).collect();

    while let Some(current) = stack.pop() {
        if matches(current.kind()) {
            count += 1;
        }
        stack.extend(current.children(&mut cursor));
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;
    use tree_sitter::Parser;

    fn parse(source: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_python::LANGUAGE.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    #[test]
    fn test_count_descendants_excludes_the_node_itself() {
        let tree = parse("if a:\n    if b:\n        pass\n");
        let root = tree.root_node();
        let outer = root.named_child(0).unwrap();
        assert_eq!(outer.kind(), "if_statement");

        assert_eq!(count_descendants(root, |k| k == "if_statement"), 2);
        assert_eq!(count_descendants(outer, |k| k == "if_statement"), 1);
    }
}
