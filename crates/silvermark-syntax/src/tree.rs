//! Generic traversal over parsed trees.
//!
//! Consumers (indexers, renderers, editors) mostly need three things: the
//! first node of a kind, every node of a kind, and the text back. Each call
//! walks the tree afresh; nothing is cached.

use crate::syntax_kind::{SyntaxKind, SyntaxNode};

/// First node of `kind` in pre-order, including `tree` itself.
pub fn find_node_of_type(tree: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxNode> {
    tree.descendants().find(|node| node.kind() == kind)
}

/// Every node of `kind` in document order, including `tree` itself.
pub fn collect_nodes_of_type(tree: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
    tree.descendants().filter(|node| node.kind() == kind).collect()
}

/// Concatenation of every leaf under `tree`, in order.
///
/// For a parse result this is exactly the parsed input.
pub fn render_to_text(tree: &SyntaxNode) -> String {
    let mut text = String::with_capacity(usize::from(tree.text_range().len()));
    for token in tree.descendants_with_tokens().filter_map(|e| e.into_token()) {
        text.push_str(token.text());
    }
    text
}

/// Indented dump of a tree, one node or leaf per line.
///
/// ```text
/// Document@0..7
///   Paragraph@0..7
///     Text@0..5 "Hello"
/// ```
pub fn debug_tree(tree: &SyntaxNode) -> String {
    let mut out = String::new();
    write_node(&mut out, tree, 0);
    out
}

fn write_node(out: &mut String, node: &SyntaxNode, depth: usize) {
    let prefix = "  ".repeat(depth);
    out.push_str(&format!("{prefix}{}@{:?}\n", node.kind(), node.text_range()));
    for child in node.children_with_tokens() {
        match child {
            rowan::NodeOrToken::Node(n) => write_node(out, &n, depth + 1),
            rowan::NodeOrToken::Token(t) => out.push_str(&format!(
                "{prefix}  {}@{:?} {:?}\n",
                t.kind(),
                t.text_range(),
                t.text()
            )),
        }
    }
}
