//! DOT text serialization for graph descriptions.

use crate::tree::GraphDescription;

/// Serialize a graph description as DOT source.
///
/// Emits a directed graph with a top-to-bottom rank direction, one node
/// statement per node carrying its label and category colors, and one edge
/// statement per parent-child edge.
pub fn to_dot(description: &GraphDescription) -> String {
    let mut output = String::new();
    output.push_str("digraph FamilyTree {\n");
    output.push_str("  rankdir=TB;\n");
    output.push_str("  node [shape=box, style=\"filled,rounded\", fontname=\"Helvetica\"];\n");
    output.push('\n');

    for node in &description.nodes {
        output.push_str(&format!(
            "  {} [label=\"{}\", fillcolor=\"{}\", color=\"{}\"];\n",
            node.id,
            escape_label(&node.label),
            node.fill_color,
            node.border_color,
        ));
    }

    if !description.edges.is_empty() {
        output.push('\n');
    }
    for edge in &description.edges {
        output.push_str(&format!("  {} -> {};\n", edge.from, edge.to));
    }

    output.push_str("}\n");
    output
}

/// Escape a label for use inside a double-quoted DOT string.
fn escape_label(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(c),
        }
    }
    escaped
}
