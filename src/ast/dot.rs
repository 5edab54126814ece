//! Graphviz export of a syntax tree.

use std::fmt::Write;

use super::{
    ast::Node,
    visitor::{walk, Visitor},
};

struct DotVisitor {
    out: String,
    node_counter: usize,
    parents: Vec<usize>,
}

impl DotVisitor {
    fn insert_node(&mut self, label: &str) -> usize {
        let node_id = self.node_counter;
        self.node_counter += 1;
        // writing into a String cannot fail
        let _ = writeln!(self.out, "  node_{} [label=\"{}\"];", node_id, escape_label(label));
        node_id
    }
}

impl Visitor for DotVisitor {
    fn enter(&mut self, node: &Node, _depth: usize) {
        let node_id = self.insert_node(&node.label());
        if let Some(parent) = self.parents.last() {
            let _ = writeln!(self.out, "  node_{} -> node_{};", parent, node_id);
        }
        self.parents.push(node_id);
    }

    fn leave(&mut self, _node: &Node, _depth: usize) {
        self.parents.pop();
    }
}

fn escape_label(label: &str) -> String {
    let mut escaped = String::with_capacity(label.len());
    for c in label.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\r' => {}
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders `root` as a `dot` digraph. Nodes are numbered in pre-order and
/// edges keep the child order.
pub fn to_dot(root: &Node) -> String {
    let mut visitor = DotVisitor {
        out: String::from("digraph G {\n  graph[ordering=\"out\"];\n"),
        node_counter: 0,
        parents: vec![],
    };

    walk(&mut visitor, root);
    visitor.out.push_str("}\n");

    visitor.out
}
