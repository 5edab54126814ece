use super::ast::Node;

/// Read-only traversal hooks.
///
/// `enter` runs before a node's children are walked, `leave` after them.
/// `depth` is 0 for the node `walk` was called with.
pub trait Visitor {
    fn enter(&mut self, _node: &Node, _depth: usize) {}
    fn leave(&mut self, _node: &Node, _depth: usize) {}
}

/// Walks `node` and its subtree in pre-order.
pub fn walk<V: Visitor + ?Sized>(visitor: &mut V, node: &Node) {
    walk_at(visitor, node, 0);
}

fn walk_at<V: Visitor + ?Sized>(visitor: &mut V, node: &Node, depth: usize) {
    visitor.enter(node, depth);
    for child in &node.children {
        walk_at(visitor, child, depth + 1);
    }
    visitor.leave(node, depth);
}

/// Every node of a subtree, in pre-order.
pub fn pre_order(root: &Node) -> Vec<&Node> {
    let mut nodes = vec![];
    let mut stack = vec![root];

    while let Some(node) = stack.pop() {
        nodes.push(node);
        stack.extend(node.children.iter().rev());
    }

    nodes
}
