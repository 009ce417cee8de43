//! Depth-first traversal of document trees.
//!
//! Backends implement [`NodeVisitor`] and let [`walkabout`] drive the walk:
//! an entry rule runs before the children, an exit rule after them.

use crate::ast::NodeRef;

/// What the traversal does after an entry rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Descend into the children, then run the exit rule.
    Continue,
    /// The entry rule rendered the whole node: neither the children nor the
    /// exit rule are visited.
    SkipNode,
}

/// Trait implemented by writer backends that want to consume the tree.
pub trait NodeVisitor {
    /// Entry rule, invoked before the children of `node`.
    fn visit(&mut self, node: NodeRef<'_>) -> Visit;

    /// Exit rule, invoked after the children of `node`.
    fn depart(&mut self, node: NodeRef<'_>);

    /// Entry rule for constructs the backend has no rule for. The node is
    /// treated as transparent.
    fn unknown_visit(&mut self, _node: NodeRef<'_>) -> Visit {
        Visit::Continue
    }

    /// Exit rule for constructs the backend has no rule for.
    fn unknown_departure(&mut self, _node: NodeRef<'_>) {}
}

/// Walk `node` and its descendants in document order.
pub fn walkabout<V: NodeVisitor + ?Sized>(visitor: &mut V, node: NodeRef<'_>) {
    if visitor.visit(node) == Visit::SkipNode {
        return;
    }

    for child in node.children() {
        walkabout(visitor, child);
    }

    visitor.depart(node);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{DoctreeBuilder, NodeKind};

    #[derive(Default)]
    struct Trace(Vec<String>);

    impl NodeVisitor for Trace {
        fn visit(&mut self, node: NodeRef<'_>) -> Visit {
            self.0.push(format!("+{}", node.kind().tag()));
            if matches!(node.kind(), NodeKind::Literal) {
                Visit::SkipNode
            } else {
                Visit::Continue
            }
        }

        fn depart(&mut self, node: NodeRef<'_>) {
            self.0.push(format!("-{}", node.kind().tag()));
        }
    }

    #[test]
    fn entry_and_exit_rules_nest() {
        let mut builder = DoctreeBuilder::new();
        builder
            .open(NodeKind::Paragraph)
            .leaf(NodeKind::Literal, "code")
            .text("tail")
            .close();
        let tree = builder.finish().unwrap();

        let mut trace = Trace::default();
        walkabout(&mut trace, tree.root());
        assert_eq!(
            trace.0,
            [
                "+document",
                "+paragraph",
                "+literal",
                "+#text",
                "-#text",
                "-paragraph",
                "-document"
            ]
        );
    }
}
