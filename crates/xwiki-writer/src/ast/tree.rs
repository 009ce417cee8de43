//! Arena-backed document tree.
//!
//! Nodes live in a flat vector owned by [`Doctree`] and refer to each other
//! by [`NodeId`]. The parent link is a plain index, so the tree stays
//! read-only during traversal and nodes can be compared by identity.

use std::fmt;

use ecow::EcoString;

use super::attributes::{AttrValue, Attributes};
use super::kind::NodeKind;
use crate::error::{TreeError, TreeResult};

/// Index of a node inside its [`Doctree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    fn new(index: usize) -> Self {
        Self(index as u32)
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    kind: NodeKind,
    attributes: Attributes,
    /// Content of a text leaf, empty for elements.
    text: EcoString,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl NodeData {
    fn new(kind: NodeKind, parent: Option<NodeId>) -> Self {
        Self {
            kind,
            attributes: Attributes::new(),
            text: EcoString::new(),
            parent,
            children: Vec::new(),
        }
    }
}

/// An ordered, acyclic tree of typed nodes rooted at a document node.
#[derive(Debug, Clone)]
pub struct Doctree {
    nodes: Vec<NodeData>,
}

impl Doctree {
    /// The root node.
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef {
            tree: self,
            id: NodeId::new(0),
        }
    }

    /// Looks up a node by id.
    pub fn get(&self, id: NodeId) -> Option<NodeRef<'_>> {
        (id.index() < self.nodes.len()).then_some(NodeRef { tree: self, id })
    }

    /// Number of nodes in the tree, text leaves included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the document has no content below its root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }
}

/// A borrowed cursor on one node of a [`Doctree`].
#[derive(Clone, Copy)]
pub struct NodeRef<'a> {
    tree: &'a Doctree,
    id: NodeId,
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}

impl<'a> NodeRef<'a> {
    /// Identity of the node within its tree.
    pub fn id(self) -> NodeId {
        self.id
    }

    /// The tree this node belongs to.
    pub fn tree(self) -> &'a Doctree {
        self.tree
    }

    /// The construct of the node.
    pub fn kind(self) -> &'a NodeKind {
        &self.tree.data(self.id).kind
    }

    /// All attributes of the node.
    pub fn attributes(self) -> &'a Attributes {
        &self.tree.data(self.id).attributes
    }

    /// Shorthand for a string attribute lookup.
    pub fn attr(self, key: &str) -> Option<&'a str> {
        self.attributes().str(key)
    }

    /// The parent node, absent for the root.
    pub fn parent(self) -> Option<NodeRef<'a>> {
        let parent = self.tree.data(self.id).parent?;
        Some(NodeRef {
            tree: self.tree,
            id: parent,
        })
    }

    /// Whether the parent node is of `kind`.
    pub fn parent_is(self, kind: &NodeKind) -> bool {
        self.parent().is_some_and(|parent| parent.kind() == kind)
    }

    /// Ordered children of the node.
    pub fn children(self) -> impl DoubleEndedIterator<Item = NodeRef<'a>> + ExactSizeIterator {
        let tree = self.tree;
        tree.data(self.id)
            .children
            .iter()
            .map(move |&id| NodeRef { tree, id })
    }

    /// Content of a text leaf, empty for elements.
    pub fn text(self) -> &'a str {
        &self.tree.data(self.id).text
    }

    /// Concatenation of all descendant text leaves.
    pub fn astext(self) -> EcoString {
        if matches!(self.kind(), NodeKind::Text) {
            return self.text().into();
        }

        let mut out = EcoString::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(self, out: &mut EcoString) {
        for child in self.children() {
            if matches!(child.kind(), NodeKind::Text) {
                out.push_str(child.text());
            } else {
                child.collect_text(out);
            }
        }
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("kind", self.kind())
            .finish()
    }
}

/// Dumps the subtree as single-line pseudo-XML, used in diagnostics.
impl fmt::Display for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if matches!(self.kind(), NodeKind::Text) {
            return f.write_str(self.text());
        }

        let tag = self.kind().tag();
        write!(f, "<{tag}")?;
        for (key, value) in self.attributes().iter() {
            write!(f, " {key}=\"{value}\"")?;
        }

        if self.children().len() == 0 {
            return f.write_str("/>");
        }

        f.write_str(">")?;
        for child in self.children() {
            write!(f, "{child}")?;
        }
        write!(f, "</{tag}>")
    }
}

/// Incremental constructor for [`Doctree`].
///
/// ```
/// use xwiki_writer::ast::{DoctreeBuilder, NodeKind};
///
/// let mut builder = DoctreeBuilder::new();
/// builder
///     .open(NodeKind::Paragraph)
///     .text("Hello, ")
///     .leaf(NodeKind::Strong, "world")
///     .close();
/// let tree = builder.finish().unwrap();
/// assert_eq!(tree.root().astext(), "Hello, world");
/// ```
#[derive(Debug)]
pub struct DoctreeBuilder {
    nodes: Vec<NodeData>,
    open: Vec<NodeId>,
    overclosed: bool,
}

impl Default for DoctreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DoctreeBuilder {
    /// Starts a tree with an open document root.
    pub fn new() -> Self {
        Self {
            nodes: vec![NodeData::new(NodeKind::Document, None)],
            open: vec![NodeId::new(0)],
            overclosed: false,
        }
    }

    fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(NodeId::new(0))
    }

    fn append(&mut self, data: NodeData) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        let parent = self.current();
        self.nodes.push(data);
        self.nodes[parent.index()].children.push(id);
        id
    }

    /// Opens an element as the last child of the current element.
    pub fn open(&mut self, kind: NodeKind) -> &mut Self {
        let parent = self.current();
        let id = self.append(NodeData::new(kind, Some(parent)));
        self.open.push(id);
        self
    }

    /// Sets an attribute on the current element.
    pub fn attr(&mut self, key: impl Into<EcoString>, value: impl Into<AttrValue>) -> &mut Self {
        let current = self.current();
        self.nodes[current.index()].attributes.insert(key, value);
        self
    }

    /// Appends a text leaf to the current element.
    pub fn text(&mut self, text: impl Into<EcoString>) -> &mut Self {
        let parent = self.current();
        let mut data = NodeData::new(NodeKind::Text, Some(parent));
        data.text = text.into();
        self.append(data);
        self
    }

    /// Appends an element holding a single text leaf.
    pub fn leaf(&mut self, kind: NodeKind, text: impl Into<EcoString>) -> &mut Self {
        self.open(kind).text(text).close()
    }

    /// Closes the current element.
    pub fn close(&mut self) -> &mut Self {
        if self.open.len() > 1 {
            self.open.pop();
        } else {
            self.overclosed = true;
        }
        self
    }

    /// Finishes the tree. Every opened element must have been closed.
    pub fn finish(self) -> TreeResult<Doctree> {
        if self.overclosed {
            return Err(TreeError::UnbalancedClose);
        }
        if self.open.len() > 1 {
            let unclosed = self.open[1..]
                .iter()
                .map(|id| EcoString::from(self.nodes[id.index()].kind.tag()))
                .collect();
            return Err(TreeError::UnclosedNodes(unclosed));
        }

        Ok(Doctree { nodes: self.nodes })
    }

    /// Whether the root element is the only open element.
    pub(crate) fn at_root(&self) -> bool {
        self.open.len() == 1
    }

    /// Replaces the root construct and attributes.
    pub(crate) fn set_root(&mut self, kind: NodeKind, attributes: Attributes) {
        let root = &mut self.nodes[0];
        root.kind = kind;
        root.attributes = attributes;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Doctree {
        let mut builder = DoctreeBuilder::new();
        builder
            .open(NodeKind::Section)
            .attr("ids", vec!["intro"])
            .leaf(NodeKind::Title, "Intro")
            .open(NodeKind::Paragraph)
            .text("Some ")
            .leaf(NodeKind::Emphasis, "text")
            .close()
            .close();
        builder.finish().unwrap()
    }

    #[test]
    fn parent_links_match_child_positions() {
        let tree = sample();
        fn check(node: NodeRef<'_>) {
            for child in node.children() {
                assert_eq!(child.parent(), Some(node));
                check(child);
            }
        }
        check(tree.root());
        assert_eq!(tree.root().parent(), None);
    }

    #[test]
    fn astext_concatenates_leaves() {
        let tree = sample();
        assert_eq!(tree.root().astext(), "IntroSome text");
    }

    #[test]
    fn display_dumps_pseudo_xml() {
        let tree = sample();
        let section = tree.root().children().next().unwrap();
        assert_eq!(
            section.to_string(),
            "<section ids=\"intro\"><title>Intro</title>\
             <paragraph>Some <emphasis>text</emphasis></paragraph></section>"
        );
    }

    #[test]
    fn unbalanced_builders_are_rejected() {
        let mut builder = DoctreeBuilder::new();
        builder.open(NodeKind::Paragraph);
        assert!(matches!(
            builder.finish(),
            Err(TreeError::UnclosedNodes(tags)) if tags == vec![EcoString::from("paragraph")]
        ));

        let mut builder = DoctreeBuilder::new();
        builder.close();
        assert!(matches!(builder.finish(), Err(TreeError::UnbalancedClose)));
    }
}
