//! Node handles
//!
//! [`NodeRef`] pairs a query-model node with the [`Document`] that owns it.
//! Every walk here is iterative so that arbitrarily deep markup cannot
//! exhaust the stack.

use std::fmt;
use std::ops::Deref;
use std::ptr;

use sxd_document::dom::{self, ChildOfElement, ChildOfRoot, ParentOfChild};
use sxd_xpath::nodeset::Node;

use crate::Document;

/// Node type enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Document,
    Element,
    Attribute,
    Text,
    Comment,
    ProcessingInstruction,
    Namespace,
}

/// Borrowed handle to a node of a [`Document`]
#[derive(Clone, Copy)]
pub struct NodeRef<'d> {
    doc: &'d Document,
    node: Node<'d>,
}

impl<'d> NodeRef<'d> {
    /// Pair `node` with its owning document.
    ///
    /// `node` must come from `doc`'s package, e.g. a query evaluated over
    /// one of `doc`'s nodes.
    pub fn new(doc: &'d Document, node: Node<'d>) -> Self {
        Self { doc, node }
    }

    /// Owning document
    pub fn document(self) -> &'d Document {
        self.doc
    }

    /// The query-model node
    pub fn raw(self) -> Node<'d> {
        self.node
    }

    pub fn node_type(self) -> NodeType {
        match self.node {
            Node::Root(_) => NodeType::Document,
            Node::Element(_) => NodeType::Element,
            Node::Attribute(_) => NodeType::Attribute,
            Node::Text(_) => NodeType::Text,
            Node::Comment(_) => NodeType::Comment,
            Node::ProcessingInstruction(_) => NodeType::ProcessingInstruction,
            Node::Namespace(_) => NodeType::Namespace,
        }
    }

    pub fn is_element(self) -> bool {
        matches!(self.node, Node::Element(_))
    }

    /// Narrow to an element handle
    pub fn as_element(self) -> Option<ElementRef<'d>> {
        match self.node {
            Node::Element(element) => Some(ElementRef { node: self, element }),
            _ => None,
        }
    }

    /// Tag name, attribute name or PI target
    pub fn name(self) -> Option<&'d str> {
        match self.node {
            Node::Element(e) => Some(e.name().local_part()),
            Node::Attribute(a) => Some(a.name().local_part()),
            Node::ProcessingInstruction(pi) => Some(pi.target()),
            _ => None,
        }
    }

    /// String value (descendant text for the document and elements)
    pub fn text_content(self) -> String {
        match self.node {
            Node::Root(_) | Node::Element(_) => {
                let mut out = String::new();
                for node in self.descendants() {
                    if let Node::Text(text) = node.node {
                        out.push_str(text.text());
                    }
                }
                out
            }
            Node::Attribute(a) => a.value().to_string(),
            Node::Text(t) => t.text().to_string(),
            Node::Comment(c) => c.text().to_string(),
            Node::ProcessingInstruction(pi) => pi.value().unwrap_or_default().to_string(),
            Node::Namespace(_) => String::new(),
        }
    }

    /// Parent node; the owning element for attributes
    pub fn parent(self) -> Option<NodeRef<'d>> {
        let parent = match self.node {
            Node::Root(_) | Node::Namespace(_) => None,
            Node::Element(e) => e.parent().map(from_parent),
            Node::Attribute(a) => a.parent().map(Node::Element),
            Node::Text(t) => t.parent().map(Node::Element),
            Node::Comment(c) => c.parent().map(from_parent),
            Node::ProcessingInstruction(pi) => pi.parent().map(from_parent),
        };
        parent.map(|node| NodeRef::new(self.doc, node))
    }

    pub fn children(self) -> impl Iterator<Item = NodeRef<'d>> {
        let doc = self.doc;
        child_nodes(self.node).into_iter().map(move |node| NodeRef::new(doc, node))
    }

    /// Descendants in document order, excluding `self` and attributes
    pub fn descendants(self) -> Descendants<'d> {
        let mut stack = child_nodes(self.node);
        stack.reverse();
        Descendants { doc: self.doc, stack }
    }
}

fn from_parent(parent: ParentOfChild<'_>) -> Node<'_> {
    match parent {
        ParentOfChild::Root(r) => Node::Root(r),
        ParentOfChild::Element(e) => Node::Element(e),
    }
}

fn child_nodes(node: Node<'_>) -> Vec<Node<'_>> {
    match node {
        Node::Root(root) => root
            .children()
            .into_iter()
            .map(|child| match child {
                ChildOfRoot::Element(e) => Node::Element(e),
                ChildOfRoot::Comment(c) => Node::Comment(c),
                ChildOfRoot::ProcessingInstruction(pi) => Node::ProcessingInstruction(pi),
            })
            .collect(),
        Node::Element(element) => element
            .children()
            .into_iter()
            .map(|child| match child {
                ChildOfElement::Element(e) => Node::Element(e),
                ChildOfElement::Text(t) => Node::Text(t),
                ChildOfElement::Comment(c) => Node::Comment(c),
                ChildOfElement::ProcessingInstruction(pi) => Node::ProcessingInstruction(pi),
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Pre-order iterator over a subtree
pub struct Descendants<'d> {
    doc: &'d Document,
    stack: Vec<Node<'d>>,
}

impl<'d> Iterator for Descendants<'d> {
    type Item = NodeRef<'d>;

    fn next(&mut self) -> Option<NodeRef<'d>> {
        let node = self.stack.pop()?;
        let start = self.stack.len();
        self.stack.extend(child_nodes(node));
        self.stack[start..].reverse();
        Some(NodeRef::new(self.doc, node))
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.doc, other.doc) && self.node == other.node
    }
}

impl Eq for NodeRef<'_> {}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("type", &self.node_type())
            .field("name", &self.name())
            .finish()
    }
}

/// A [`NodeRef`] known to point at an element
#[derive(Clone, Copy)]
pub struct ElementRef<'d> {
    node: NodeRef<'d>,
    element: dom::Element<'d>,
}

impl<'d> ElementRef<'d> {
    /// Local tag name
    pub fn tag_name(self) -> &'d str {
        self.element.name().local_part()
    }

    /// Attribute value by name
    pub fn attr(self, name: &str) -> Option<&'d str> {
        self.element.attribute_value(name)
    }

    /// Attributes as (name, value) pairs in source order
    pub fn attrs(self) -> impl Iterator<Item = (&'d str, &'d str)> {
        self.element
            .attributes()
            .into_iter()
            .map(|a| (a.name().local_part(), a.value()))
    }

    /// Whether the whitespace-separated `class` attribute holds `token`
    pub fn has_class(self, token: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_ascii_whitespace().any(|c| c == token))
    }

    pub fn as_node(self) -> NodeRef<'d> {
        self.node
    }
}

impl PartialEq for ElementRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for ElementRef<'_> {}

impl<'d> Deref for ElementRef<'d> {
    type Target = NodeRef<'d>;

    fn deref(&self) -> &NodeRef<'d> {
        &self.node
    }
}

impl<'d> From<ElementRef<'d>> for NodeRef<'d> {
    fn from(element: ElementRef<'d>) -> Self {
        element.node
    }
}

impl fmt::Debug for ElementRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ElementRef")
            .field("tag", &self.tag_name())
            .finish()
    }
}
