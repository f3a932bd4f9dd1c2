//! Document - High-level document API

use std::fmt;

use sxd_document::{dom, Package};
use sxd_xpath::nodeset::Node;

use crate::{ElementRef, NodeRef};

/// `<!DOCTYPE>` of a parsed document.
///
/// The query model has no doctype node, so it is kept beside the tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Doctype {
    pub name: String,
    pub public_id: String,
    pub system_id: String,
}

/// Parsed HTML document
pub struct Document {
    package: Package,
    /// Name of the character encoding the source was decoded with
    encoding: String,
    doctype: Option<Doctype>,
}

impl Document {
    /// Wrap a finished package
    pub fn new(package: Package, encoding: &str) -> Self {
        Self {
            package,
            encoding: encoding.to_string(),
            doctype: None,
        }
    }

    pub fn with_doctype(mut self, doctype: Option<Doctype>) -> Self {
        self.doctype = doctype;
        self
    }

    /// Character encoding the source bytes were decoded with
    pub fn encoding(&self) -> &str {
        &self.encoding
    }

    pub fn doctype(&self) -> Option<&Doctype> {
        self.doctype.as_ref()
    }

    /// The underlying sxd document
    pub fn dom(&self) -> dom::Document<'_> {
        self.package.as_document()
    }

    /// The document node
    pub fn root(&self) -> NodeRef<'_> {
        NodeRef::new(self, Node::Root(self.dom().root()))
    }

    /// The root element (`<html>` for parsed HTML)
    pub fn document_element(&self) -> Option<ElementRef<'_>> {
        self.root().children().find_map(NodeRef::as_element)
    }

    /// Number of nodes in the tree, attributes included
    pub fn node_count(&self) -> usize {
        1 + self
            .root()
            .descendants()
            .map(|n| 1 + n.as_element().map_or(0, |e| e.attrs().count()))
            .sum::<usize>()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Package::new(), "")
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("encoding", &self.encoding)
            .field("doctype", &self.doctype)
            .field("root_element", &self.document_element().map(|e| e.tag_name()))
            .finish()
    }
}
