//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and copies the result into the sxd document
//! model that queries run over.

use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::tokenizer::TokenizerOpts;
use html5ever::tree_builder::TreeBuilderOpts;
use html5ever::{parse_document, ParseOpts};
use markq_dom::{dom, Doctype, Document, Package};
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::diagnostics::{self, ErrorRecord, Severity};
use crate::encoding;
use crate::errors;
use crate::options::ParseOptions;

/// Where a converted node gets appended
#[derive(Clone, Copy)]
enum Parent<'d> {
    Root(dom::Root<'d>),
    Element(dom::Element<'d>),
}

impl<'d> Parent<'d> {
    fn append<C>(self, child: C)
    where
        C: Into<dom::ChildOfRoot<'d>> + Into<dom::ChildOfElement<'d>>,
    {
        match self {
            Parent::Root(root) => root.append_child(child),
            Parent::Element(element) => element.append_child(child),
        }
    }
}

/// HTML5 parser
#[derive(Debug, Clone, Default)]
pub struct HtmlParser {
    options: ParseOptions,
}

impl HtmlParser {
    /// Create a parser with default options
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ParseOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ParseOptions {
        self.options
    }

    /// Parse raw bytes into a Document.
    ///
    /// Never fails: malformed input still yields a tree, and every problem
    /// found along the way is delivered through [`errors::report`].
    pub fn parse(&self, input: &[u8]) -> Document {
        let mut records = Vec::new();
        let (text, encoding) = encoding::decode(input, self.options, &mut |r| records.push(r));
        tracing::debug!(bytes = input.len(), encoding = encoding.name(), "Parsing HTML document");

        let opts = ParseOpts {
            tokenizer: TokenizerOpts {
                exact_errors: true,
                ..Default::default()
            },
            tree_builder: TreeBuilderOpts {
                exact_errors: true,
                scripting_enabled: !self.options.contains(ParseOptions::NO_SCRIPTING),
                ..Default::default()
            },
        };
        let dom = parse_document(RcDom::default(), opts).one(StrTendril::from(text));

        for message in dom.errors.borrow().iter() {
            let (severity, code) = diagnostics::classify(message);
            records.push(ErrorRecord::new(severity, code, message.to_string()));
        }
        for record in records {
            if self.keeps(&record) {
                errors::report(record);
            }
        }

        let package = Package::new();
        let doctype = self.convert(&dom.document, package.as_document());
        let document = Document::new(package, encoding.name()).with_doctype(doctype);

        tracing::debug!("Parsed {} nodes", document.node_count());
        document
    }

    fn keeps(&self, record: &ErrorRecord) -> bool {
        match record.severity {
            Severity::Fatal => true,
            Severity::Error => !self.options.contains(ParseOptions::NO_ERROR),
            Severity::Warning => !self.options.contains(ParseOptions::NO_WARNING),
        }
    }

    /// Copy the RcDom tree under `handle` into `doc`, returning the
    /// doctype unless it is filtered out.
    ///
    /// Walks with an explicit stack; nesting depth is bounded only by
    /// memory.
    fn convert<'d>(&self, handle: &Handle, doc: dom::Document<'d>) -> Option<Doctype> {
        let mut doctype = None;
        let mut stack = vec![(handle.clone(), Parent::Root(doc.root()))];

        while let Some((handle, parent)) = stack.pop() {
            match &handle.data {
                RcNodeData::Document => {
                    push_children(&mut stack, &handle, parent);
                }
                RcNodeData::Doctype {
                    name,
                    public_id,
                    system_id,
                } => {
                    if !self.options.contains(ParseOptions::NO_DOCTYPE) {
                        doctype = Some(Doctype {
                            name: name.to_string(),
                            public_id: public_id.to_string(),
                            system_id: system_id.to_string(),
                        });
                    }
                }
                RcNodeData::Text { contents } => {
                    let text = contents.borrow();
                    if self.options.contains(ParseOptions::NO_BLANKS) && text.trim().is_empty() {
                        continue;
                    }
                    // The document node holds no text
                    if let Parent::Element(element) = parent {
                        element.append_child(doc.create_text(&text));
                    }
                }
                RcNodeData::Comment { contents } => {
                    if !self.options.contains(ParseOptions::NO_COMMENTS) {
                        parent.append(doc.create_comment(contents));
                    }
                }
                RcNodeData::Element {
                    name,
                    attrs,
                    template_contents,
                    ..
                } => {
                    let element = doc.create_element(&*name.local);
                    for attr in attrs.borrow().iter() {
                        let name = match &attr.name.prefix {
                            Some(prefix) => format!("{}:{}", prefix, attr.name.local),
                            None => attr.name.local.to_string(),
                        };
                        element.set_attribute_value(name.as_str(), &attr.value);
                    }
                    parent.append(element);

                    // <template> keeps its content in a separate fragment,
                    // converted after the element's own children
                    if let Some(content) = template_contents.borrow().as_ref() {
                        push_children(&mut stack, content, Parent::Element(element));
                    }
                    push_children(&mut stack, &handle, Parent::Element(element));
                }
                RcNodeData::ProcessingInstruction { target, contents } => {
                    parent.append(doc.create_processing_instruction(target, Some(&contents[..])));
                }
            }
        }
        doctype
    }
}

/// Queue the children of `handle` so they pop in document order
fn push_children<'d>(stack: &mut Vec<(Handle, Parent<'d>)>, handle: &Handle, parent: Parent<'d>) {
    stack.extend(
        handle
            .children
            .borrow()
            .iter()
            .rev()
            .map(|child| (child.clone(), parent)),
    );
}
