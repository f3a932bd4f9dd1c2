//! Element queries

use std::ptr;

use markq_dom::{Document, ElementRef, NodeRef};
use markq_xpath::XPathIndex;

use crate::error::QueryError;

/// What a query runs against
#[derive(Debug, Clone, Copy)]
pub enum QueryTarget<'i, 'd> {
    /// Reuse a pre-built index
    Index(&'i XPathIndex<'d>),
    /// Index the whole document for this query
    Document(&'d Document),
    /// Query relative to this node; it always becomes the context node
    Node(NodeRef<'d>),
}

impl<'i, 'd> From<&'i XPathIndex<'d>> for QueryTarget<'i, 'd> {
    fn from(index: &'i XPathIndex<'d>) -> Self {
        QueryTarget::Index(index)
    }
}

impl<'d> From<&'d Document> for QueryTarget<'_, 'd> {
    fn from(document: &'d Document) -> Self {
        QueryTarget::Document(document)
    }
}

impl<'d> From<NodeRef<'d>> for QueryTarget<'_, 'd> {
    fn from(node: NodeRef<'d>) -> Self {
        QueryTarget::Node(node)
    }
}

impl<'d> From<ElementRef<'d>> for QueryTarget<'_, 'd> {
    fn from(element: ElementRef<'d>) -> Self {
        QueryTarget::Node(element.as_node())
    }
}

/// Run `query` and return the element matches in document order.
///
/// Zero raw matches is an error here; a non-empty match set with no
/// elements in it is not.
fn elements<'d>(
    target: QueryTarget<'_, 'd>,
    query: &str,
    context: Option<NodeRef<'d>>,
) -> Result<Vec<ElementRef<'d>>, QueryError> {
    let built;
    let (index, context) = match target {
        QueryTarget::Index(index) => (index, context),
        QueryTarget::Document(document) => {
            built = XPathIndex::new(document);
            (&built, context)
        }
        QueryTarget::Node(node) => {
            built = XPathIndex::new(node.document());
            (&built, Some(node))
        }
    };

    if let Some(node) = context {
        if !ptr::eq(node.document(), index.document()) {
            return Err(QueryError::InvalidArgument(
                "context node belongs to a different document".to_string(),
            ));
        }
    }

    let matches = index.select(query, context)?;
    tracing::trace!(query, matched = matches.len(), "Evaluated element query");
    if matches.is_empty() {
        return Err(QueryError::ElementNotFound {
            query: query.to_string(),
        });
    }

    Ok(matches.into_iter().filter_map(NodeRef::as_element).collect())
}

/// First element matched by `query`.
///
/// `context` is the context node for relative queries (document node when
/// `None`); it is ignored when the target is itself a node.
pub fn get_first<'a, 'd: 'a>(
    target: impl Into<QueryTarget<'a, 'd>>,
    query: &str,
    context: Option<NodeRef<'d>>,
) -> Result<ElementRef<'d>, QueryError> {
    elements(target.into(), query, context)?
        .into_iter()
        .next()
        .ok_or_else(|| QueryError::NoElementMatches {
            query: query.to_string(),
        })
}

/// Every element matched by `query`.
///
/// Unlike [`get_first`], a query whose matches are all non-elements (such
/// as `//@id`) yields an empty list rather than an error.
pub fn get_all<'a, 'd: 'a>(
    target: impl Into<QueryTarget<'a, 'd>>,
    query: &str,
    context: Option<NodeRef<'d>>,
) -> Result<Vec<ElementRef<'d>>, QueryError> {
    elements(target.into(), query, context)
}

/// Predicate matching elements whose `class` attribute contains the
/// whitespace-delimited token `class_name`.
///
/// ```
/// assert_eq!(
///     markq::class_predicate("item"),
///     "contains(concat(' ', normalize-space(@class), ' '), ' item ')"
/// );
/// ```
///
/// `class_name` is inserted as-is; a name containing `'` produces a
/// broken expression.
pub fn class_predicate(class_name: &str) -> String {
    format!("contains(concat(' ', normalize-space(@class), ' '), ' {class_name} ')")
}
