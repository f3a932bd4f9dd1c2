//! Query index
//!
//! Pre-built per-document state for repeated query evaluation: the
//! engine's evaluation context (core function library) and a cache of
//! compiled expressions.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::ptr;
use std::rc::Rc;

use markq_dom::{Document, NodeRef};
use sxd_xpath::{Context, Factory, Value, XPath};

use crate::XPathError;

/// Upper bound on cached compiled expressions before the cache is reset
const MAX_CACHED_EXPRESSIONS: usize = 256;

pub(crate) fn compile(factory: &Factory, expr: &str) -> Result<XPath, XPathError> {
    factory
        .build(expr)
        .map_err(|e| XPathError::Compile(e.to_string()))?
        .ok_or_else(|| XPathError::Compile("empty expression".to_string()))
}

/// Query index over one document
pub struct XPathIndex<'d> {
    document: &'d Document,
    factory: Factory,
    context: Context<'d>,
    cache: RefCell<HashMap<String, Rc<XPath>>>,
}

impl<'d> XPathIndex<'d> {
    /// Build an index over `document`
    pub fn new(document: &'d Document) -> Self {
        tracing::trace!(encoding = document.encoding(), "Built query index");
        Self {
            document,
            factory: Factory::new(),
            context: Context::new(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// The indexed document
    pub fn document(&self) -> &'d Document {
        self.document
    }

    /// Number of compiled expressions currently cached
    pub fn cached_expressions(&self) -> usize {
        self.cache.borrow().len()
    }

    fn compiled(&self, expr: &str) -> Result<Rc<XPath>, XPathError> {
        if let Some(hit) = self.cache.borrow().get(expr) {
            return Ok(Rc::clone(hit));
        }

        let compiled = Rc::new(compile(&self.factory, expr)?);
        let mut cache = self.cache.borrow_mut();
        if cache.len() >= MAX_CACHED_EXPRESSIONS {
            cache.clear();
        }
        cache.insert(expr.to_string(), Rc::clone(&compiled));
        Ok(compiled)
    }

    /// Evaluate `expr` with `context` as the context node (document node
    /// when `None`).
    pub fn evaluate(
        &self,
        expr: &str,
        context: Option<NodeRef<'d>>,
    ) -> Result<Value<'d>, XPathError> {
        let node = context.unwrap_or_else(|| self.document.root());
        if !ptr::eq(node.document(), self.document) {
            return Err(XPathError::InvalidContext);
        }

        let compiled = self.compiled(expr)?;
        let value = compiled
            .evaluate(&self.context, node.raw())
            .map_err(|e| XPathError::Evaluate(e.to_string()))?;
        tracing::trace!(expr, ?value, "Evaluated expression");
        Ok(value)
    }

    /// Evaluate `expr` and require a node-set result, returned in document
    /// order
    pub fn select(
        &self,
        expr: &str,
        context: Option<NodeRef<'d>>,
    ) -> Result<Vec<NodeRef<'d>>, XPathError> {
        match self.evaluate(expr, context)? {
            Value::Nodeset(nodes) => Ok(nodes
                .document_order()
                .into_iter()
                .map(|node| NodeRef::new(self.document, node))
                .collect()),
            _ => Err(XPathError::NotANodeSet),
        }
    }
}

impl fmt::Debug for XPathIndex<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XPathIndex")
            .field("document", &self.document)
            .field("cached_expressions", &self.cached_expressions())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use markq_dom::Package;

    /// <html><body><ul id="list"><li>one</li><li class="x">two</li></ul></body></html>
    fn sample() -> Document {
        let package = Package::new();
        {
            let doc = package.as_document();
            let html = doc.create_element("html");
            let body = doc.create_element("body");
            let ul = doc.create_element("ul");
            ul.set_attribute_value("id", "list");
            let li1 = doc.create_element("li");
            let li2 = doc.create_element("li");
            li2.set_attribute_value("class", "x");
            doc.root().append_child(html);
            html.append_child(body);
            body.append_child(ul);
            ul.append_child(li1);
            li1.append_child(doc.create_text("one"));
            ul.append_child(li2);
            li2.append_child(doc.create_text("two"));
        }
        Document::new(package, "UTF-8")
    }

    #[test]
    fn test_select_in_document_order() {
        let doc = sample();
        let index = XPathIndex::new(&doc);
        let items = index.select("//li", None).unwrap();
        let texts: Vec<_> = items.iter().map(|n| n.text_content()).collect();
        assert_eq!(texts, ["one", "two"]);
    }

    #[test]
    fn test_compiled_expressions_are_cached() {
        let doc = sample();
        let index = XPathIndex::new(&doc);
        index.select("//li", None).unwrap();
        index.select("//li", None).unwrap();
        index.select("//ul", None).unwrap();
        assert_eq!(index.cached_expressions(), 2);
    }

    #[test]
    fn test_relative_to_context() {
        let doc = sample();
        let index = XPathIndex::new(&doc);
        let ul = index.select("//ul", None).unwrap()[0];
        let items = index.select("li[@class='x']", Some(ul)).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].parent(), Some(ul));
    }

    #[test]
    fn test_invalid_context() {
        let doc = sample();
        let other = sample();
        let index = XPathIndex::new(&doc);
        assert_eq!(
            index.select("li", Some(other.root())),
            Err(XPathError::InvalidContext)
        );
    }

    #[test]
    fn test_compile_errors_are_not_cached() {
        let doc = sample();
        let index = XPathIndex::new(&doc);
        assert!(matches!(index.select("//li[", None), Err(XPathError::Compile(_))));
        assert_eq!(index.cached_expressions(), 0);
    }

    #[test]
    fn test_scalar_results() {
        let doc = sample();
        let index = XPathIndex::new(&doc);
        assert!(matches!(
            index.evaluate("count(//li)", None),
            Ok(Value::Number(n)) if n == 2.0
        ));
        assert_eq!(index.select("count(//li)", None), Err(XPathError::NotANodeSet));
    }
}
