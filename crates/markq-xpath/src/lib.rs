//! markq XPath
//!
//! XPath 1.0 queries over [`markq_dom::Document`], evaluated by
//! `sxd-xpath`. Queries run against an [`XPathIndex`], which holds the
//! engine's evaluation context and caches compiled expressions across
//! calls.

mod error;
mod index;

pub use error::XPathError;
pub use index::XPathIndex;
pub use sxd_xpath::Value as XPathValue;

/// Check that `expr` compiles, without evaluating it
pub fn validate(expr: &str) -> Result<(), XPathError> {
    index::compile(&sxd_xpath::Factory::new(), expr).map(|_| ())
}
