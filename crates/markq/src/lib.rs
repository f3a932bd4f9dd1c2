//! markq
//!
//! Loads HTML into a document tree with explicit charset handling and
//! structured diagnostic capture, then answers XPath element queries over
//! the result.
//!
//! # Example
//! ```
//! use markq::{get_all, get_first, class_predicate, load_html, ParseOptions};
//!
//! let doc = load_html(
//!     r#"<ul><li class="item first">a</li><li class="item">b</li></ul>"#,
//!     ParseOptions::default(),
//!     None,
//! )?;
//! let first = get_first(&doc, "//li", None)?;
//! assert_eq!(first.text_content(), "a");
//!
//! let query = format!("//li[{}]", class_predicate("item"));
//! assert_eq!(get_all(&doc, &query, None)?.len(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod capture;
mod charset;
mod declaration;
mod error;
mod loader;
mod query;

pub use charset::{default_charset, INITIAL_CHARSET};
pub use declaration::with_charset_declaration;
pub use error::{FatalParseError, QueryError};
pub use loader::{load_html, process_html, Flow, Loader};
pub use query::{class_predicate, get_all, get_first, QueryTarget};

pub use markq_dom::{Doctype, Document, ElementRef, NodeRef, NodeType};
pub use markq_html::{code, ErrorRecord, ParseOptions, Severity};
pub use markq_xpath::{XPathError, XPathIndex, XPathValue};

// Re-export sub-crates for advanced usage
pub use markq_dom as dom;
pub use markq_html as html;
pub use markq_xpath as xpath;
