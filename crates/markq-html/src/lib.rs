//! markq HTML Parser
//!
//! HTML5 parsing engine built on html5ever. Copies the parsed tree into
//! the sxd document model wrapped by `markq-dom` and reports malformed input as
//! [`ErrorRecord`] diagnostics instead of failing.
//!
//! A leading `<?xml ... encoding="..." ?>` declaration selects the character
//! encoding used to decode the input bytes; it is removed before
//! tokenizing. Without one the engine falls back to `windows-1252`, the
//! legacy default for undeclared HTML.

mod diagnostics;
mod encoding;
pub mod errors;
mod options;
mod parser;

pub use diagnostics::{code, ErrorRecord, Severity};
pub use encoding::has_xml_declaration;
pub use markq_dom::{Doctype, Document, ElementRef, NodeRef, NodeType};
pub use options::ParseOptions;
pub use parser::HtmlParser;

/// Parse HTML bytes with default options
pub fn parse(html: impl AsRef<[u8]>) -> Document {
    HtmlParser::new().parse(html.as_ref())
}

/// Parse HTML bytes with explicit options
pub fn parse_with_options(html: impl AsRef<[u8]>, options: ParseOptions) -> Document {
    HtmlParser::with_options(options).parse(html.as_ref())
}
