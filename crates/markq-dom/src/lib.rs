//! markq DOM - Document Object Model
//!
//! The parsed tree lives in an [`sxd_document::Package`], the document model
//! `sxd-xpath` evaluates queries over. This crate owns that package together
//! with the document's decoded encoding and doctype, and hands out borrowed
//! [`NodeRef`] / [`ElementRef`] handles. Query results come back from the
//! engine as handles into the same package, so no id mapping is needed.
//!
//! Attributes are nodes (queries such as `//@id` return them) but they are
//! never children of their element.

mod document;
mod node;

pub use document::{Doctype, Document};
pub use node::{Descendants, ElementRef, NodeRef, NodeType};

pub use sxd_document::{dom, Package};
