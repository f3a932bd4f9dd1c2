//! Query engine errors

/// Failure to compile or evaluate an expression
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum XPathError {
    #[error("Invalid expression: {0}")]
    Compile(String),

    #[error("Evaluation failed: {0}")]
    Evaluate(String),

    #[error("Expected a node-set")]
    NotANodeSet,

    #[error("Context node does not belong to the indexed document")]
    InvalidContext,
}
