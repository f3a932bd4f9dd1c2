//! Parse diagnostics
//!
//! Every problem the engine notices while decoding or tokenizing a document
//! becomes an [`ErrorRecord`]. Nothing here fails the parse; callers decide
//! what a diagnostic means for them.

use std::fmt;

use serde::Serialize;

/// Diagnostic severity, ordered from least to most serious
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        })
    }
}

/// Diagnostic codes
pub mod code {
    /// Tree builder rejected a token in the current insertion mode
    pub const TREE_CONSTRUCTION: u32 = 100;
    pub const UNEXPECTED_TOKEN: u32 = 101;
    /// Missing or unusual doctype; the document renders in quirks mode
    pub const MISSING_DOCTYPE: u32 = 102;
    pub const UNEXPECTED_CHARACTER: u32 = 110;
    /// Input ended inside a tag, comment or doctype
    pub const TRUNCATED_MARKUP: u32 = 111;

    pub const UNSUPPORTED_ENCODING: u32 = 200;
    pub const INVALID_BYTES: u32 = 201;
    pub const XML_DECL_UNTERMINATED: u32 = 202;
}

/// One parse diagnostic
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ErrorRecord {
    pub severity: Severity,
    pub code: u32,
    pub message: String,
    /// 1-based line, or 0 when the source position is unknown
    pub line: u32,
    pub column: u32,
}

impl ErrorRecord {
    /// Create a record without a source position
    pub fn new(severity: Severity, code: u32, message: impl Into<String>) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            line: 0,
            column: 0,
        }
    }

    /// Attach a source position
    pub fn at(mut self, line: u32, column: u32) -> Self {
        self.line = line;
        self.column = column;
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.severity, self.code, self.message)?;
        if self.line > 0 {
            write!(f, " at line {}, column {}", self.line, self.column)?;
        }
        Ok(())
    }
}

/// Map an html5ever parse-error message to a severity and code
pub(crate) fn classify(message: &str) -> (Severity, u32) {
    if message.starts_with("Saw EOF in state") || message == "Unexpected EOF" {
        (Severity::Fatal, code::TRUNCATED_MARKUP)
    } else if message.contains("insertion mode Initial") || message.starts_with("Bad DOCTYPE") {
        (Severity::Warning, code::MISSING_DOCTYPE)
    } else if message.starts_with("Unexpected token") {
        (Severity::Error, code::UNEXPECTED_TOKEN)
    } else if message.starts_with("Saw ") && message.contains(" in state ") {
        (Severity::Error, code::UNEXPECTED_CHARACTER)
    } else {
        (Severity::Error, code::TREE_CONSTRUCTION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_truncation_is_fatal() {
        assert_eq!(
            classify("Saw EOF in state TagName"),
            (Severity::Fatal, code::TRUNCATED_MARKUP)
        );
        assert_eq!(classify("Unexpected EOF").0, Severity::Fatal);
    }

    #[test]
    fn test_classify_other_messages() {
        assert_eq!(
            classify("Unexpected token Tag(StartTag p) in insertion mode Initial").1,
            code::MISSING_DOCTYPE
        );
        assert_eq!(
            classify("Unexpected token Tag(EndTag div) in insertion mode InBody"),
            (Severity::Error, code::UNEXPECTED_TOKEN)
        );
        assert_eq!(
            classify("Saw = in state BeforeAttributeName").1,
            code::UNEXPECTED_CHARACTER
        );
        assert_eq!(
            classify("Found special tag while closing generic tag"),
            (Severity::Error, code::TREE_CONSTRUCTION)
        );
    }

    #[test]
    fn test_display() {
        let record = ErrorRecord::new(Severity::Fatal, code::UNSUPPORTED_ENCODING, "bad label")
            .at(1, 1);
        assert_eq!(record.to_string(), "fatal 200: bad label at line 1, column 1");
        let unplaced = ErrorRecord::new(Severity::Warning, code::MISSING_DOCTYPE, "no doctype");
        assert_eq!(unplaced.to_string(), "warning 102: no doctype");
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }
}
