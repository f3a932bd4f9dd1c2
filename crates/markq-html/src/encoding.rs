//! Input decoding
//!
//! A leading XML declaration names the character encoding of the bytes that
//! follow it. The declaration itself is not markup and is removed before
//! tokenizing.

use encoding_rs::{Encoding, UTF_8, WINDOWS_1252};

use crate::diagnostics::{code, ErrorRecord, Severity};
use crate::options::ParseOptions;

const DECL_OPEN: &[u8] = b"<?xml";
const DECL_CLOSE: &[u8] = b"?>";

/// Whether `input` starts with `<?xml` after optional ASCII whitespace,
/// compared case-insensitively.
pub fn has_xml_declaration(input: &[u8]) -> bool {
    let start = leading_whitespace(input);
    input
        .get(start..start + DECL_OPEN.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(DECL_OPEN))
}

fn leading_whitespace(input: &[u8]) -> usize {
    input.iter().take_while(|b| b.is_ascii_whitespace()).count()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

#[derive(Debug, PartialEq)]
enum Sniffed<'a> {
    /// No declaration present
    None,
    /// `<?xml` without a closing `?>`
    Unterminated,
    Declaration {
        encoding: Option<String>,
        rest: &'a [u8],
    },
}

fn sniff(input: &[u8]) -> Sniffed<'_> {
    if !has_xml_declaration(input) {
        return Sniffed::None;
    }
    let body_start = leading_whitespace(input) + DECL_OPEN.len();
    let Some(len) = find(&input[body_start..], DECL_CLOSE) else {
        return Sniffed::Unterminated;
    };
    let decl = &input[body_start..body_start + len];
    Sniffed::Declaration {
        encoding: encoding_attr(decl),
        rest: &input[body_start + len + DECL_CLOSE.len()..],
    }
}

/// Value of the `encoding` pseudo-attribute inside a declaration body
fn encoding_attr(decl: &[u8]) -> Option<String> {
    const NAME: &[u8] = b"encoding";
    let at = decl
        .windows(NAME.len())
        .position(|w| w.eq_ignore_ascii_case(NAME))?;
    let mut rest = &decl[at + NAME.len()..];
    rest = &rest[leading_whitespace(rest)..];
    rest = rest.strip_prefix(b"=")?;
    rest = &rest[leading_whitespace(rest)..];
    let (&quote, rest) = rest.split_first()?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let end = rest.iter().position(|&b| b == quote)?;
    Some(String::from_utf8_lossy(&rest[..end]).into_owned())
}

/// Decode `input` to text, reporting problems through `report`.
///
/// Returns the decoded text and the encoding actually used.
pub(crate) fn decode(
    input: &[u8],
    options: ParseOptions,
    report: &mut impl FnMut(ErrorRecord),
) -> (String, &'static Encoding) {
    let (label, declared, body) = match sniff(input) {
        Sniffed::None => (None, false, input),
        Sniffed::Unterminated => {
            report(
                ErrorRecord::new(
                    Severity::Error,
                    code::XML_DECL_UNTERMINATED,
                    "XML declaration is not terminated by '?>'",
                )
                .at(1, 1),
            );
            (None, false, input)
        }
        Sniffed::Declaration { encoding, rest } => (encoding, true, rest),
    };

    let encoding = if options.contains(ParseOptions::IGNORE_ENCODING) {
        UTF_8
    } else if let Some(label) = label {
        match Encoding::for_label(label.trim().as_bytes()) {
            Some(encoding) => encoding,
            None => {
                report(
                    ErrorRecord::new(
                        Severity::Fatal,
                        code::UNSUPPORTED_ENCODING,
                        format!("Unsupported encoding '{label}'"),
                    )
                    .at(1, 1),
                );
                UTF_8
            }
        }
    } else if declared {
        UTF_8
    } else {
        WINDOWS_1252
    };

    let (text, actual, malformed) = encoding.decode(body);
    if malformed {
        report(
            ErrorRecord::new(
                Severity::Error,
                code::INVALID_BYTES,
                format!("Input is not valid {}; malformed sequences replaced", actual.name()),
            )
            .at(1, 1),
        );
    }
    if actual != encoding {
        tracing::debug!(declared = encoding.name(), used = actual.name(), "Byte order mark overrides encoding");
    }
    (text.into_owned(), actual)
}
