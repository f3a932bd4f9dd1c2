use std::borrow::Cow;

use markq_html::has_xml_declaration;

/// Prefix `html` with `<?xml encoding="{charset}" ?>` unless it already
/// opens with an XML declaration (after optional whitespace, any case).
///
/// The charset is inserted verbatim.
pub fn with_charset_declaration<'a>(html: &'a [u8], charset: &str) -> Cow<'a, [u8]> {
    if has_xml_declaration(html) {
        return Cow::Borrowed(html);
    }
    let prefix = format!("<?xml encoding=\"{charset}\" ?>");
    let mut out = Vec::with_capacity(prefix.len() + html.len());
    out.extend_from_slice(prefix.as_bytes());
    out.extend_from_slice(html);
    Cow::Owned(out)
}
