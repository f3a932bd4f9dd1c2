//! Document loading
//!
//! Every load wraps the input in a charset declaration, runs the engine in
//! collect mode for the duration of the call, and inspects exactly the
//! diagnostics that call produced.

use markq_dom::Document;
use markq_html::{errors, ErrorRecord, HtmlParser, ParseOptions};

use crate::capture::DiagnosticCapture;
use crate::charset::default_charset;
use crate::declaration::with_charset_declaration;
use crate::error::FatalParseError;

/// Batch callback verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flow {
    #[default]
    Continue,
    Stop,
}

impl From<()> for Flow {
    fn from(_: ()) -> Self {
        Flow::Continue
    }
}

/// `false` stops the batch, `true` continues it
impl From<bool> for Flow {
    fn from(keep_going: bool) -> Self {
        if keep_going { Flow::Continue } else { Flow::Stop }
    }
}

/// Load configuration
#[derive(Debug, Clone, Default)]
pub struct Loader {
    /// Engine options, passed through untouched
    pub options: ParseOptions,
    /// Charset for inputs without their own declaration. `None` or an
    /// empty string falls back to [`default_charset`].
    pub charset: Option<String>,
}

impl Loader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(mut self, options: ParseOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Charset used for the next load
    pub fn effective_charset(&self) -> String {
        match self.charset.as_deref() {
            Some(charset) if !charset.is_empty() => charset.to_string(),
            _ => default_charset(None),
        }
    }

    /// Load one document.
    ///
    /// Fails with the first fatal diagnostic the engine reported. Anything
    /// less severe is dropped.
    pub fn load(&self, html: impl AsRef<[u8]>) -> Result<Document, FatalParseError> {
        let charset = self.effective_charset();
        let parser = HtmlParser::with_options(self.options);
        let _capture = DiagnosticCapture::begin();

        errors::clear_errors();
        let input = with_charset_declaration(html.as_ref(), &charset);
        let document = parser.parse(&input);
        let mut records = errors::take_errors();

        if let Some(i) = records.iter().position(ErrorRecord::is_fatal) {
            let record = records.swap_remove(i);
            tracing::debug!(code = record.code, "Load failed: {}", record.message);
            return Err(FatalParseError::new(record));
        }
        for record in &records {
            tracing::debug!("Ignoring diagnostic: {record}");
        }
        Ok(document)
    }

    /// Load each input in order and hand every result to `callback` along
    /// with that document's diagnostics and whether any was fatal.
    ///
    /// Fatal diagnostics never abort the batch; the callback decides. When
    /// it returns [`Flow::Stop`] (or `false`) no further input is read.
    /// Returns the number of documents passed to the callback.
    pub fn process<I, F, R>(&self, inputs: I, mut callback: F) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
        F: FnMut(Document, Vec<ErrorRecord>, bool) -> R,
        R: Into<Flow>,
    {
        let charset = self.effective_charset();
        let parser = HtmlParser::with_options(self.options);
        let _capture = DiagnosticCapture::begin();
        let mut delivered = 0;

        for html in inputs {
            errors::clear_errors();
            let input = with_charset_declaration(html.as_ref(), &charset);
            let document = parser.parse(&input);
            let records = errors::take_errors();
            let fatal = records.iter().any(ErrorRecord::is_fatal);
            tracing::trace!(index = delivered, diagnostics = records.len(), fatal, "Loaded batch document");

            delivered += 1;
            if callback(document, records, fatal).into() == Flow::Stop {
                tracing::debug!(delivered, "Batch stopped by callback");
                break;
            }
        }
        delivered
    }
}

/// Load one document with the given options and optional charset
pub fn load_html(
    html: impl AsRef<[u8]>,
    options: ParseOptions,
    charset: Option<&str>,
) -> Result<Document, FatalParseError> {
    loader(options, charset).load(html)
}

/// Batch-load documents; see [`Loader::process`]
pub fn process_html<I, F, R>(
    inputs: I,
    callback: F,
    options: ParseOptions,
    charset: Option<&str>,
) -> usize
where
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
    F: FnMut(Document, Vec<ErrorRecord>, bool) -> R,
    R: Into<Flow>,
{
    loader(options, charset).process(inputs, callback)
}

fn loader(options: ParseOptions, charset: Option<&str>) -> Loader {
    Loader {
        options,
        charset: charset.map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flow_conversions() {
        assert_eq!(Flow::from(()), Flow::Continue);
        assert_eq!(Flow::from(true), Flow::Continue);
        assert_eq!(Flow::from(false), Flow::Stop);
    }

    #[test]
    fn test_explicit_charset_wins() {
        let loader = Loader::new().with_charset("ISO-8859-1");
        assert_eq!(loader.effective_charset(), "ISO-8859-1");
    }

    #[test]
    fn test_load_restores_emit_mode() {
        errors::use_internal_errors(false);
        let loader = Loader::new().with_charset("UTF-8");
        assert!(loader.load("<p>ok</p>").is_ok());
        assert!(!errors::internal_errors_enabled());
        assert!(loader.load("<p><unclosed").is_err());
        assert!(!errors::internal_errors_enabled());
    }

    #[test]
    fn test_process_counts_delivered() {
        let loader = Loader::new().with_charset("UTF-8");
        let delivered = loader.process(["<p>1</p>", "<p>2</p>", "<p>3</p>"], |_, _, _| Flow::Continue);
        assert_eq!(delivered, 3);
        let delivered = loader.process(["<p>1</p>", "<p>2</p>"], |_, _, _| false);
        assert_eq!(delivered, 1);
    }
}
