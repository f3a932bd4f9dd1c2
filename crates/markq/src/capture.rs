//! Scoped diagnostic capture

use markq_html::errors;

/// Keeps the engine in collect mode for this thread until dropped, then
/// restores whatever mode was active before.
pub(crate) struct DiagnosticCapture {
    previous: bool,
}

impl DiagnosticCapture {
    pub(crate) fn begin() -> Self {
        let previous = errors::use_internal_errors(true);
        tracing::trace!(previous, "Diagnostic capture started");
        Self { previous }
    }
}

impl Drop for DiagnosticCapture {
    fn drop(&mut self) {
        errors::use_internal_errors(self.previous);
        tracing::trace!(restored = self.previous, "Diagnostic capture ended");
    }
}
