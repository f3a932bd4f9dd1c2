//! Diagnostic delivery
//!
//! Each thread has its own diagnostic mode. In emit mode (the default)
//! records are logged through `tracing` as they occur. In collect mode they
//! are buffered until the caller takes them.
//!
//! ```
//! use markq_html::errors;
//!
//! let previous = errors::use_internal_errors(true);
//! let _doc = markq_html::parse("<p><unclosed");
//! assert!(errors::take_errors().iter().any(|e| e.is_fatal()));
//! errors::use_internal_errors(previous);
//! ```

use std::cell::RefCell;

use crate::diagnostics::{ErrorRecord, Severity};

struct ErrorState {
    collect: bool,
    buffer: Vec<ErrorRecord>,
}

thread_local! {
    static STATE: RefCell<ErrorState> = const {
        RefCell::new(ErrorState {
            collect: false,
            buffer: Vec::new(),
        })
    };
}

/// Switch this thread between collect mode (`true`) and emit mode
/// (`false`), returning the previous mode. Leaving collect mode discards
/// anything still buffered.
pub fn use_internal_errors(collect: bool) -> bool {
    STATE.with_borrow_mut(|state| {
        let previous = std::mem::replace(&mut state.collect, collect);
        if !collect {
            state.buffer.clear();
        }
        previous
    })
}

/// Whether this thread is in collect mode
pub fn internal_errors_enabled() -> bool {
    STATE.with_borrow(|state| state.collect)
}

pub fn clear_errors() {
    STATE.with_borrow_mut(|state| state.buffer.clear());
}

/// Drain the buffered diagnostics in the order they were reported
pub fn take_errors() -> Vec<ErrorRecord> {
    STATE.with_borrow_mut(|state| std::mem::take(&mut state.buffer))
}

/// Deliver one diagnostic according to the current mode
pub fn report(record: ErrorRecord) {
    let buffered = STATE.with_borrow_mut(|state| {
        if state.collect {
            state.buffer.push(record.clone());
        }
        state.collect
    });
    if buffered {
        return;
    }

    match record.severity {
        Severity::Fatal => tracing::error!(
            code = record.code,
            line = record.line,
            column = record.column,
            "{}",
            record.message
        ),
        Severity::Error | Severity::Warning => tracing::warn!(
            severity = %record.severity,
            code = record.code,
            line = record.line,
            column = record.column,
            "{}",
            record.message
        ),
    }
}
