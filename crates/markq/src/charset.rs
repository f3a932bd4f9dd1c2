//! Process-wide default charset

use std::borrow::Cow;
use std::sync::{Mutex, PoisonError};

/// Default charset before anything is installed
pub const INITIAL_CHARSET: &str = "UTF-8";

static DEFAULT_CHARSET: Mutex<Cow<'static, str>> = Mutex::new(Cow::Borrowed(INITIAL_CHARSET));

/// Read the process-wide default charset and optionally replace it.
///
/// Returns the value in effect before the call. `Some` with a non-empty
/// string installs that string; `None` or `Some("")` leaves the setting
/// untouched. The read and the write happen under one lock, so concurrent
/// callers never lose an update.
pub fn default_charset(new_value: Option<&str>) -> String {
    let mut current = DEFAULT_CHARSET
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    let previous = current.to_string();
    if let Some(value) = new_value.filter(|v| !v.is_empty()) {
        tracing::debug!(previous = %previous, new = value, "Default charset changed");
        *current = Cow::Owned(value.to_string());
    }
    previous
}
