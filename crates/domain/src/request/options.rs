//! Caller-supplied request overrides

use super::Headers;

/// Per-call overrides merged over the gateway defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestOptions {
    /// Extra headers; same-named defaults are replaced.
    pub headers: Headers,
    /// Timeout override in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Loading indicator override.
    pub show_loading: Option<bool>,
    /// Loading indicator text override.
    pub loading_title: Option<String>,
}

impl RequestOptions {
    /// Creates empty options (all defaults).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses the loading indicator.
    #[must_use]
    pub const fn silent(mut self) -> Self {
        self.show_loading = Some(false);
        self
    }

    /// Sets the timeout.
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Adds or replaces a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.set(name, value);
        self
    }

    /// Sets the loading indicator text.
    #[must_use]
    pub fn with_loading_title(mut self, title: impl Into<String>) -> Self {
        self.loading_title = Some(title.into());
        self
    }
}
