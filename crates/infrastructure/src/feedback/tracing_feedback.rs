//! User feedback rendered as log events.
//!
//! The loading indicator is reference counted: it is shown when the first
//! caller asks for it and hidden when the last one releases it, so
//! concurrent calls never hide each other's indicator.

use std::sync::atomic::{AtomicUsize, Ordering};

use riverchart_application::{ToastKind, UserFeedback};
use tracing::{debug, info};

/// `UserFeedback` that logs through `tracing`.
#[derive(Debug, Default)]
pub struct TracingFeedback {
    depth: AtomicUsize,
}

impl TracingFeedback {
    /// Creates the adapter with no indicator showing.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            depth: AtomicUsize::new(0),
        }
    }

    /// Number of outstanding indicator requests.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth.load(Ordering::SeqCst)
    }
}

impl UserFeedback for TracingFeedback {
    fn show_loading(&self, title: &str) {
        let previous = self.depth.fetch_add(1, Ordering::SeqCst);
        if previous == 0 {
            info!(%title, "loading");
        } else {
            debug!(%title, depth = previous + 1, "loading indicator stacked");
        }
    }

    fn hide_loading(&self) {
        let released = self
            .depth
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |d| d.checked_sub(1));
        if released == Ok(1) {
            debug!("loading finished");
        }
    }

    fn toast(&self, message: &str, kind: ToastKind) {
        match kind {
            ToastKind::Success => info!(%message, "success"),
            ToastKind::Plain => info!(%message, "notice"),
        }
    }
}
