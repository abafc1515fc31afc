//! Scoped loading indicator.

use std::sync::Arc;

use crate::ports::UserFeedback;

/// Shows the loading indicator on creation and hides it when dropped.
///
/// Holding the guard across a call guarantees exactly one hide for every
/// show, on every exit path.
#[must_use = "the indicator is hidden as soon as the guard is dropped"]
pub struct LoadingGuard {
    feedback: Arc<dyn UserFeedback>,
}

impl LoadingGuard {
    /// Shows the indicator with the given title.
    pub fn show(feedback: Arc<dyn UserFeedback>, title: &str) -> Self {
        feedback.show_loading(title);
        Self { feedback }
    }
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.feedback.hide_loading();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CountingFeedback;

    #[test]
    fn test_guard_pairs_show_and_hide() {
        let feedback = Arc::new(CountingFeedback::default());
        {
            let _outer = LoadingGuard::show(feedback.clone(), "a");
            let _inner = LoadingGuard::show(feedback.clone(), "b");
            assert_eq!(feedback.shown(), 2);
            assert_eq!(feedback.hidden(), 0);
        }
        assert_eq!(feedback.shown(), 2);
        assert_eq!(feedback.hidden(), 2);
    }
}
