//! User feedback port

/// Visual style of a toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    /// Text only.
    #[default]
    Plain,
    /// Text with a success mark.
    Success,
}

/// Port for the loading indicator and transient messages.
///
/// `show_loading`/`hide_loading` pairs may overlap across concurrent
/// calls; implementations keep the indicator visible until every shown
/// indicator has been hidden.
pub trait UserFeedback: Send + Sync {
    /// Shows (or stacks) the loading indicator.
    fn show_loading(&self, title: &str);

    /// Releases one loading indicator.
    fn hide_loading(&self);

    /// Shows a transient message.
    fn toast(&self, message: &str, kind: ToastKind);
}
