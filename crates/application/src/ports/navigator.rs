//! Navigation port

/// Route of the entry/login screen.
pub const LOGIN_ROUTE: &str = "/pages/login/login";

/// Port for screen navigation triggered by the session layer.
pub trait Navigator: Send + Sync {
    /// Replaces the whole navigation stack with `route`.
    fn relaunch(&self, route: &str);
}
