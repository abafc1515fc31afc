//! Session lifecycle: login, logout and profile round-trips.

mod credentials;
mod manager;

pub use credentials::Credentials;
pub use manager::{SessionManager, SessionState};
