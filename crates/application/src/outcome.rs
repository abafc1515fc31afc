//! Boundary results for UI callers
//!
//! Session and collection operations never return `Err`; they report
//! failures as an [`Outcome::Failure`] so callers can branch without
//! error plumbing.

use riverchart_domain::UserId;
use serde_json::Value;

use crate::error::{CollectionError, SessionError};

/// Success-or-failure report of a UI-facing operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome<T, E> {
    /// The operation succeeded.
    Success(T),
    /// The operation failed; nothing was thrown.
    Failure(E),
}

impl<T, E> Outcome<T, E> {
    /// Returns true on success.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Returns the success value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            Self::Failure(_) => None,
        }
    }

    /// Returns the failure, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&E> {
        match self {
            Self::Success(_) => None,
            Self::Failure(error) => Some(error),
        }
    }

    /// Converts into a standard `Result`.
    ///
    /// # Errors
    ///
    /// Returns the failure value.
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Success(value) => Ok(value),
            Self::Failure(error) => Err(error),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T, E> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Success(value),
            Err(error) => Self::Failure(error),
        }
    }
}

/// Result of a login attempt.
pub type LoginOutcome = Outcome<UserId, SessionError>;

/// Result of a profile fetch or update; `Success(None)` when nobody is logged in.
pub type ProfileOutcome = Outcome<Option<Value>, SessionError>;

/// Result of a collection mutation.
pub type CollectionOutcome = Outcome<(), CollectionError>;
