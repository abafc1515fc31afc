//! Terminal-side user feedback and navigation.

mod logging_navigator;
mod tracing_feedback;

pub use logging_navigator::LoggingNavigator;
pub use tracing_feedback::TracingFeedback;
