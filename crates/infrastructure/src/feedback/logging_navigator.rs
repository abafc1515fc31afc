//! Navigation requests logged instead of rendered.

use riverchart_application::Navigator;
use tracing::info;

/// `Navigator` for headless front ends.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingNavigator;

impl Navigator for LoggingNavigator {
    fn relaunch(&self, route: &str) {
        info!(%route, "relaunch requested");
    }
}
