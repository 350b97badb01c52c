//! User-facing notifications raised by the page controller.

use tracing::{info, warn};

/// How the controller talks to the user outside the injected controls.
pub trait Notifier: Send + Sync {
    /// A blocking message box in the browser.
    fn alert(&self, message: &str);

    /// Take the user to the settings page.
    fn open_options(&self);
}

/// Writes notifications to the log. Used where there is no UI, such as
/// the command line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn alert(&self, message: &str) {
        warn!("{}", message);
    }

    fn open_options(&self) {
        info!("Set apiKey in the settings file to enable translation");
    }
}
