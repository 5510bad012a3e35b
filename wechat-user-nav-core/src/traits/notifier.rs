//! Failure notification

use crate::error::NavError;

/// Surfaces failed transitions to the user
pub trait Notifier: Send + Sync {
    /// # Arguments
    /// * `target` - Name of the state (or the URL) the transition tried to reach
    /// * `error` - Why it failed
    fn transition_failed(&self, target: &str, error: &NavError);
}

/// Notifier that only logs
///
/// Expected failures log at `warn`, everything else at `error`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn transition_failed(&self, target: &str, error: &NavError) {
        if error.is_expected() {
            log::warn!("Transition to {target} failed: {error}");
        } else {
            log::error!("Transition to {target} failed: {error}");
        }
    }
}
