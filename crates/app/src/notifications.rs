//! User-facing notifications.
//!
//! Notifications are fire-and-forget: they are shown (or logged) and then gone.

use mockall::automock;

#[automock]
pub trait Notifier: Send + Sync {
    /// Reports a completed action.
    fn success(&self, message: &str);

    /// Reports a failed action.
    fn error(&self, message: &str);
}

/// Emits notifications as `tracing` events on the `ventafacil::notifications` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn success(&self, message: &str) {
        tracing::info!(target: "ventafacil::notifications", kind = "success", "{message}");
    }

    fn error(&self, message: &str) {
        tracing::warn!(target: "ventafacil::notifications", kind = "error", "{message}");
    }
}
