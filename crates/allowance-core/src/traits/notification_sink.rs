use crate::models::{Notification, Severity};

/// Receives user-facing notices. Fire-and-forget: nothing is returned.
pub trait INotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log. Default sink when no UI is attached.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl INotificationSink for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Info => tracing::info!(title = %n.title, "{}", n.message),
            Severity::Warning => tracing::warn!(title = %n.title, "{}", n.message),
            Severity::Critical => tracing::error!(title = %n.title, "{}", n.message),
        }
    }
}
