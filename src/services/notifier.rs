use std::sync::Arc;

/// Receives fetch failures for display. Fire-and-forget.
#[cfg_attr(test, mockall::automock)]
pub trait Notifier: Send + Sync {
    fn report_error(&self, message: &str);
}

/// Default notifier: failures go to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn report_error(&self, message: &str) {
        tracing::error!("Top users query failed: {}", message);
    }
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn report_error(&self, message: &str) {
        (**self).report_error(message)
    }
}
