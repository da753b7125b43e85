//! Progress notification port
//!
//! Defines the interface for reporting that a chat turn is in flight.

/// Callback for progress updates while waiting on the assistant
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (spinner, plain text, nothing).
pub trait ProgressNotifier: Send + Sync {
    /// Called right before the request is sent
    fn on_request_start(&self, query: &str);

    /// Called once the turn has a reply; `answered` is false when the
    /// unavailable message was substituted
    fn on_request_end(&self, answered: bool);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_request_start(&self, _query: &str) {}
    fn on_request_end(&self, _answered: bool) {}
}
