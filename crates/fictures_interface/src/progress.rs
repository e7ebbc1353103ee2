//! Progress reporting.

use fictures_core::ProgressEvent;
use tokio::sync::mpsc;

/// Receives progress events synchronously, one call per event.
///
/// Any `Fn(ProgressEvent)` closure is a reporter.
///
/// # Examples
///
/// ```
/// use fictures_core::{Phase, ProgressEvent};
/// use fictures_interface::ProgressReporter;
/// use std::sync::Mutex;
///
/// let tags = Mutex::new(Vec::new());
/// let reporter = |event: ProgressEvent| tags.lock().unwrap().push(event.tag());
///
/// reporter.report(ProgressEvent::PhaseStarted {
///     phase: Phase::Story,
///     message: "Generating story...".into(),
/// });
/// assert_eq!(tags.lock().unwrap().as_slice(), ["story_start"]);
/// ```
pub trait ProgressReporter: Send + Sync {
    /// Handle one event. Must not block for long; the pipeline waits on it.
    fn report(&self, event: ProgressEvent);
}

impl<F> ProgressReporter for F
where
    F: Fn(ProgressEvent) + Send + Sync,
{
    fn report(&self, event: ProgressEvent) {
        self(event)
    }
}

/// Forwards events into an unbounded channel for pull-based consumers.
///
/// Event order is preserved. Events reported after the receiver is dropped
/// are discarded.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    sender: mpsc::UnboundedSender<ProgressEvent>,
}

impl ChannelReporter {
    /// Create a reporter and the receiver that yields its events.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<ProgressEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl ProgressReporter for ChannelReporter {
    fn report(&self, event: ProgressEvent) {
        if self.sender.send(event).is_err() {
            tracing::debug!("Progress receiver dropped, discarding event");
        }
    }
}
