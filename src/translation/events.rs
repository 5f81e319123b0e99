/*!
 * Observation events emitted while a row is translated.
 *
 * Events are informational only. A sink can drop, buffer or forward them and
 * nothing it does changes the translated output.
 */

use log::{debug, error, info};
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;

/// One observation from the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum PipelineEvent {
    /// Completion of the current row, 0.0 to 100.0
    Progress(f64),
    /// Short description of the current step
    Status(String),
    /// Detail line worth showing to the user
    Log(String),
    /// The row finished
    Complete,
    /// The run stopped on an error
    Error(String),
}

impl PipelineEvent {
    /// Whether this event ends a run
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete | Self::Error(_))
    }
}

/// Receiver of pipeline events
pub trait EventSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

/// Sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: PipelineEvent) {}
}

/// Sink that forwards events to the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl EventSink for LogSink {
    fn emit(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::Progress(percent) => debug!("Progress: {:.0}%", percent),
            PipelineEvent::Status(message) => info!("{}", message),
            PipelineEvent::Log(message) => info!("{}", message),
            PipelineEvent::Complete => info!("Translation complete"),
            PipelineEvent::Error(message) => error!("{}", message),
        }
    }
}

/// Sink wrapping a closure
pub struct FnSink<F>(F)
where
    F: Fn(PipelineEvent) + Send + Sync;

impl<F> FnSink<F>
where
    F: Fn(PipelineEvent) + Send + Sync,
{
    pub fn new(callback: F) -> Self {
        Self(callback)
    }
}

impl<F> EventSink for FnSink<F>
where
    F: Fn(PipelineEvent) + Send + Sync,
{
    fn emit(&self, event: PipelineEvent) {
        (self.0)(event)
    }
}

/// Sink that sends events over a tokio channel
///
/// A closed receiver is not an error; later events are dropped.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    sender: UnboundedSender<PipelineEvent>,
}

impl ChannelSink {
    pub fn new(sender: UnboundedSender<PipelineEvent>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelSink {
    fn emit(&self, event: PipelineEvent) {
        let _ = self.sender.send(event);
    }
}

/// Sink that keeps every event in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    events: Mutex<Vec<PipelineEvent>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the events received so far
    pub fn events(&self) -> Vec<PipelineEvent> {
        self.events.lock().clone()
    }
}

impl EventSink for CollectingSink {
    fn emit(&self, event: PipelineEvent) {
        self.events.lock().push(event);
    }
}
