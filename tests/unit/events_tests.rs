/*!
 * Tests for pipeline event sinks
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use csvtrad::translation::{ChannelSink, CollectingSink, EventSink, FnSink, LogSink, NullSink, PipelineEvent};

#[test]
fn test_pipelineEvent_isTerminal_shouldOnlyMatchCompleteAndError() {
    assert!(PipelineEvent::Complete.is_terminal());
    assert!(PipelineEvent::Error("boom".to_string()).is_terminal());
    assert!(!PipelineEvent::Progress(50.0).is_terminal());
    assert!(!PipelineEvent::Log("x".to_string()).is_terminal());
}

#[test]
fn test_fnSink_shouldInvokeClosureForEachEvent() {
    let counter = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&counter);
    let sink = FnSink::new(move |_event| {
        seen.fetch_add(1, Ordering::SeqCst);
    });

    sink.emit(PipelineEvent::Status("a".to_string()));
    sink.emit(PipelineEvent::Complete);

    assert_eq!(counter.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_channelSink_shouldForwardEventsInOrder() {
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let sink = ChannelSink::new(tx);

    sink.emit(PipelineEvent::Progress(10.0));
    sink.emit(PipelineEvent::Complete);

    assert_eq!(rx.recv().await, Some(PipelineEvent::Progress(10.0)));
    assert_eq!(rx.recv().await, Some(PipelineEvent::Complete));
}

#[test]
fn test_channelSink_withClosedReceiver_shouldDropSilently() {
    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    drop(rx);
    let sink = ChannelSink::new(tx);

    sink.emit(PipelineEvent::Log("nobody listens".to_string()));
}

#[test]
fn test_collectingSink_shouldKeepEvents() {
    let sink = CollectingSink::new();
    sink.emit(PipelineEvent::Log("one".to_string()));
    sink.emit(PipelineEvent::Complete);

    assert_eq!(
        sink.events(),
        vec![PipelineEvent::Log("one".to_string()), PipelineEvent::Complete]
    );
}

#[test]
fn test_logAndNullSinks_shouldAcceptEveryEvent() {
    let sinks: Vec<Box<dyn EventSink>> = vec![Box::new(LogSink), Box::new(NullSink)];
    for sink in sinks {
        sink.emit(PipelineEvent::Progress(100.0));
        sink.emit(PipelineEvent::Status("s".to_string()));
        sink.emit(PipelineEvent::Error("e".to_string()));
    }
}
