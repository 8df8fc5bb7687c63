//! Tests for listener failure containment and the stopped latch

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use strum::IntoEnumIterator;

use super::helpers::{feature, kinds, produce, spec, wait_for, FailureMode, RecordingListener};
use crate::dispatcher::api::{AsyncRunListener, WorkerExit, WorkerState};
use crate::listener::api::EventKind;

#[test]
fn test_failure_abandons_events_behind_it() {
    let (listener, calls) = RecordingListener::new();
    let listener = listener.failing_on(EventKind::AfterFeature, FailureMode::Error);
    let relay = AsyncRunListener::with_delegate(listener);

    relay.before_spec(spec());
    relay.before_feature(feature());
    relay.after_feature(feature());
    relay.after_spec(spec());
    relay.start().unwrap();
    let exit = relay.stop().unwrap();

    assert_eq!(
        kinds(&calls),
        vec![
            EventKind::BeforeSpec,
            EventKind::BeforeFeature,
            EventKind::AfterFeature,
        ]
    );
    assert_eq!(
        exit,
        WorkerExit::ListenerFailed {
            kind: EventKind::AfterFeature,
            message: "after-feature failed".to_string(),
        }
    );
    assert!(relay.is_stopped());
    assert_eq!(relay.state(), WorkerState::Terminated);

    let stats = relay.statistics();
    assert_eq!(stats.enqueued(), 4);
    assert_eq!(stats.delivered(), 2);
    assert_eq!(stats.failures(), 1);
    assert_eq!(stats.abandoned(), 1);
}

#[test]
fn test_listener_panic_is_contained() {
    let (listener, calls) = RecordingListener::new();
    let listener = listener.failing_on(EventKind::BeforeFeature, FailureMode::Panic);
    let relay = AsyncRunListener::with_delegate(listener);
    relay.start().unwrap();

    relay.before_spec(spec());
    relay.before_feature(feature());
    relay.after_feature(feature());

    match relay.stop().unwrap() {
        WorkerExit::ListenerFailed { kind, message } => {
            assert_eq!(kind, EventKind::BeforeFeature);
            assert!(message.contains("listener panicked"), "got: {}", message);
            assert!(message.contains("before-feature exploded"), "got: {}", message);
        }
        other => panic!("Expected ListenerFailed, got {:?}", other),
    }
    assert_eq!(
        kinds(&calls),
        vec![EventKind::BeforeSpec, EventKind::BeforeFeature]
    );
    assert!(relay.is_stopped());
}

#[test]
fn test_every_kind_dropped_once_stopped() {
    let (listener, calls) = RecordingListener::new();
    let listener = listener.failing_on(EventKind::BeforeSpec, FailureMode::Error);
    let relay = AsyncRunListener::with_delegate(listener);
    relay.start().unwrap();

    relay.before_spec(spec());
    assert!(wait_for(Duration::from_secs(5), || relay.is_stopped()));

    for kind in EventKind::iter() {
        produce(&relay, kind);
    }

    assert_eq!(relay.statistics().dropped(), 9);
    assert_eq!(relay.statistics().enqueued(), 1);
    assert_eq!(relay.pending(), 0);

    relay.stop().unwrap();
    assert_eq!(kinds(&calls), vec![EventKind::BeforeSpec]);
}

#[test]
fn test_stopped_latch_survives_stop() {
    let (listener, _calls) = RecordingListener::new();
    let listener = listener.failing_on(EventKind::Error, FailureMode::Error);
    let relay = AsyncRunListener::with_delegate(listener);
    relay.start().unwrap();

    produce(&relay, EventKind::Error);
    relay.stop().unwrap();
    assert!(relay.is_stopped());

    produce(&relay, EventKind::BeforeSpec);
    produce(&relay, EventKind::AfterSpec);
    assert!(relay.is_stopped());
    assert_eq!(relay.statistics().dropped(), 2);
}

#[test]
fn test_failure_does_not_reach_producer_thread() {
    let (listener, _calls) = RecordingListener::new();
    let listener = listener.failing_on(EventKind::AfterFeature, FailureMode::Panic);
    let relay = Arc::new(AsyncRunListener::with_delegate(listener));
    relay.start().unwrap();

    let producer = {
        let relay = Arc::clone(&relay);
        thread::spawn(move || {
            relay.before_feature(feature());
            relay.after_feature(feature());
            // Keep producing after the failure
            for _ in 0..100 {
                relay.after_spec(spec());
            }
        })
    };
    assert!(producer.join().is_ok());

    let started = Instant::now();
    let exit = relay.stop().unwrap();
    assert!(started.elapsed() < Duration::from_secs(2));
    assert!(matches!(exit, WorkerExit::ListenerFailed { .. }));

    let stats = relay.statistics();
    assert_eq!(stats.delivered(), 1);
    assert_eq!(stats.failures(), 1);
    // Each producer call was either accepted or refused, never both
    assert_eq!(stats.enqueued() + stats.dropped(), 102);
    assert!(stats.abandoned() <= stats.enqueued() - 2);
}
