//! Shared fixtures for dispatcher tests

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use crate::dispatcher::api::AsyncRunListener;
use crate::listener::api::{
    ErrorInfo, ErrorSource, EventKind, FeatureInfo, IterationInfo, ListenerResult, RunListener,
    SpecInfo,
};

pub type CallLog = Arc<Mutex<Vec<(EventKind, String)>>>;

#[derive(Clone, Copy, Debug)]
pub enum FailureMode {
    Error,
    Panic,
}

/// Listener recording every call, optionally failing or blocking on one kind
pub struct RecordingListener {
    calls: CallLog,
    fail_on: Option<(EventKind, FailureMode)>,
    block_on: Option<(EventKind, mpsc::Receiver<()>)>,
}

impl RecordingListener {
    pub fn new() -> (Self, CallLog) {
        let calls: CallLog = Arc::new(Mutex::new(Vec::new()));
        let listener = Self {
            calls: Arc::clone(&calls),
            fail_on: None,
            block_on: None,
        };
        (listener, calls)
    }

    pub fn failing_on(mut self, kind: EventKind, mode: FailureMode) -> Self {
        self.fail_on = Some((kind, mode));
        self
    }

    /// Block the first matching call until `release` receives a value
    pub fn blocking_on(mut self, kind: EventKind, release: mpsc::Receiver<()>) -> Self {
        self.block_on = Some((kind, release));
        self
    }

    fn handle(&mut self, kind: EventKind, label: &str) -> ListenerResult {
        self.calls.lock().unwrap().push((kind, label.to_string()));

        if let Some((block_kind, release)) = &self.block_on {
            if *block_kind == kind {
                let _ = release.recv();
            }
        }

        match self.fail_on {
            Some((fail_kind, FailureMode::Error)) if fail_kind == kind => {
                Err(format!("{} failed", kind).into())
            }
            Some((fail_kind, FailureMode::Panic)) if fail_kind == kind => {
                panic!("{} exploded", kind)
            }
            _ => Ok(()),
        }
    }
}

impl RunListener for RecordingListener {
    fn before_spec(&mut self, spec: &SpecInfo) -> ListenerResult {
        self.handle(EventKind::BeforeSpec, &spec.name)
    }

    fn after_spec(&mut self, spec: &SpecInfo) -> ListenerResult {
        self.handle(EventKind::AfterSpec, &spec.name)
    }

    fn spec_skipped(&mut self, spec: &SpecInfo) -> ListenerResult {
        self.handle(EventKind::SpecSkipped, &spec.name)
    }

    fn before_feature(&mut self, feature: &FeatureInfo) -> ListenerResult {
        self.handle(EventKind::BeforeFeature, &feature.name)
    }

    fn after_feature(&mut self, feature: &FeatureInfo) -> ListenerResult {
        self.handle(EventKind::AfterFeature, &feature.name)
    }

    fn feature_skipped(&mut self, feature: &FeatureInfo) -> ListenerResult {
        self.handle(EventKind::FeatureSkipped, &feature.name)
    }

    fn before_iteration(&mut self, iteration: &IterationInfo) -> ListenerResult {
        self.handle(EventKind::BeforeIteration, &iteration.name)
    }

    fn after_iteration(&mut self, iteration: &IterationInfo) -> ListenerResult {
        self.handle(EventKind::AfterIteration, &iteration.name)
    }

    fn error(&mut self, error: &ErrorInfo) -> ListenerResult {
        self.handle(EventKind::Error, &error.message)
    }
}

pub fn spec() -> Arc<SpecInfo> {
    Arc::new(SpecInfo::new("StackSpec").with_package("org.example"))
}

pub fn feature() -> Arc<FeatureInfo> {
    Arc::new(FeatureInfo::new("StackSpec", "push"))
}

pub fn iteration(feature_name: &str, index: usize) -> Arc<IterationInfo> {
    Arc::new(IterationInfo::new(
        feature_name,
        format!("{} [{}]", feature_name, index),
        index,
    ))
}

pub fn error_info() -> Arc<ErrorInfo> {
    Arc::new(ErrorInfo::new(ErrorSource::Feature, "push", "boom"))
}

/// Call the producer method matching `kind`
pub fn produce(relay: &AsyncRunListener, kind: EventKind) {
    match kind {
        EventKind::BeforeSpec => relay.before_spec(spec()),
        EventKind::AfterSpec => relay.after_spec(spec()),
        EventKind::SpecSkipped => relay.spec_skipped(spec()),
        EventKind::BeforeFeature => relay.before_feature(feature()),
        EventKind::AfterFeature => relay.after_feature(feature()),
        EventKind::FeatureSkipped => relay.feature_skipped(feature()),
        EventKind::BeforeIteration => relay.before_iteration(iteration("push", 0)),
        EventKind::AfterIteration => relay.after_iteration(iteration("push", 0)),
        EventKind::Error => relay.error(error_info()),
    }
}

pub fn kinds(calls: &CallLog) -> Vec<EventKind> {
    calls.lock().unwrap().iter().map(|(kind, _)| *kind).collect()
}

/// Poll `condition` until it holds or `limit` elapses
pub fn wait_for(limit: Duration, mut condition: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + limit;
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(5));
    }
    condition()
}
