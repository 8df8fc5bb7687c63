//! Shared helpers for integration tests

use std::sync::{Arc, Mutex};

use runrelay::listener::api::{
    ErrorInfo, FeatureInfo, IterationInfo, ListenerResult, RunListener, SpecInfo,
};

pub type Calls = Arc<Mutex<Vec<String>>>;

/// Listener recording `kind:name`, failing on the call named by `fail_on`
pub struct Recorder {
    calls: Calls,
    fail_on: Option<&'static str>,
}

impl Recorder {
    pub fn new() -> (Self, Calls) {
        let calls: Calls = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                calls: Arc::clone(&calls),
                fail_on: None,
            },
            calls,
        )
    }

    pub fn failing_on(mut self, call: &'static str) -> Self {
        self.fail_on = Some(call);
        self
    }

    fn record(&mut self, call: &'static str, name: &str) -> ListenerResult {
        self.calls.lock().unwrap().push(format!("{}:{}", call, name));
        if self.fail_on == Some(call) {
            return Err(format!("{} refused", call).into());
        }
        Ok(())
    }
}

impl RunListener for Recorder {
    fn before_spec(&mut self, spec: &SpecInfo) -> ListenerResult {
        self.record("before_spec", &spec.name)
    }

    fn after_spec(&mut self, spec: &SpecInfo) -> ListenerResult {
        self.record("after_spec", &spec.name)
    }

    fn spec_skipped(&mut self, spec: &SpecInfo) -> ListenerResult {
        self.record("spec_skipped", &spec.name)
    }

    fn before_feature(&mut self, feature: &FeatureInfo) -> ListenerResult {
        self.record("before_feature", &feature.name)
    }

    fn after_feature(&mut self, feature: &FeatureInfo) -> ListenerResult {
        self.record("after_feature", &feature.name)
    }

    fn feature_skipped(&mut self, feature: &FeatureInfo) -> ListenerResult {
        self.record("feature_skipped", &feature.name)
    }

    fn before_iteration(&mut self, iteration: &IterationInfo) -> ListenerResult {
        self.record("before_iteration", &iteration.name)
    }

    fn after_iteration(&mut self, iteration: &IterationInfo) -> ListenerResult {
        self.record("after_iteration", &iteration.name)
    }

    fn error(&mut self, error: &ErrorInfo) -> ListenerResult {
        self.record("error", &error.message)
    }
}
