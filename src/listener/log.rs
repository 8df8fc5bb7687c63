//! # LogRunListener: lifecycle event logger
//!
//! A minimal listener that writes every event through the `log` facade.
//! Handy as a default delegate or in demos.
//!
//! ## Example output
//! ```text
//! INF [relay] before-spec spec="org.example.StackSpec"
//! INF [relay] before-feature spec="StackSpec" feature="push"
//! INF [relay] before-iteration feature="push" iteration="push [0]" index=0
//! WRN [relay] error source=iteration name="push [0]" message="assertion failed"
//! INF [relay] feature-skipped spec="StackSpec" feature="pop"
//! ```

use crate::listener::model::{ErrorInfo, FeatureInfo, IterationInfo, SpecInfo};
use crate::listener::traits::{ListenerResult, RunListener};

/// Listener that logs each event at `info` (errors at `warn`)
#[derive(Debug, Clone)]
pub struct LogRunListener {
    label: String,
}

impl Default for LogRunListener {
    fn default() -> Self {
        Self::new("relay")
    }
}

impl LogRunListener {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    fn spec_line(&self, event: &str, spec: &SpecInfo) {
        log::info!(
            "[{}] {} spec={:?}",
            self.label,
            event,
            spec.qualified_name()
        );
    }

    fn feature_line(&self, event: &str, feature: &FeatureInfo) {
        log::info!(
            "[{}] {} spec={:?} feature={:?}",
            self.label,
            event,
            feature.spec_name,
            feature.name
        );
    }

    fn iteration_line(&self, event: &str, iteration: &IterationInfo) {
        log::info!(
            "[{}] {} feature={:?} iteration={:?} index={}",
            self.label,
            event,
            iteration.feature_name,
            iteration.name,
            iteration.index
        );
    }
}

impl RunListener for LogRunListener {
    fn before_spec(&mut self, spec: &SpecInfo) -> ListenerResult {
        self.spec_line("before-spec", spec);
        Ok(())
    }

    fn after_spec(&mut self, spec: &SpecInfo) -> ListenerResult {
        self.spec_line("after-spec", spec);
        Ok(())
    }

    fn spec_skipped(&mut self, spec: &SpecInfo) -> ListenerResult {
        self.spec_line("spec-skipped", spec);
        Ok(())
    }

    fn before_feature(&mut self, feature: &FeatureInfo) -> ListenerResult {
        self.feature_line("before-feature", feature);
        Ok(())
    }

    fn after_feature(&mut self, feature: &FeatureInfo) -> ListenerResult {
        self.feature_line("after-feature", feature);
        Ok(())
    }

    fn feature_skipped(&mut self, feature: &FeatureInfo) -> ListenerResult {
        self.feature_line("feature-skipped", feature);
        Ok(())
    }

    fn before_iteration(&mut self, iteration: &IterationInfo) -> ListenerResult {
        self.iteration_line("before-iteration", iteration);
        Ok(())
    }

    fn after_iteration(&mut self, iteration: &IterationInfo) -> ListenerResult {
        self.iteration_line("after-iteration", iteration);
        Ok(())
    }

    fn error(&mut self, error: &ErrorInfo) -> ListenerResult {
        log::warn!(
            "[{}] error source={} name={:?} message={:?}",
            self.label,
            error.source_kind,
            error.source_name,
            error.message
        );
        Ok(())
    }
}
