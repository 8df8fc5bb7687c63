//! Lifecycle event types

use std::sync::Arc;

use strum_macros::{Display, EnumIter};

use crate::listener::model::{ErrorInfo, FeatureInfo, IterationInfo, SpecInfo};
use crate::listener::traits::{ListenerResult, RunListener};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum EventKind {
    BeforeSpec,
    AfterSpec,
    SpecSkipped,
    BeforeFeature,
    AfterFeature,
    FeatureSkipped,
    BeforeIteration,
    AfterIteration,
    Error,
}

/// A lifecycle notification together with its payload
#[derive(Clone, Debug, PartialEq)]
pub enum RunEvent {
    BeforeSpec(Arc<SpecInfo>),
    AfterSpec(Arc<SpecInfo>),
    SpecSkipped(Arc<SpecInfo>),
    BeforeFeature(Arc<FeatureInfo>),
    AfterFeature(Arc<FeatureInfo>),
    FeatureSkipped(Arc<FeatureInfo>),
    BeforeIteration(Arc<IterationInfo>),
    AfterIteration(Arc<IterationInfo>),
    Error(Arc<ErrorInfo>),
}

impl RunEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            RunEvent::BeforeSpec(_) => EventKind::BeforeSpec,
            RunEvent::AfterSpec(_) => EventKind::AfterSpec,
            RunEvent::SpecSkipped(_) => EventKind::SpecSkipped,
            RunEvent::BeforeFeature(_) => EventKind::BeforeFeature,
            RunEvent::AfterFeature(_) => EventKind::AfterFeature,
            RunEvent::FeatureSkipped(_) => EventKind::FeatureSkipped,
            RunEvent::BeforeIteration(_) => EventKind::BeforeIteration,
            RunEvent::AfterIteration(_) => EventKind::AfterIteration,
            RunEvent::Error(_) => EventKind::Error,
        }
    }

    /// Invoke the listener callback matching this event, consuming it
    pub fn deliver(self, listener: &mut dyn RunListener) -> ListenerResult {
        match self {
            RunEvent::BeforeSpec(spec) => listener.before_spec(&spec),
            RunEvent::AfterSpec(spec) => listener.after_spec(&spec),
            RunEvent::SpecSkipped(spec) => listener.spec_skipped(&spec),
            RunEvent::BeforeFeature(feature) => listener.before_feature(&feature),
            RunEvent::AfterFeature(feature) => listener.after_feature(&feature),
            RunEvent::FeatureSkipped(feature) => listener.feature_skipped(&feature),
            RunEvent::BeforeIteration(iteration) => listener.before_iteration(&iteration),
            RunEvent::AfterIteration(iteration) => listener.after_iteration(&iteration),
            RunEvent::Error(error) => listener.error(&error),
        }
    }
}
