//! Traits for lifecycle listeners

use crate::listener::model::{ErrorInfo, FeatureInfo, IterationInfo, SpecInfo};

/// Error raised by a listener while handling an event
pub type ListenerError = Box<dyn std::error::Error + Send + Sync>;

/// Result returned by every listener callback
pub type ListenerResult = Result<(), ListenerError>;

/// Receiver of test-lifecycle notifications
///
/// Every callback defaults to a no-op, so implementations only override
/// the events they care about. Callbacks take `&mut self`: when used as
/// the delegate of an [`AsyncRunListener`](crate::dispatcher::api::AsyncRunListener)
/// the listener is only ever touched by the worker thread and needs to be
/// `Send`, not `Sync`.
///
/// Returning `Err` (or panicking) from a callback inside a dispatcher
/// disables that dispatcher for the rest of its lifetime.
#[allow(unused_variables)]
pub trait RunListener {
    fn before_spec(&mut self, spec: &SpecInfo) -> ListenerResult {
        Ok(())
    }

    fn after_spec(&mut self, spec: &SpecInfo) -> ListenerResult {
        Ok(())
    }

    fn spec_skipped(&mut self, spec: &SpecInfo) -> ListenerResult {
        Ok(())
    }

    fn before_feature(&mut self, feature: &FeatureInfo) -> ListenerResult {
        Ok(())
    }

    fn after_feature(&mut self, feature: &FeatureInfo) -> ListenerResult {
        Ok(())
    }

    fn feature_skipped(&mut self, feature: &FeatureInfo) -> ListenerResult {
        Ok(())
    }

    fn before_iteration(&mut self, iteration: &IterationInfo) -> ListenerResult {
        Ok(())
    }

    fn after_iteration(&mut self, iteration: &IterationInfo) -> ListenerResult {
        Ok(())
    }

    fn error(&mut self, error: &ErrorInfo) -> ListenerResult {
        Ok(())
    }
}

impl<L: RunListener + ?Sized> RunListener for Box<L> {
    fn before_spec(&mut self, spec: &SpecInfo) -> ListenerResult {
        (**self).before_spec(spec)
    }

    fn after_spec(&mut self, spec: &SpecInfo) -> ListenerResult {
        (**self).after_spec(spec)
    }

    fn spec_skipped(&mut self, spec: &SpecInfo) -> ListenerResult {
        (**self).spec_skipped(spec)
    }

    fn before_feature(&mut self, feature: &FeatureInfo) -> ListenerResult {
        (**self).before_feature(feature)
    }

    fn after_feature(&mut self, feature: &FeatureInfo) -> ListenerResult {
        (**self).after_feature(feature)
    }

    fn feature_skipped(&mut self, feature: &FeatureInfo) -> ListenerResult {
        (**self).feature_skipped(feature)
    }

    fn before_iteration(&mut self, iteration: &IterationInfo) -> ListenerResult {
        (**self).before_iteration(iteration)
    }

    fn after_iteration(&mut self, iteration: &IterationInfo) -> ListenerResult {
        (**self).after_iteration(iteration)
    }

    fn error(&mut self, error: &ErrorInfo) -> ListenerResult {
        (**self).error(error)
    }
}
