//! Public API for run listeners
//!
//! The listener contract, the lifecycle event types and their payloads.
//! External modules should import from here rather than directly from internal modules.

// Core event types and enums
pub use crate::listener::event::{EventKind, RunEvent};

// Payloads
pub use crate::listener::model::{ErrorInfo, ErrorSource, FeatureInfo, IterationInfo, SpecInfo};

// Traits and built-in listeners
pub use crate::listener::log::LogRunListener;
pub use crate::listener::traits::{ListenerError, ListenerResult, RunListener};
