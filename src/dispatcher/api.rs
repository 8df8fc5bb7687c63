//! Public API for the dispatcher
//!
//! External modules should import from here rather than directly from internal modules.

pub use crate::dispatcher::error::{DispatchError, DispatchResult};
pub use crate::dispatcher::manager::AsyncRunListener;
pub use crate::dispatcher::stats::DispatchStatistics;
pub use crate::dispatcher::worker::{WorkerExit, WorkerState};
