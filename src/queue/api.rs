//! Public API for the event queue
//!
//! External modules should import from here rather than directly from internal modules.

pub use crate::queue::error::{QueueError, QueueResult};
pub use crate::queue::internal::{EventQueue, QueueReader};
