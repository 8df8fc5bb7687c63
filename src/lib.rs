//! Asynchronous relay for test-lifecycle notifications
//!
//! Producers call lifecycle methods on an [`AsyncRunListener`](dispatcher::api::AsyncRunListener)
//! and return immediately; a single worker thread replays the events, in
//! order, against a delegate [`RunListener`](listener::api::RunListener).

pub mod config;
pub mod core;
pub mod dispatcher;
pub mod listener;
pub mod queue;
