//! Asynchronous lifecycle event dispatcher
//!
//! [`AsyncRunListener`](api::AsyncRunListener) takes lifecycle events from
//! any number of producer threads and replays them, in order, against a
//! delegate [`RunListener`](crate::listener::api::RunListener) on a single
//! worker thread.
//!
//! ```text
//!  producers ──► enqueue ──► EventQueue ──► worker thread ──► delegate
//!                  │                             │
//!                  └── dropped once ◄── stopped ─┘ (delegate failed)
//! ```
//!
//! Worker states: `Idle → Running → {Stopping | Failed} → Terminated`.
//! A worker never restarts.

pub(crate) mod error;
pub(crate) mod manager;
pub(crate) mod stats;
pub(crate) mod worker;

pub mod api;

#[cfg(test)]
mod tests;
