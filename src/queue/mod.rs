//! Event Queue Component
//!
//! The leaf of the relay: an unbounded, ordered channel between any number
//! of producer threads and exactly one consuming thread.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌──────────────┐     ┌──────────────┐
//! │  Producer A  │     │  Producer B  │     │  Producer C  │
//! └──────┬───────┘     └──────┬───────┘     └──────┬───────┘
//!        │ append             │ append             │ append
//!        ▼                    ▼                    ▼
//! ┌─────────────────────────────────────────────────────────┐
//! │                    EventQueue (FIFO)                    │
//! │        ┌───┬───┬───┬───┬───┬───┬───┬───┬───┐            │
//! │  head ◄│ 1 │ 2 │ 3 │ 4 │ 5 │ 6 │ 7 │ 8 │...│◄ tail      │
//! │        └───┴───┴───┴───┴───┴───┴───┴───┴───┘            │
//! └────────────────────────────┬────────────────────────────┘
//!                              │ take_next (blocking)
//!                       ┌──────┴──────┐
//!                       │ QueueReader │ (single consumer)
//!                       └─────────────┘
//! ```
//!
//! # Example Usage
//!
//! ```rust
//! use runrelay::queue::api::EventQueue;
//!
//! let queue = EventQueue::new("example");
//! queue.append("first").unwrap();
//! queue.append("second").unwrap();
//!
//! let mut reader = queue.take_reader().unwrap();
//! assert_eq!(reader.take_next(), Some("first"));
//! assert_eq!(reader.take_next(), Some("second"));
//! ```

pub(crate) mod error;
pub(crate) mod internal;

pub mod api;
