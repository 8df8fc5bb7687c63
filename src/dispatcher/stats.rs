//! Delivery statistics for a dispatcher

use std::sync::atomic::{AtomicUsize, Ordering};

/// Counters shared between producers and the worker
///
/// All counters use relaxed ordering; read them after `stop()` returns
/// for exact values.
#[derive(Debug, Default)]
pub struct DispatchStatistics {
    enqueued: AtomicUsize,
    delivered: AtomicUsize,
    dropped: AtomicUsize,
    abandoned: AtomicUsize,
    failures: AtomicUsize,
}

impl DispatchStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events accepted into the queue
    pub fn enqueued(&self) -> usize {
        self.enqueued.load(Ordering::Relaxed)
    }

    /// Events the listener handled without failing
    pub fn delivered(&self) -> usize {
        self.delivered.load(Ordering::Relaxed)
    }

    /// Events refused because the dispatcher was stopped or its worker gone
    pub fn dropped(&self) -> usize {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Events left in the queue when the worker exited
    pub fn abandoned(&self) -> usize {
        self.abandoned.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }

    pub(crate) fn record_enqueued(&self) {
        self.enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_delivered(&self) {
        self.delivered.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_dropped(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_abandoned(&self, count: usize) {
        self.abandoned.fetch_add(count, Ordering::Relaxed);
    }

    pub(crate) fn record_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
    }
}
