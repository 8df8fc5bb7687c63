//! Worker loop draining the dispatch queue into the delegate listener

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use crate::dispatcher::stats::DispatchStatistics;
use crate::listener::api::{EventKind, RunEvent, RunListener};
use crate::queue::api::QueueReader;

/// Item carried by the dispatch queue
///
/// `Stop` is the shutdown sentinel. It has no delivery path: only the
/// payload of `Event` can ever reach a listener.
#[derive(Debug)]
pub(crate) enum Dispatch {
    Event(RunEvent),
    Stop,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum WorkerState {
    /// Constructed, worker not yet started
    Idle = 0,
    Running = 1,
    /// Sentinel taken, loop exiting
    Stopping = 2,
    /// Listener failure caught, loop exiting
    Failed = 3,
    Terminated = 4,
}

impl WorkerState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => WorkerState::Idle,
            1 => WorkerState::Running,
            2 => WorkerState::Stopping,
            3 => WorkerState::Failed,
            _ => WorkerState::Terminated,
        }
    }
}

/// Why the worker loop ended
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WorkerExit {
    /// The shutdown sentinel was reached
    Sentinel,
    /// The listener failed; everything queued behind it was abandoned
    ListenerFailed { kind: EventKind, message: String },
    /// The dispatcher was dropped without `stop()` and the queue ran dry
    Disconnected,
}

/// State visible to both producers and the worker
#[derive(Debug)]
pub(crate) struct Shared {
    stopped: AtomicBool,
    state: AtomicU8,
    pub(crate) statistics: DispatchStatistics,
}

impl Shared {
    pub(crate) fn new() -> Self {
        Self {
            stopped: AtomicBool::new(false),
            state: AtomicU8::new(WorkerState::Idle as u8),
            statistics: DispatchStatistics::new(),
        }
    }

    pub(crate) fn is_stopped(&self) -> bool {
        // Pairs with the Release store in latch_stopped
        self.stopped.load(Ordering::Acquire)
    }

    /// One-way: nothing ever clears the latch
    fn latch_stopped(&self) {
        self.stopped.store(true, Ordering::Release);
    }

    pub(crate) fn state(&self) -> WorkerState {
        WorkerState::from_u8(self.state.load(Ordering::Acquire))
    }

    pub(crate) fn set_state(&self, state: WorkerState) {
        self.state.store(state as u8, Ordering::Release);
    }
}

/// Everything the worker thread owns
pub(crate) struct Worker {
    pub(crate) thread_name: String,
    pub(crate) reader: QueueReader<Dispatch>,
    pub(crate) delegate: Box<dyn RunListener + Send>,
    pub(crate) shared: std::sync::Arc<Shared>,
}

impl Worker {
    pub(crate) fn run(mut self) -> WorkerExit {
        self.shared.set_state(WorkerState::Running);
        log::debug!("{}: worker running", self.thread_name);

        let exit = loop {
            match self.reader.take_next() {
                Some(Dispatch::Stop) => {
                    self.shared.set_state(WorkerState::Stopping);
                    log::debug!("{}: stop requested", self.thread_name);
                    break WorkerExit::Sentinel;
                }
                Some(Dispatch::Event(event)) => {
                    let kind = event.kind();
                    match self.deliver(event) {
                        Ok(()) => {
                            self.shared.statistics.record_delivered();
                            log::trace!("{}: delivered {}", self.thread_name, kind);
                        }
                        Err(message) => break self.fail(kind, message),
                    }
                }
                None => {
                    log::debug!("{}: all producers gone", self.thread_name);
                    break WorkerExit::Disconnected;
                }
            }
        };

        self.abandon_remaining();
        self.shared.set_state(WorkerState::Terminated);
        log::debug!("{}: worker terminated ({:?})", self.thread_name, exit);
        exit
    }

    /// Run one event against the delegate, turning an `Err` or a panic
    /// into a failure message
    fn deliver(&mut self, event: RunEvent) -> Result<(), String> {
        let delegate: &mut dyn RunListener = self.delegate.as_mut();
        match panic::catch_unwind(AssertUnwindSafe(|| event.deliver(delegate))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(error)) => Err(error.to_string()),
            Err(payload) => Err(format!("listener panicked: {}", panic_message(&*payload))),
        }
    }

    fn fail(&mut self, kind: EventKind, message: String) -> WorkerExit {
        self.shared.latch_stopped();
        self.shared.set_state(WorkerState::Failed);
        self.shared.statistics.record_failure();
        log::error!(
            "{}: listener failed handling {}: {}; further events are discarded",
            self.thread_name,
            kind,
            message
        );
        WorkerExit::ListenerFailed { kind, message }
    }

    /// Close the queue so later appends are refused, then discard what is
    /// still waiting in it
    fn abandon_remaining(&mut self) {
        self.reader.close();
        let mut abandoned = 0;
        while let Some(item) = self.reader.try_take_next() {
            if let Dispatch::Event(event) = item {
                log::trace!("{}: abandoned {}", self.thread_name, event.kind());
                abandoned += 1;
            }
        }
        if abandoned > 0 {
            self.shared.statistics.record_abandoned(abandoned);
            log::debug!(
                "{}: {} queued event(s) abandoned",
                self.thread_name,
                abandoned
            );
        }
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
