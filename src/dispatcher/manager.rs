//! AsyncRunListener implementation

use std::mem;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::{self, JoinHandle};

use crate::config::DispatcherConfig;
use crate::dispatcher::error::{DispatchError, DispatchResult};
use crate::dispatcher::stats::DispatchStatistics;
use crate::dispatcher::worker::{panic_message, Dispatch, Shared, Worker, WorkerExit, WorkerState};
use crate::listener::api::{
    ErrorInfo, FeatureInfo, IterationInfo, ListenerResult, RunEvent, RunListener, SpecInfo,
};
use crate::queue::api::EventQueue;

enum Lifecycle {
    Idle(Worker),
    Running(JoinHandle<WorkerExit>),
    Finished,
}

/// Relays lifecycle events to a delegate listener on a dedicated thread
///
/// Producer methods only append to an internal queue and return; the
/// delegate is invoked later, in order, by the worker thread spawned in
/// [`start`](Self::start). If the delegate fails (returns `Err` or
/// panics) the dispatcher latches into a stopped state and silently
/// discards every later event.
///
/// The dispatcher is `Send + Sync` and can be shared between producer
/// threads behind an `Arc`.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use runrelay::dispatcher::api::{AsyncRunListener, WorkerExit};
/// use runrelay::listener::api::{LogRunListener, SpecInfo};
///
/// let relay = AsyncRunListener::with_delegate(LogRunListener::default());
/// relay.start().unwrap();
///
/// let spec = Arc::new(SpecInfo::new("StackSpec"));
/// relay.before_spec(spec.clone());
/// relay.after_spec(spec);
///
/// assert_eq!(relay.stop().unwrap(), WorkerExit::Sentinel);
/// assert_eq!(relay.statistics().delivered(), 2);
/// ```
pub struct AsyncRunListener {
    thread_name: String,
    stack_size: Option<usize>,
    queue: EventQueue<Dispatch>,
    shared: Arc<Shared>,
    lifecycle: Mutex<Lifecycle>,
}

impl AsyncRunListener {
    /// Create a dispatcher around `delegate`; the worker is prepared but
    /// not started
    pub fn new(config: DispatcherConfig, delegate: impl RunListener + Send + 'static) -> Self {
        let queue = EventQueue::new(config.thread_name.clone());
        let shared = Arc::new(Shared::new());

        // A fresh queue always has its reader
        let lifecycle = match queue.take_reader() {
            Ok(reader) => Lifecycle::Idle(Worker {
                thread_name: config.thread_name.clone(),
                reader,
                delegate: Box::new(delegate),
                shared: Arc::clone(&shared),
            }),
            Err(_) => Lifecycle::Finished,
        };

        Self {
            thread_name: config.thread_name,
            stack_size: config.stack_size,
            queue,
            shared,
            lifecycle: Mutex::new(lifecycle),
        }
    }

    pub fn with_delegate(delegate: impl RunListener + Send + 'static) -> Self {
        Self::new(DispatcherConfig::default(), delegate)
    }

    pub fn thread_name(&self) -> &str {
        &self.thread_name
    }

    /// True once the delegate has failed; never reset
    pub fn is_stopped(&self) -> bool {
        self.shared.is_stopped()
    }

    pub fn state(&self) -> WorkerState {
        self.shared.state()
    }

    pub fn statistics(&self) -> &DispatchStatistics {
        &self.shared.statistics
    }

    /// Number of events waiting for the worker
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Spawn the worker thread
    ///
    /// Events enqueued before this call are delivered once it runs.
    pub fn start(&self) -> DispatchResult<()> {
        let mut lifecycle = self.lock_lifecycle()?;
        let worker = match mem::replace(&mut *lifecycle, Lifecycle::Finished) {
            Lifecycle::Idle(worker) => worker,
            other => {
                *lifecycle = other;
                return Err(DispatchError::AlreadyStarted {
                    thread_name: self.thread_name.clone(),
                });
            }
        };

        let mut builder = thread::Builder::new().name(self.thread_name.clone());
        if let Some(stack_size) = self.stack_size {
            builder = builder.stack_size(stack_size);
        }

        match builder.spawn(move || worker.run()) {
            Ok(handle) => {
                *lifecycle = Lifecycle::Running(handle);
                log::debug!("{}: worker started", self.thread_name);
                Ok(())
            }
            Err(source) => {
                // The worker and its reader went down with the closure, so
                // the queue now refuses appends
                self.shared.set_state(WorkerState::Terminated);
                log::error!("{}: failed to spawn worker: {}", self.thread_name, source);
                Err(DispatchError::Spawn {
                    thread_name: self.thread_name.clone(),
                    source,
                })
            }
        }
    }

    /// Enqueue the shutdown sentinel and wait for the worker to exit
    ///
    /// Everything this caller enqueued before `stop` is delivered first,
    /// unless the delegate fails on the way. Blocks without a timeout.
    pub fn stop(&self) -> DispatchResult<WorkerExit> {
        let handle = {
            let mut lifecycle = self.lock_lifecycle()?;
            match mem::replace(&mut *lifecycle, Lifecycle::Finished) {
                Lifecycle::Running(handle) => handle,
                Lifecycle::Idle(worker) => {
                    *lifecycle = Lifecycle::Idle(worker);
                    return Err(DispatchError::NotStarted {
                        thread_name: self.thread_name.clone(),
                    });
                }
                Lifecycle::Finished => {
                    return Err(DispatchError::AlreadyStopped {
                        thread_name: self.thread_name.clone(),
                    });
                }
            }
        };

        // Bypasses the stopped latch; a closed queue means the worker has
        // already exited and the join below returns at once
        if let Err(e) = self.queue.append(Dispatch::Stop) {
            log::trace!("{}: stop sentinel not queued: {}", self.thread_name, e);
        }

        log::debug!("{}: waiting for worker", self.thread_name);
        handle
            .join()
            .map_err(|payload| DispatchError::WorkerPanicked {
                thread_name: self.thread_name.clone(),
                message: panic_message(&*payload),
            })
    }

    pub fn before_spec(&self, spec: Arc<SpecInfo>) {
        self.enqueue(RunEvent::BeforeSpec(spec));
    }

    pub fn after_spec(&self, spec: Arc<SpecInfo>) {
        self.enqueue(RunEvent::AfterSpec(spec));
    }

    pub fn spec_skipped(&self, spec: Arc<SpecInfo>) {
        self.enqueue(RunEvent::SpecSkipped(spec));
    }

    pub fn before_feature(&self, feature: Arc<FeatureInfo>) {
        self.enqueue(RunEvent::BeforeFeature(feature));
    }

    pub fn after_feature(&self, feature: Arc<FeatureInfo>) {
        self.enqueue(RunEvent::AfterFeature(feature));
    }

    pub fn feature_skipped(&self, feature: Arc<FeatureInfo>) {
        self.enqueue(RunEvent::FeatureSkipped(feature));
    }

    pub fn before_iteration(&self, iteration: Arc<IterationInfo>) {
        self.enqueue(RunEvent::BeforeIteration(iteration));
    }

    pub fn after_iteration(&self, iteration: Arc<IterationInfo>) {
        self.enqueue(RunEvent::AfterIteration(iteration));
    }

    pub fn error(&self, error: Arc<ErrorInfo>) {
        self.enqueue(RunEvent::Error(error));
    }

    /// Enqueue an already built event
    ///
    /// The single guarded append path behind every producer method.
    pub fn enqueue(&self, event: RunEvent) {
        let kind = event.kind();
        if self.shared.is_stopped() {
            self.shared.statistics.record_dropped();
            log::trace!("{}: dropped {} (stopped)", self.thread_name, kind);
            return;
        }

        match self.queue.append(Dispatch::Event(event)) {
            Ok(()) => {
                self.shared.statistics.record_enqueued();
                log::trace!("{}: enqueued {}", self.thread_name, kind);
            }
            Err(e) => {
                self.shared.statistics.record_dropped();
                log::trace!("{}: dropped {}: {}", self.thread_name, kind, e);
            }
        }
    }

    fn lock_lifecycle(&self) -> DispatchResult<MutexGuard<'_, Lifecycle>> {
        self.lifecycle
            .lock()
            .map_err(|poison_err| DispatchError::Poisoned {
                message: format!(
                    "{} lifecycle lock poisoned by a panic while held: {:?}",
                    self.thread_name, poison_err
                ),
            })
    }
}

impl std::fmt::Debug for AsyncRunListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AsyncRunListener")
            .field("thread_name", &self.thread_name)
            .field("state", &self.state())
            .field("stopped", &self.is_stopped())
            .field("pending", &self.pending())
            .finish()
    }
}

impl Drop for AsyncRunListener {
    fn drop(&mut self) {
        let lifecycle = self
            .lifecycle
            .get_mut()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if matches!(lifecycle, Lifecycle::Running(_)) {
            log::debug!(
                "{}: dropped without stop(); worker detached",
                self.thread_name
            );
        }
    }
}

/// A dispatcher is itself a listener: every callback enqueues and
/// returns `Ok(())`
impl RunListener for AsyncRunListener {
    fn before_spec(&mut self, spec: &SpecInfo) -> ListenerResult {
        AsyncRunListener::before_spec(self, Arc::new(spec.clone()));
        Ok(())
    }

    fn after_spec(&mut self, spec: &SpecInfo) -> ListenerResult {
        AsyncRunListener::after_spec(self, Arc::new(spec.clone()));
        Ok(())
    }

    fn spec_skipped(&mut self, spec: &SpecInfo) -> ListenerResult {
        AsyncRunListener::spec_skipped(self, Arc::new(spec.clone()));
        Ok(())
    }

    fn before_feature(&mut self, feature: &FeatureInfo) -> ListenerResult {
        AsyncRunListener::before_feature(self, Arc::new(feature.clone()));
        Ok(())
    }

    fn after_feature(&mut self, feature: &FeatureInfo) -> ListenerResult {
        AsyncRunListener::after_feature(self, Arc::new(feature.clone()));
        Ok(())
    }

    fn feature_skipped(&mut self, feature: &FeatureInfo) -> ListenerResult {
        AsyncRunListener::feature_skipped(self, Arc::new(feature.clone()));
        Ok(())
    }

    fn before_iteration(&mut self, iteration: &IterationInfo) -> ListenerResult {
        AsyncRunListener::before_iteration(self, Arc::new(iteration.clone()));
        Ok(())
    }

    fn after_iteration(&mut self, iteration: &IterationInfo) -> ListenerResult {
        AsyncRunListener::after_iteration(self, Arc::new(iteration.clone()));
        Ok(())
    }

    fn error(&mut self, error: &ErrorInfo) -> ListenerResult {
        AsyncRunListener::error(self, Arc::new(error.clone()));
        Ok(())
    }
}
