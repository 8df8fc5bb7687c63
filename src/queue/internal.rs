//! Internal EventQueue implementation
//!
//! An unbounded FIFO backed by a tokio mpsc channel:
//! - Any number of threads may append concurrently
//! - Exactly one reader, handed out once, takes items in append order
//! - The reader blocks its thread while the queue is empty

use crate::queue::error::{QueueError, QueueResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

/// Unbounded, thread-safe FIFO with a single consumer
///
/// `append` never waits for the consumer. The consumer end is a
/// [`QueueReader`] obtained once through [`EventQueue::take_reader`].
/// Dropping the queue closes it: the reader drains what is left and then
/// sees `None`.
#[derive(Debug)]
pub struct EventQueue<T> {
    queue_id: String,
    sender: UnboundedSender<T>,
    reader: Mutex<Option<UnboundedReceiver<T>>>,
    pending: Arc<AtomicUsize>,
}

impl<T> EventQueue<T> {
    /// Create an empty queue with the given identifier
    pub fn new(queue_id: impl Into<String>) -> Self {
        let (sender, receiver) = unbounded_channel();
        Self {
            queue_id: queue_id.into(),
            sender,
            reader: Mutex::new(Some(receiver)),
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn queue_id(&self) -> &str {
        &self.queue_id
    }

    /// Number of items appended but not yet taken
    pub fn len(&self) -> usize {
        self.pending.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append an item at the tail
    ///
    /// Fails only when the reader has been dropped, in which case the item
    /// is handed back to nobody and discarded.
    pub fn append(&self, item: T) -> QueueResult<()> {
        // Count before sending so the reader can never decrement first
        self.pending.fetch_add(1, Ordering::AcqRel);
        self.sender.send(item).map_err(|_| {
            decrement(&self.pending);
            QueueError::Closed {
                queue_id: self.queue_id.clone(),
            }
        })
    }

    /// Hand out the single consumer end of this queue
    pub fn take_reader(&self) -> QueueResult<QueueReader<T>> {
        let mut slot = self.reader.lock().unwrap_or_else(PoisonError::into_inner);
        let receiver = slot.take().ok_or_else(|| QueueError::ReaderTaken {
            queue_id: self.queue_id.clone(),
        })?;

        Ok(QueueReader {
            receiver,
            pending: Arc::clone(&self.pending),
        })
    }
}

/// Consumer end of an [`EventQueue`]
///
/// `take_next` blocks the current thread and must not be called from
/// within an async runtime.
#[derive(Debug)]
pub struct QueueReader<T> {
    receiver: UnboundedReceiver<T>,
    pending: Arc<AtomicUsize>,
}

impl<T> QueueReader<T> {
    /// Remove and return the head, waiting until one is available
    ///
    /// Returns `None` once the queue has been dropped and fully drained.
    pub fn take_next(&mut self) -> Option<T> {
        let item = self.receiver.blocking_recv()?;
        decrement(&self.pending);
        Some(item)
    }

    /// Remove and return the head if one is immediately available
    pub fn try_take_next(&mut self) -> Option<T> {
        let item = self.receiver.try_recv().ok()?;
        decrement(&self.pending);
        Some(item)
    }

    /// Refuse further appends; items already queued can still be taken
    pub fn close(&mut self) {
        self.receiver.close();
    }
}

fn decrement(pending: &AtomicUsize) {
    pending
        .fetch_update(Ordering::AcqRel, Ordering::Acquire, |current| {
            Some(current.saturating_sub(1))
        })
        .ok();
}
