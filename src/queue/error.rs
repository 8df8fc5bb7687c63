//! Queue Error Types

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("Queue is closed: {queue_id} has no reader")]
    Closed { queue_id: String },

    #[error("Reader already taken for queue: {queue_id}")]
    ReaderTaken { queue_id: String },
}

/// Result type for queue operations
pub type QueueResult<T> = Result<T, QueueError>;
