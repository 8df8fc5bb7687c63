//! Dispatcher Error Types

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Dispatcher already started: {thread_name}")]
    AlreadyStarted { thread_name: String },

    #[error("Dispatcher not started: {thread_name}")]
    NotStarted { thread_name: String },

    #[error("Dispatcher already stopped: {thread_name}")]
    AlreadyStopped { thread_name: String },

    #[error("Failed to spawn worker thread {thread_name}: {source}")]
    Spawn {
        thread_name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Worker thread {thread_name} panicked: {message}")]
    WorkerPanicked { thread_name: String, message: String },

    #[error("Internal synchronisation error: {message}")]
    Poisoned { message: String },
}

/// Result type for dispatcher operations
pub type DispatchResult<T> = Result<T, DispatchError>;
