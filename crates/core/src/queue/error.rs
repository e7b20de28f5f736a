use thiserror::Error;

/// Errors that can occur while talking to a message queue.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueueError {
    #[error("Queue connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Queue operation failed: {0}")]
    OperationFailed(String),
    #[error("Message encoding failed: {0}")]
    Encoding(String),
    #[error("Message decoding failed: {0}")]
    Decoding(String),
}

/// Result type for queue operations.
pub type Result<T> = std::result::Result<T, QueueError>;
