use std::time::Duration;

use async_trait::async_trait;

use super::{MessageId, QueueMessage, Result};

/// A named, durable message queue backend.
///
/// Bodies are opaque text; encoding is the caller's concern (see
/// [`encode_message`](super::encode_message)).
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Creates the named queue if it does not exist yet.
    async fn create_queue_if_not_exists(&self, queue: &str) -> Result<()>;

    /// Appends a message to the named queue and returns its id.
    async fn send_message(&self, queue: &str, body: &str) -> Result<MessageId>;

    /// Takes the oldest message off the named queue.
    ///
    /// Waits up to `wait` for a message to arrive. A received message is
    /// removed from the queue and will not be delivered again.
    async fn receive_message(&self, queue: &str, wait: Duration) -> Result<Option<QueueMessage>>;

    /// Returns the number of messages currently waiting in the named queue.
    ///
    /// A queue that does not exist yet has length zero.
    async fn approximate_length(&self, queue: &str) -> Result<usize>;
}
