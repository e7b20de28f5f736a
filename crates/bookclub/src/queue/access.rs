//! Queue adapter used by the HTTP API.

use std::sync::Arc;

use serde::Serialize;

use bookclub_core::queue::{encode_message, MessageId, MessageQueue, Result};

/// Enqueues payloads on one named queue.
///
/// Every call makes sure the queue exists, encodes the payload for
/// transport and submits it. Errors are returned as-is; nothing is retried.
#[derive(Clone)]
pub struct QueueAccess {
    queue: Arc<dyn MessageQueue>,
    queue_name: String,
}

impl QueueAccess {
    pub fn new(queue: Arc<dyn MessageQueue>, queue_name: impl Into<String>) -> Self {
        Self {
            queue,
            queue_name: queue_name.into(),
        }
    }

    /// Name of the queue this adapter writes to.
    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    /// Serializes `message`, encodes it and sends it, returning the message id.
    pub async fn add<T: Serialize + Sync + ?Sized>(&self, message: &T) -> Result<MessageId> {
        self.queue
            .create_queue_if_not_exists(&self.queue_name)
            .await?;

        let body = encode_message(message)?;
        let id = self.queue.send_message(&self.queue_name, &body).await?;

        tracing::debug!(queue = %self.queue_name, message_id = %id, "Enqueued message");
        Ok(id)
    }
}

#[cfg(all(test, feature = "memory"))]
mod tests {
    use std::time::Duration;

    use bookclub_core::queue::decode_message;
    use bookclub_core::signup::SignupRequest;

    use super::*;
    use crate::queue::MemoryQueue;

    #[tokio::test]
    async fn test_add_creates_queue_on_first_use() {
        let backend = Arc::new(MemoryQueue::new());
        let access = QueueAccess::new(backend.clone(), "bookclubsignups");

        access
            .add(&SignupRequest::new("A", "a@x.com", "SciFi"))
            .await
            .unwrap();

        assert_eq!(
            backend.approximate_length("bookclubsignups").await.unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn test_add_sends_encoded_payload_with_returned_id() {
        let backend = Arc::new(MemoryQueue::new());
        let access = QueueAccess::new(backend.clone(), "bookclubsignups");
        let request = SignupRequest::new("A", "a@x.com", "SciFi");

        let id = access.add(&request).await.unwrap();

        let message = backend
            .receive_message("bookclubsignups", Duration::ZERO)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(message.id, id);
        let decoded: SignupRequest = decode_message(&message.body).unwrap();
        assert_eq!(decoded, request);
    }

    #[tokio::test]
    async fn test_add_accepts_arbitrary_payloads() {
        let backend = Arc::new(MemoryQueue::new());
        let access = QueueAccess::new(backend, "misc");

        let result = access.add(&serde_json::json!({"anything": [1, 2, 3]})).await;

        assert!(result.is_ok());
    }
}
