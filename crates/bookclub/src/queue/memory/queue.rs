//! In-memory queue implementation.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};
use uuid::Uuid;

use bookclub_core::queue::{MessageId, MessageQueue, QueueError, QueueMessage, Result};

/// A single named queue: pending messages plus a wake-up for waiting receivers.
#[derive(Debug, Default)]
struct NamedQueue {
    messages: Mutex<VecDeque<QueueMessage>>,
    notify: Notify,
}

/// In-memory queue backend.
///
/// Each queue name maps to its own FIFO. Messages live only as long as the
/// process, so the API and the queue trigger must share one instance.
#[derive(Debug, Clone, Default)]
pub struct MemoryQueue {
    queues: Arc<Mutex<HashMap<String, Arc<NamedQueue>>>>,
}

impl MemoryQueue {
    /// Creates a backend with no queues.
    pub fn new() -> Self {
        Self::default()
    }

    async fn get_queue(&self, name: &str) -> Result<Arc<NamedQueue>> {
        let queues = self.queues.lock().await;
        queues
            .get(name)
            .cloned()
            .ok_or_else(|| QueueError::OperationFailed(format!("Queue does not exist: {name}")))
    }
}

#[async_trait]
impl MessageQueue for MemoryQueue {
    async fn create_queue_if_not_exists(&self, queue: &str) -> Result<()> {
        let mut queues = self.queues.lock().await;
        if !queues.contains_key(queue) {
            tracing::debug!(queue, "Creating in-memory queue");
            queues.insert(queue.to_string(), Arc::new(NamedQueue::default()));
        }
        Ok(())
    }

    async fn send_message(&self, queue: &str, body: &str) -> Result<MessageId> {
        let named = self.get_queue(queue).await?;
        let id = MessageId::new(Uuid::new_v4().to_string());

        named
            .messages
            .lock()
            .await
            .push_back(QueueMessage::new(id.clone(), body));
        named.notify.notify_one();

        Ok(id)
    }

    async fn receive_message(&self, queue: &str, wait: Duration) -> Result<Option<QueueMessage>> {
        let named = self.get_queue(queue).await?;
        let deadline = tokio::time::Instant::now() + wait;

        loop {
            // Register interest before checking so a send between the check
            // and the wait is not missed.
            let notified = named.notify.notified();

            if let Some(message) = named.messages.lock().await.pop_front() {
                return Ok(Some(message));
            }

            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                return Ok(None);
            }
        }
    }

    async fn approximate_length(&self, queue: &str) -> Result<usize> {
        let named = self.queues.lock().await.get(queue).cloned();
        match named {
            Some(named) => Ok(named.messages.lock().await.len()),
            None => Ok(0),
        }
    }
}
