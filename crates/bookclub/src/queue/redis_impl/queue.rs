//! Redis queue implementation.
//!
//! Message bodies are wrapped in a JSON envelope carrying the message id
//! and insertion time, so a receiver sees the same id the sender got back.

use std::time::Duration;

use async_trait::async_trait;
use redis::AsyncCommands;
use uuid::Uuid;

use bookclub_core::queue::{MessageId, MessageQueue, QueueError, QueueMessage, Result};

use super::error::map_redis_error;

/// Prefix shared by every key this backend writes.
const KEY_PREFIX: &str = "bookclub";

/// Set holding the names of all created queues.
fn registry_key() -> String {
    format!("{KEY_PREFIX}:queues")
}

/// List holding the pending messages of one queue.
fn queue_key(queue: &str) -> String {
    format!("{KEY_PREFIX}:queue:{queue}")
}

fn to_envelope(message: &QueueMessage) -> Result<String> {
    serde_json::to_string(message).map_err(|e| QueueError::Encoding(e.to_string()))
}

fn from_envelope(raw: &str) -> Result<QueueMessage> {
    serde_json::from_str(raw).map_err(|e| QueueError::Decoding(e.to_string()))
}

/// Redis queue backend using connection managers for reconnects.
///
/// Blocking receives run on their own connection so a waiting queue trigger
/// never stalls producers sharing the process.
pub struct RedisQueue {
    conn: redis::aio::ConnectionManager,
    blocking_conn: redis::aio::ConnectionManager,
}

impl RedisQueue {
    /// Connects to Redis.
    ///
    /// # Arguments
    ///
    /// * `url` - Redis connection URL (e.g., "redis://localhost:6379")
    ///
    /// # Errors
    ///
    /// Returns `QueueError::ConnectionFailed` if the connection cannot be established.
    pub async fn new(url: &str) -> Result<Self> {
        let client = redis::Client::open(url).map_err(map_redis_error)?;
        let conn = redis::aio::ConnectionManager::new(client.clone())
            .await
            .map_err(map_redis_error)?;
        let blocking_conn = redis::aio::ConnectionManager::new(client)
            .await
            .map_err(map_redis_error)?;
        Ok(Self {
            conn,
            blocking_conn,
        })
    }
}

#[async_trait]
impl MessageQueue for RedisQueue {
    async fn create_queue_if_not_exists(&self, queue: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let added: i64 = conn
            .sadd(registry_key(), queue)
            .await
            .map_err(map_redis_error)?;
        if added > 0 {
            tracing::info!(queue, "Registered Redis queue");
        }
        Ok(())
    }

    async fn send_message(&self, queue: &str, body: &str) -> Result<MessageId> {
        let mut conn = self.conn.clone();
        let message = QueueMessage::new(MessageId::new(Uuid::new_v4().to_string()), body);
        let envelope = to_envelope(&message)?;

        conn.lpush::<_, _, ()>(queue_key(queue), envelope)
            .await
            .map_err(map_redis_error)?;

        Ok(message.id)
    }

    async fn receive_message(&self, queue: &str, wait: Duration) -> Result<Option<QueueMessage>> {
        let mut conn = self.blocking_conn.clone();
        let key = queue_key(queue);

        let popped: Option<String> = if wait.is_zero() {
            conn.rpop(&key, None).await.map_err(map_redis_error)?
        } else {
            let reply: Option<(String, String)> = conn
                .brpop(&key, wait.as_secs_f64())
                .await
                .map_err(map_redis_error)?;
            reply.map(|(_, value)| value)
        };

        popped.as_deref().map(from_envelope).transpose()
    }

    async fn approximate_length(&self, queue: &str) -> Result<usize> {
        let mut conn = self.conn.clone();
        let len: usize = conn.llen(queue_key(queue)).await.map_err(map_redis_error)?;
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_key_format() {
        assert_eq!(queue_key("bookclubsignups"), "bookclub:queue:bookclubsignups");
    }

    #[test]
    fn test_registry_key_format() {
        assert_eq!(registry_key(), "bookclub:queues");
    }

    #[test]
    fn test_envelope_keeps_id_and_body() {
        let message = QueueMessage::new(MessageId::new("abc"), "eyJuYW1lIjoiQSJ9");

        let raw = to_envelope(&message).unwrap();
        let restored = from_envelope(&raw).unwrap();

        assert_eq!(restored, message);
    }

    #[test]
    fn test_from_envelope_rejects_bare_body() {
        let result = from_envelope("eyJuYW1lIjoiQSJ9");

        assert!(matches!(result, Err(QueueError::Decoding(_))));
    }
}
