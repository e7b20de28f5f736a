//! Queue trigger: feeds queued signups to the relay.
//!
//! Each received message is handed to its own task, so invocations run
//! concurrently and in no particular order. A failed invocation is logged
//! and its message is gone; nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::task::JoinSet;

use bookclub_core::queue::{MessageId, MessageQueue, QueueMessage, Result};
use bookclub_core::signup::SignupRecord;

use super::{RelayError, SignupRelay};

/// Shortest wait per poll. A zero wait would spin on an empty queue.
const MIN_POLL: Duration = Duration::from_millis(100);

/// Pause after the queue backend itself fails, before polling again.
const ERROR_BACKOFF: Duration = Duration::from_secs(1);

/// Result of one relay invocation.
#[derive(Debug)]
pub struct InvocationOutcome {
    pub message_id: MessageId,
    pub result: std::result::Result<SignupRecord, RelayError>,
}

/// Polls one named queue and runs the relay for every message on it.
#[derive(Clone)]
pub struct QueueTrigger {
    queue: Arc<dyn MessageQueue>,
    queue_name: String,
    relay: SignupRelay,
    poll: Duration,
}

impl QueueTrigger {
    pub fn new(
        queue: Arc<dyn MessageQueue>,
        queue_name: impl Into<String>,
        relay: SignupRelay,
        poll: Duration,
    ) -> Self {
        Self {
            queue,
            queue_name: queue_name.into(),
            relay,
            poll: poll.max(MIN_POLL),
        }
    }

    /// Runs until `shutdown` fires, then waits for in-flight invocations.
    ///
    /// Shutdown is checked between polls, never during one: a receive that
    /// has started always completes, so its message reaches the relay.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) -> Result<()> {
        self.queue
            .create_queue_if_not_exists(&self.queue_name)
            .await?;

        tracing::info!(queue = %self.queue_name, "Queue trigger started");
        let mut in_flight = JoinSet::new();

        loop {
            while in_flight.try_join_next().is_some() {}

            // Sent, closed or lagged all mean stop.
            if !matches!(shutdown.try_recv(), Err(TryRecvError::Empty)) {
                break;
            }

            match self.queue.receive_message(&self.queue_name, self.poll).await {
                Ok(Some(message)) => {
                    in_flight.spawn(invoke(self.relay.clone(), message));
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(queue = %self.queue_name, error = %err, "Queue poll failed");
                    tokio::select! {
                        _ = tokio::time::sleep(ERROR_BACKOFF) => {}
                        _ = shutdown.recv() => break,
                    }
                }
            }
        }

        tracing::info!(
            queue = %self.queue_name,
            in_flight = in_flight.len(),
            "Queue trigger shutting down"
        );
        while in_flight.join_next().await.is_some() {}
        Ok(())
    }

    /// Processes every message currently on the queue, one at a time.
    ///
    /// Returns one outcome per message, in queue order. Stops at the first
    /// empty poll, so messages sent while draining may or may not be seen.
    pub async fn drain(&self) -> Result<Vec<InvocationOutcome>> {
        self.queue
            .create_queue_if_not_exists(&self.queue_name)
            .await?;

        let mut outcomes = Vec::new();
        while let Some(message) = self
            .queue
            .receive_message(&self.queue_name, Duration::ZERO)
            .await?
        {
            outcomes.push(invoke(self.relay.clone(), message).await);
        }

        Ok(outcomes)
    }
}

async fn invoke(relay: SignupRelay, message: QueueMessage) -> InvocationOutcome {
    let result = relay.process_message(&message).await;

    match &result {
        Ok(record) => tracing::info!(
            message_id = %message.id,
            genre = %record.partition_key,
            row_key = %record.row_key,
            "Relayed signup"
        ),
        Err(err) => tracing::error!(
            message_id = %message.id,
            error = %err,
            "Relay invocation failed"
        ),
    }

    InvocationOutcome {
        message_id: message.id,
        result,
    }
}
