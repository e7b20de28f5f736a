//! Application state shared by the HTTP handlers and the queue trigger.
//!
//! Holds the signup repository and queue backend as trait objects. Which
//! backends those are is decided at compile time by feature flags; see
//! [`crate::storage`] and [`crate::queue`].

use std::sync::Arc;

use tokio::sync::broadcast;

use bookclub_core::queue::MessageQueue;
use bookclub_core::storage::SignupRepository;

use crate::config::Config;
use crate::queue::QueueAccess;
use crate::relay::{QueueTrigger, SignupRelay};

/// Shared application state.
///
/// Cloned for each request handler; every backend sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Table the relay writes signups to.
    pub signup_repo: Arc<dyn SignupRepository>,
    /// Raw queue backend, for the trigger and health checks.
    pub queue: Arc<dyn MessageQueue>,
    /// Enqueues signups on the configured queue.
    pub queue_access: QueueAccess,
    /// Name of the compiled-in storage backend.
    pub storage_backend: &'static str,
    /// Name of the compiled-in queue backend.
    pub queue_backend: &'static str,
    /// Origin allowed to submit signups from a browser.
    pub cors_allowed_origin: String,
    /// Shutdown signal sender for background tasks.
    pub shutdown_tx: broadcast::Sender<()>,
}

impl AppState {
    /// Creates AppState with the backends selected by feature flags.
    pub async fn new(config: &Config) -> Result<Self, anyhow::Error> {
        let signup_repo = backends::signup_repository(config).await?;
        let queue = backends::message_queue(config).await?;

        Ok(Self::build(signup_repo, queue, config))
    }

    fn build(
        signup_repo: Arc<dyn SignupRepository>,
        queue: Arc<dyn MessageQueue>,
        config: &Config,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);

        Self {
            queue_access: QueueAccess::new(queue.clone(), config.queue_name.clone()),
            signup_repo,
            queue,
            storage_backend: backends::STORAGE_BACKEND,
            queue_backend: backends::QUEUE_BACKEND,
            cors_allowed_origin: config.cors_allowed_origin.clone(),
            shutdown_tx,
        }
    }

    /// Builds a queue trigger that relays from the configured queue into
    /// this state's repository.
    pub fn queue_trigger(&self, config: &Config) -> QueueTrigger {
        QueueTrigger::new(
            self.queue.clone(),
            config.queue_name.clone(),
            SignupRelay::new(self.signup_repo.clone()),
            config.queue_poll(),
        )
    }

    /// Subscribe to shutdown signal.
    pub fn subscribe_shutdown(&self) -> broadcast::Receiver<()> {
        self.shutdown_tx.subscribe()
    }

    /// Signal all background tasks to shut down.
    pub fn signal_shutdown(&self) {
        let _ = self.shutdown_tx.send(());
    }
}

#[cfg(all(feature = "inmemory", feature = "memory"))]
impl AppState {
    /// Creates AppState with in-memory storage and queue, without I/O.
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn in_memory(config: &Config) -> Self {
        Self::build(
            Arc::new(crate::storage::InMemoryRepository::new()),
            Arc::new(crate::queue::MemoryQueue::new()),
            config,
        )
    }
}

// ============================================================================
// Backend factories, one per feature
// ============================================================================

mod backends {
    use super::*;

    #[cfg(feature = "inmemory")]
    pub const STORAGE_BACKEND: &str = "inmemory";
    #[cfg(feature = "sqlite")]
    pub const STORAGE_BACKEND: &str = "sqlite";
    #[cfg(feature = "dynamodb")]
    pub const STORAGE_BACKEND: &str = "dynamodb";

    #[cfg(feature = "memory")]
    pub const QUEUE_BACKEND: &str = "memory";
    #[cfg(feature = "redis")]
    pub const QUEUE_BACKEND: &str = "redis";

    #[cfg(feature = "inmemory")]
    pub async fn signup_repository(
        _config: &Config,
    ) -> Result<Arc<dyn SignupRepository>, anyhow::Error> {
        Ok(Arc::new(crate::storage::InMemoryRepository::new()))
    }

    #[cfg(feature = "sqlite")]
    pub async fn signup_repository(
        config: &Config,
    ) -> Result<Arc<dyn SignupRepository>, anyhow::Error> {
        let repo =
            crate::storage::SqliteRepository::new(&config.sqlite_path, config.table_name.clone())
                .await?;
        Ok(Arc::new(repo))
    }

    #[cfg(feature = "dynamodb")]
    pub async fn signup_repository(
        config: &Config,
    ) -> Result<Arc<dyn SignupRepository>, anyhow::Error> {
        let repo = crate::storage::DynamoDbRepository::from_config(
            &config.aws_region,
            config.aws_endpoint_url.as_deref(),
            config.table_name.clone(),
        )
        .await;
        Ok(Arc::new(repo))
    }

    #[cfg(feature = "memory")]
    pub async fn message_queue(_config: &Config) -> Result<Arc<dyn MessageQueue>, anyhow::Error> {
        Ok(Arc::new(crate::queue::MemoryQueue::new()))
    }

    #[cfg(feature = "redis")]
    pub async fn message_queue(config: &Config) -> Result<Arc<dyn MessageQueue>, anyhow::Error> {
        let queue = crate::queue::RedisQueue::new(&config.redis_url).await?;
        Ok(Arc::new(queue))
    }
}

#[cfg(all(test, feature = "inmemory", feature = "memory"))]
mod tests {
    use super::*;
    use bookclub_core::signup::SignupRequest;

    fn config() -> Config {
        Config {
            queue_name: "test-signups".to_string(),
            ..Config::from_env()
        }
    }

    #[tokio::test]
    async fn test_new_reports_compiled_backends() {
        let state = AppState::new(&config()).await.unwrap();

        assert_eq!(state.storage_backend, "inmemory");
        assert_eq!(state.queue_backend, "memory");
        assert_eq!(state.queue_access.queue_name(), "test-signups");
    }

    #[tokio::test]
    async fn test_queue_trigger_shares_state_backends() {
        let config = config();
        let state = AppState::in_memory(&config);
        state
            .queue_access
            .add(&SignupRequest::new("A", "a@x.com", "SciFi"))
            .await
            .unwrap();

        let outcomes = state.queue_trigger(&config).drain().await.unwrap();

        assert_eq!(outcomes.len(), 1);
        let stored = state.signup_repo.list_signups_by_genre("SciFi").await.unwrap();
        assert_eq!(stored.len(), 1);
    }

    #[tokio::test]
    async fn test_shutdown_reaches_subscribers() {
        let state = AppState::in_memory(&config());
        let mut rx = state.subscribe_shutdown();

        state.signal_shutdown();

        assert!(rx.recv().await.is_ok());
    }
}
