//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use bookclub_core::signup::SignupRecord;
use bookclub_core::storage::{RepositoryError, Result, SignupRepository};

type Key = (String, String);

/// In-memory storage backend for testing.
///
/// Records are keyed by `(partition_key, row_key)`.
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    signups: Arc<RwLock<HashMap<Key, SignupRecord>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SignupRepository for InMemoryRepository {
    async fn insert_signup(&self, record: &SignupRecord) -> Result<()> {
        let key = (record.partition_key.clone(), record.row_key.clone());
        let mut signups = self.signups.write().await;
        if signups.contains_key(&key) {
            return Err(RepositoryError::signup_exists(
                &record.partition_key,
                &record.row_key,
            ));
        }
        signups.insert(key, record.clone());
        Ok(())
    }

    async fn get_signup(
        &self,
        partition_key: &str,
        row_key: &str,
    ) -> Result<Option<SignupRecord>> {
        let signups = self.signups.read().await;
        Ok(signups
            .get(&(partition_key.to_string(), row_key.to_string()))
            .cloned())
    }

    async fn list_signups_by_genre(&self, genre: &str) -> Result<Vec<SignupRecord>> {
        let signups = self.signups.read().await;
        let mut records: Vec<SignupRecord> = signups
            .values()
            .filter(|r| r.partition_key == genre)
            .cloned()
            .collect();
        records.sort_by(|a, b| a.row_key.cmp(&b.row_key));
        Ok(records)
    }
}
