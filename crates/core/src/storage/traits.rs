use async_trait::async_trait;

use crate::signup::SignupRecord;

use super::Result;

/// Repository for stored signups.
///
/// Records are write-once: there is no update or delete.
#[async_trait]
pub trait SignupRepository: Send + Sync {
    /// Inserts a new record.
    ///
    /// Fails with `RepositoryError::AlreadyExists` if a record with the same
    /// partition and row key is already stored. Never overwrites.
    async fn insert_signup(&self, record: &SignupRecord) -> Result<()>;

    /// Gets a record by its partition and row key.
    async fn get_signup(&self, partition_key: &str, row_key: &str)
        -> Result<Option<SignupRecord>>;

    /// Lists all records in a genre partition, ordered by row key.
    async fn list_signups_by_genre(&self, genre: &str) -> Result<Vec<SignupRecord>>;
}
