//! Signup relay: turns one queued signup into one stored record.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use bookclub_core::queue::{decode_message, QueueError, QueueMessage};
use bookclub_core::signup::{adapt_request, adapt_request_at, SignupRecord, SignupRequest};
use bookclub_core::storage::{RepositoryError, SignupRepository};

/// Why a relay invocation failed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("Could not decode signup message: {0}")]
    Decode(#[from] QueueError),
    #[error("Could not store signup: {0}")]
    Storage(#[from] RepositoryError),
}

/// Maps queued signups to stored records.
///
/// There is no validation and no duplicate detection: whatever was
/// submitted is stored, and a storage failure fails the invocation.
#[derive(Clone)]
pub struct SignupRelay {
    repo: Arc<dyn SignupRepository>,
}

impl SignupRelay {
    pub fn new(repo: Arc<dyn SignupRepository>) -> Self {
        Self { repo }
    }

    /// Decodes a queue message and stores the signup it carries.
    pub async fn process_message(
        &self,
        message: &QueueMessage,
    ) -> Result<SignupRecord, RelayError> {
        let request: SignupRequest = decode_message(&message.body)?;
        self.process_request(&request).await
    }

    /// Stores a signup, stamping it with the current clock reading.
    pub async fn process_request(
        &self,
        request: &SignupRequest,
    ) -> Result<SignupRecord, RelayError> {
        self.store(adapt_request(request)).await
    }

    /// Stores a signup as if it was processed at `at`.
    pub async fn process_request_at(
        &self,
        request: &SignupRequest,
        at: DateTime<Utc>,
    ) -> Result<SignupRecord, RelayError> {
        self.store(adapt_request_at(request, at)).await
    }

    async fn store(&self, record: SignupRecord) -> Result<SignupRecord, RelayError> {
        self.repo.insert_signup(&record).await?;
        Ok(record)
    }
}
