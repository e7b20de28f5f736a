//! SQLite repository implementation.
//!
//! Implements `SignupRepository` from `bookclub_core::storage` using SQLite.

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use bookclub_core::signup::SignupRecord;
use bookclub_core::storage::{RepositoryError, Result, SignupRepository};

use super::conversions::{format_datetime, row_to_signup};
use super::error::{map_read_error, map_tokio_rusqlite_error};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository implementation.
///
/// All signups live in one table with a composite `(partition_key, row_key)`
/// primary key.
pub struct SqliteRepository {
    conn: Connection,
    table_name: String,
}

impl SqliteRepository {
    /// Creates a new repository with a file-based database.
    ///
    /// The database file and the signups table are created if they don't exist.
    pub async fn new(path: &str, table_name: impl Into<String>) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init(conn, table_name.into()).await
    }

    /// Creates a new repository with an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    #[cfg_attr(not(test), allow(dead_code))]
    pub async fn new_in_memory(table_name: impl Into<String>) -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init(conn, table_name.into()).await
    }

    async fn init(conn: Connection, table_name: String) -> Result<Self> {
        let create = schema::create_table(&table_name);
        conn.call(move |conn| {
            conn.execute_batch(&create).map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(map_read_error)?;

        tracing::debug!(table = %table_name, "SQLite signup table ready");

        Ok(Self { conn, table_name })
    }
}

#[async_trait]
impl SignupRepository for SqliteRepository {
    async fn insert_signup(&self, record: &SignupRecord) -> Result<()> {
        let sql = schema::insert_signup(&self.table_name);
        let partition_key = record.partition_key.clone();
        let row_key = record.row_key.clone();
        let name = record.name.clone();
        let email = record.email.clone();
        let genre = record.genre.clone();
        let submitted_at = format_datetime(&record.submitted_at);

        self.conn
            .call(move |conn| {
                conn.execute(
                    &sql,
                    rusqlite::params![partition_key, row_key, name, email, genre, submitted_at],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, &record.partition_key, &record.row_key))
    }

    async fn get_signup(
        &self,
        partition_key: &str,
        row_key: &str,
    ) -> Result<Option<SignupRecord>> {
        let sql = schema::select_signup(&self.table_name);
        let pk = partition_key.to_string();
        let rk = row_key.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
                match stmt.query_row([&pk, &rk], row_to_signup) {
                    Ok(record) => Ok(Some(record)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(wrap_err(e)),
                }
            })
            .await
            .map_err(map_read_error)
    }

    async fn list_signups_by_genre(&self, genre: &str) -> Result<Vec<SignupRecord>> {
        let sql = schema::select_signups_by_partition(&self.table_name);
        let pk = genre.to_string();

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
                let rows = stmt.query_map([&pk], row_to_signup).map_err(wrap_err)?;

                let mut records = Vec::new();
                for row_result in rows {
                    records.push(row_result.map_err(wrap_err)?);
                }
                Ok(records)
            })
            .await
            .map_err(map_read_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bookclub_core::signup::{adapt_request_at, SignupRequest};
    use chrono::{TimeZone, Utc};

    const TABLE: &str = "BookClubSignups";

    fn record(name: &str, genre: &str, secs: i64) -> SignupRecord {
        adapt_request_at(
            &SignupRequest::new(name, format!("{name}@example.com"), genre),
            Utc.timestamp_opt(secs, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = SqliteRepository::new_in_memory(TABLE).await.unwrap();
        let signup = record("A", "SciFi", 1_700_000_000);

        repo.insert_signup(&signup).await.unwrap();

        let retrieved = repo
            .get_signup(&signup.partition_key, &signup.row_key)
            .await
            .unwrap();
        assert_eq!(retrieved, Some(signup));
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let repo = SqliteRepository::new_in_memory(TABLE).await.unwrap();

        let result = repo.get_signup("SciFi", "nobody:1").await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_insert_fails_without_overwriting() {
        let repo = SqliteRepository::new_in_memory(TABLE).await.unwrap();
        let original = record("A", "SciFi", 1_700_000_000);
        repo.insert_signup(&original).await.unwrap();

        let mut duplicate = original.clone();
        duplicate.email = "changed@example.com".to_string();
        let result = repo.insert_signup(&duplicate).await;

        match result {
            Err(RepositoryError::AlreadyExists { id, .. }) => {
                assert_eq!(id, format!("SciFi/{}", original.row_key));
            }
            other => panic!("Expected AlreadyExists, got {other:?}"),
        }
        let stored = repo
            .get_signup(&original.partition_key, &original.row_key)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.email, "A@example.com");
    }

    #[tokio::test]
    async fn test_list_by_genre() {
        let repo = SqliteRepository::new_in_memory(TABLE).await.unwrap();
        repo.insert_signup(&record("Zed", "SciFi", 1_700_000_000))
            .await
            .unwrap();
        repo.insert_signup(&record("Ann", "SciFi", 1_700_000_001))
            .await
            .unwrap();
        repo.insert_signup(&record("Bob", "Fantasy", 1_700_000_002))
            .await
            .unwrap();

        let names: Vec<String> = repo
            .list_signups_by_genre("SciFi")
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, vec!["Ann", "Zed"]);
    }

    #[tokio::test]
    async fn test_empty_fields_are_stored() {
        let repo = SqliteRepository::new_in_memory(TABLE).await.unwrap();
        let signup = record("", "", 1_700_000_000);

        repo.insert_signup(&signup).await.unwrap();

        let stored = repo.list_signups_by_genre("").await.unwrap();
        assert_eq!(stored, vec![signup]);
    }

    #[tokio::test]
    async fn test_reads_after_close_report_connection_failure() {
        let repo = SqliteRepository::new_in_memory(TABLE).await.unwrap();
        repo.conn.clone().close().await.unwrap();

        let listed = repo.list_signups_by_genre("SciFi").await;
        let fetched = repo.get_signup("SciFi", "A:1").await;

        assert!(matches!(listed, Err(RepositoryError::ConnectionFailed(_))));
        assert!(matches!(fetched, Err(RepositoryError::ConnectionFailed(_))));
    }
}
