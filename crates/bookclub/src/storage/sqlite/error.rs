//! SQLite error mapping.
//!
//! Maps `tokio_rusqlite::Error` and `rusqlite::Error` to `RepositoryError` from
//! `bookclub_core::storage`. Key constraint violations become `AlreadyExists`.

use bookclub_core::storage::RepositoryError;

/// Maps a rusqlite error. `key` names the signup being written, if any.
///
/// # Error Mapping
///
/// - `SQLITE_CONSTRAINT_PRIMARYKEY` / `SQLITE_CONSTRAINT_UNIQUE` on a write → `RepositoryError::AlreadyExists`
/// - Cannot open database → `RepositoryError::ConnectionFailed`
/// - Row conversion failures → `RepositoryError::Serialization`
/// - All other errors → `RepositoryError::QueryFailed`
fn map_rusqlite_error(err: &rusqlite::Error, key: Option<(&str, &str)>) -> RepositoryError {
    match (err, key) {
        (rusqlite::Error::SqliteFailure(sqlite_err, _), Some((partition_key, row_key)))
            if sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                || sqlite_err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepositoryError::signup_exists(partition_key, row_key)
        }

        (rusqlite::Error::SqliteFailure(sqlite_err, _), _)
            if sqlite_err.code == rusqlite::ErrorCode::CannotOpen =>
        {
            RepositoryError::ConnectionFailed(format!("Cannot open database: {err}"))
        }

        (rusqlite::Error::FromSqlConversionFailure(..), _) => {
            RepositoryError::Serialization(err.to_string())
        }

        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

fn map_error(err: tokio_rusqlite::Error, key: Option<(&str, &str)>) -> RepositoryError {
    match &err {
        tokio_rusqlite::Error::Rusqlite(rusqlite_err) => map_rusqlite_error(rusqlite_err, key),
        tokio_rusqlite::Error::ConnectionClosed | tokio_rusqlite::Error::Close(_) => {
            RepositoryError::ConnectionFailed("Connection closed unexpectedly".to_string())
        }
        _ => RepositoryError::QueryFailed(err.to_string()),
    }
}

/// Maps a tokio_rusqlite error from writing the signup identified by
/// `partition_key`/`row_key`.
pub fn map_tokio_rusqlite_error(
    err: tokio_rusqlite::Error,
    partition_key: &str,
    row_key: &str,
) -> RepositoryError {
    map_error(err, Some((partition_key, row_key)))
}

/// Maps a tokio_rusqlite error from a read or schema statement.
pub fn map_read_error(err: tokio_rusqlite::Error) -> RepositoryError {
    map_error(err, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::ffi;

    fn constraint(extended_code: std::os::raw::c_int) -> tokio_rusqlite::Error {
        let sqlite_err = rusqlite::ffi::Error {
            code: rusqlite::ErrorCode::ConstraintViolation,
            extended_code,
        };
        tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(sqlite_err, None))
    }

    #[test]
    fn test_primary_key_constraint_maps_to_already_exists() {
        let result =
            map_tokio_rusqlite_error(constraint(ffi::SQLITE_CONSTRAINT_PRIMARYKEY), "SciFi", "A:1");

        match result {
            RepositoryError::AlreadyExists { entity_type, id } => {
                assert_eq!(entity_type, "Signup");
                assert_eq!(id, "SciFi/A:1");
            }
            other => panic!("Expected AlreadyExists, got {other:?}"),
        }
    }

    #[test]
    fn test_unique_constraint_maps_to_already_exists() {
        let result =
            map_tokio_rusqlite_error(constraint(ffi::SQLITE_CONSTRAINT_UNIQUE), "SciFi", "A:1");

        assert!(matches!(result, RepositoryError::AlreadyExists { .. }));
    }

    #[test]
    fn test_connection_closed_maps_to_connection_failed() {
        let result =
            map_tokio_rusqlite_error(tokio_rusqlite::Error::ConnectionClosed, "SciFi", "A:1");

        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_other_error_maps_to_query_failed() {
        let err = tokio_rusqlite::Error::Other(Box::new(std::io::Error::other("test error")));

        let result = map_tokio_rusqlite_error(err, "SciFi", "A:1");

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }

    #[test]
    fn test_closed_connection_on_read_maps_to_connection_failed() {
        let result = map_read_error(tokio_rusqlite::Error::ConnectionClosed);

        assert!(matches!(result, RepositoryError::ConnectionFailed(_)));
    }

    #[test]
    fn test_constraint_on_read_is_not_already_exists() {
        let result = map_read_error(constraint(ffi::SQLITE_CONSTRAINT_PRIMARYKEY));

        assert!(matches!(result, RepositoryError::QueryFailed(_)));
    }
}
