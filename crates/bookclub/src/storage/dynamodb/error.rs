//! DynamoDB error mapping.
//!
//! Maps AWS SDK errors to `RepositoryError` from `bookclub_core::storage`.

use std::fmt::Debug;

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::get_item::GetItemError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::query::QueryError;
use bookclub_core::storage::RepositoryError;

/// Map a PutItem SDK error to RepositoryError.
///
/// A failed `attribute_not_exists` condition means the key is taken.
pub fn map_put_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<PutItemError, R>,
    partition_key: &str,
    row_key: &str,
) -> RepositoryError {
    if let SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) = &err {
        return map_connection_error(format!("{err:?}"));
    }
    match err.into_service_error() {
        PutItemError::ConditionalCheckFailedException(_) => {
            RepositoryError::signup_exists(partition_key, row_key)
        }
        PutItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        PutItemError::ProvisionedThroughputExceededException(_) => {
            RepositoryError::QueryFailed("Throughput exceeded".to_string())
        }
        PutItemError::RequestLimitExceeded(_) => {
            RepositoryError::QueryFailed("Request limit exceeded".to_string())
        }
        PutItemError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("PutItem failed: {:?}", err)),
    }
}

/// Map a GetItem SDK error to RepositoryError.
pub fn map_get_item_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<GetItemError, R>,
) -> RepositoryError {
    if let SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) = &err {
        return map_connection_error(format!("{err:?}"));
    }
    match err.into_service_error() {
        GetItemError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        GetItemError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("GetItem failed: {:?}", err)),
    }
}

/// Map a Query SDK error to RepositoryError.
pub fn map_query_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<QueryError, R>,
) -> RepositoryError {
    if let SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) = &err {
        return map_connection_error(format!("{err:?}"));
    }
    match err.into_service_error() {
        QueryError::ResourceNotFoundException(_) => {
            RepositoryError::QueryFailed("Table not found".to_string())
        }
        QueryError::InternalServerError(_) => {
            RepositoryError::QueryFailed("DynamoDB internal server error".to_string())
        }
        err => RepositoryError::QueryFailed(format!("Query failed: {:?}", err)),
    }
}

/// Outcome of a DescribeTable call that failed.
pub enum DescribeFailure {
    /// The table does not exist yet.
    Missing,
    Other(RepositoryError),
}

/// Map a DescribeTable SDK error, separating "table missing" from real failures.
pub fn map_describe_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<DescribeTableError, R>,
) -> DescribeFailure {
    if let SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) = &err {
        return DescribeFailure::Other(map_connection_error(format!("{err:?}")));
    }
    match err.into_service_error() {
        DescribeTableError::ResourceNotFoundException(_) => DescribeFailure::Missing,
        err => DescribeFailure::Other(RepositoryError::QueryFailed(format!(
            "DescribeTable failed: {:?}",
            err
        ))),
    }
}

/// Map a CreateTable SDK error.
///
/// Returns `None` when another writer created the table first.
pub fn map_create_table_error<R: Debug + Send + Sync + 'static>(
    err: SdkError<CreateTableError, R>,
) -> Option<RepositoryError> {
    if let SdkError::DispatchFailure(_) | SdkError::TimeoutError(_) = &err {
        return Some(map_connection_error(format!("{err:?}")));
    }
    match err.into_service_error() {
        CreateTableError::ResourceInUseException(_) => None,
        err => Some(RepositoryError::QueryFailed(format!(
            "CreateTable failed: {:?}",
            err
        ))),
    }
}

/// Map a generic connection/config error to RepositoryError.
pub fn map_connection_error(err: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::ConnectionFailed(err.to_string())
}
