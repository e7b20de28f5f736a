//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and domain types.
//! These are testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use bookclub_core::signup::SignupRecord;
use bookclub_core::storage::RepositoryError;
use chrono::{DateTime, Utc};

use super::attributes;

/// Convert a SignupRecord to a DynamoDB item.
pub fn signup_to_item(record: &SignupRecord) -> HashMap<String, AttributeValue> {
    let mut item = HashMap::new();

    // Keys
    item.insert(
        attributes::PARTITION_KEY.to_string(),
        AttributeValue::S(record.partition_key.clone()),
    );
    item.insert(
        attributes::ROW_KEY.to_string(),
        AttributeValue::S(record.row_key.clone()),
    );

    // Data
    item.insert(
        attributes::NAME.to_string(),
        AttributeValue::S(record.name.clone()),
    );
    item.insert(
        attributes::EMAIL.to_string(),
        AttributeValue::S(record.email.clone()),
    );
    item.insert(
        attributes::GENRE.to_string(),
        AttributeValue::S(record.genre.clone()),
    );
    item.insert(
        attributes::TIMESTAMP.to_string(),
        AttributeValue::S(record.submitted_at.to_rfc3339()),
    );

    item
}

/// Convert a DynamoDB item to a SignupRecord.
pub fn item_to_signup(
    item: &HashMap<String, AttributeValue>,
) -> Result<SignupRecord, RepositoryError> {
    Ok(SignupRecord {
        partition_key: get_string(item, attributes::PARTITION_KEY)?,
        row_key: get_string(item, attributes::ROW_KEY)?,
        name: get_string(item, attributes::NAME)?,
        email: get_string(item, attributes::EMAIL)?,
        genre: get_string(item, attributes::GENRE)?,
        submitted_at: get_datetime(item, attributes::TIMESTAMP)?,
    })
}

/// Get a required string attribute.
fn get_string(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    item.get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}

/// Get a required RFC 3339 timestamp attribute.
fn get_datetime(
    item: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<DateTime<Utc>, RepositoryError> {
    let s = get_string(item, key)?;
    DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Serialization(format!("Invalid timestamp {s}: {e}")))
}
