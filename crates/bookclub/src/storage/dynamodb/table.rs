//! Table bootstrap: create the signups table if it is missing.

use std::time::Duration;

use aws_sdk_dynamodb::types::{
    AttributeDefinition, BillingMode, KeySchemaElement, KeyType, ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;
use bookclub_core::storage::{RepositoryError, Result};

use super::attributes;
use super::error::{map_create_table_error, map_describe_table_error, DescribeFailure};

const MAX_ACTIVATION_ATTEMPTS: u32 = 60;
const ACTIVATION_POLL_DELAY: Duration = Duration::from_millis(500);

fn build_error(e: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::QueryFailed(format!("Invalid table definition: {e}"))
}

/// Key schema: genre as hash key, `<name>:<ticks>` as range key.
fn key_schema() -> Result<Vec<KeySchemaElement>> {
    Ok(vec![
        KeySchemaElement::builder()
            .attribute_name(attributes::PARTITION_KEY)
            .key_type(KeyType::Hash)
            .build()
            .map_err(build_error)?,
        KeySchemaElement::builder()
            .attribute_name(attributes::ROW_KEY)
            .key_type(KeyType::Range)
            .build()
            .map_err(build_error)?,
    ])
}

fn attribute_definitions() -> Result<Vec<AttributeDefinition>> {
    [attributes::PARTITION_KEY, attributes::ROW_KEY]
        .into_iter()
        .map(|name| {
            AttributeDefinition::builder()
                .attribute_name(name)
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(build_error)
        })
        .collect()
}

/// Returns the status of the table, or `None` if it does not exist.
async fn table_status(client: &Client, table_name: &str) -> Result<Option<TableStatus>> {
    match client.describe_table().table_name(table_name).send().await {
        Ok(response) => Ok(Some(
            response
                .table()
                .and_then(|t| t.table_status())
                .cloned()
                .unwrap_or(TableStatus::Active),
        )),
        Err(err) => match map_describe_table_error(err) {
            DescribeFailure::Missing => Ok(None),
            DescribeFailure::Other(e) => Err(e),
        },
    }
}

async fn create_table(client: &Client, table_name: &str) -> Result<()> {
    let result = client
        .create_table()
        .table_name(table_name)
        .set_key_schema(Some(key_schema()?))
        .set_attribute_definitions(Some(attribute_definitions()?))
        .billing_mode(BillingMode::PayPerRequest)
        .send()
        .await;

    match result {
        Ok(_) => {
            tracing::info!(table = table_name, "Created DynamoDB table");
            Ok(())
        }
        Err(err) => match map_create_table_error(err) {
            None => Ok(()),
            Some(e) => Err(e),
        },
    }
}

/// What `ensure_table` does after its first status read.
#[derive(Debug, PartialEq, Eq)]
enum Setup {
    Ready,
    Create,
    AwaitActive,
}

fn setup_for(status: Option<TableStatus>) -> Setup {
    match status {
        Some(TableStatus::Active) => Setup::Ready,
        None => Setup::Create,
        Some(_) => Setup::AwaitActive,
    }
}

/// Makes sure the table exists and is active, creating it when missing.
pub async fn ensure_table(client: &Client, table_name: &str) -> Result<()> {
    match setup_for(table_status(client, table_name).await?) {
        Setup::Ready => return Ok(()),
        Setup::Create => create_table(client, table_name).await?,
        Setup::AwaitActive => {}
    }

    for _ in 0..MAX_ACTIVATION_ATTEMPTS {
        if table_status(client, table_name).await? == Some(TableStatus::Active) {
            return Ok(());
        }
        tokio::time::sleep(ACTIVATION_POLL_DELAY).await;
    }

    Err(RepositoryError::QueryFailed(format!(
        "Table {table_name} did not become active"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_schema_uses_partition_and_row_keys() {
        let schema = key_schema().unwrap();

        assert_eq!(schema.len(), 2);
        assert_eq!(schema[0].attribute_name(), "PartitionKey");
        assert_eq!(schema[0].key_type(), &KeyType::Hash);
        assert_eq!(schema[1].attribute_name(), "RowKey");
        assert_eq!(schema[1].key_type(), &KeyType::Range);
    }

    #[test]
    fn test_key_attributes_are_strings() {
        let definitions = attribute_definitions().unwrap();

        assert_eq!(definitions.len(), 2);
        assert!(definitions
            .iter()
            .all(|d| d.attribute_type() == &ScalarAttributeType::S));
    }

    #[test]
    fn test_setup_follows_single_status_read() {
        assert_eq!(setup_for(Some(TableStatus::Active)), Setup::Ready);
        assert_eq!(setup_for(None), Setup::Create);
        assert_eq!(setup_for(Some(TableStatus::Creating)), Setup::AwaitActive);
        assert_eq!(setup_for(Some(TableStatus::Updating)), Setup::AwaitActive);
    }
}
