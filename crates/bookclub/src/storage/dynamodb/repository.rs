//! DynamoDB repository implementation.
//!
//! Implements `SignupRepository` from `bookclub_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use tokio::sync::OnceCell;

use bookclub_core::signup::SignupRecord;
use bookclub_core::storage::{Result, SignupRepository};

use super::attributes;
use super::conversions::{item_to_signup, signup_to_item};
use super::error::{map_get_item_error, map_put_item_error, map_query_error};
use super::table::ensure_table;

/// DynamoDB-based repository implementation.
///
/// The table is checked (and created if absent) the first time any
/// operation runs, then never again for the life of the repository.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
    table_ready: OnceCell<()>,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            table_ready: OnceCell::new(),
        }
    }

    /// Creates a new repository using the AWS SDK default credential chain.
    ///
    /// `endpoint_url` points the client at a local DynamoDB when set.
    pub async fn from_config(
        region: &str,
        endpoint_url: Option<&str>,
        table_name: impl Into<String>,
    ) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.to_string()));

        if let Some(endpoint) = endpoint_url {
            loader = loader.endpoint_url(endpoint);
        }

        let sdk_config = loader.load().await;
        Self::new(Client::new(&sdk_config), table_name)
    }

    async fn table(&self) -> Result<&str> {
        self.table_ready
            .get_or_try_init(|| ensure_table(&self.client, &self.table_name))
            .await?;
        Ok(&self.table_name)
    }
}

#[async_trait]
impl SignupRepository for DynamoDbRepository {
    async fn insert_signup(&self, record: &SignupRecord) -> Result<()> {
        let table_name = self.table().await?;

        self.client
            .put_item()
            .table_name(table_name)
            .set_item(Some(signup_to_item(record)))
            .condition_expression("attribute_not_exists(#pk)")
            .expression_attribute_names("#pk", attributes::PARTITION_KEY)
            .send()
            .await
            .map_err(|e| map_put_item_error(e, &record.partition_key, &record.row_key))?;

        Ok(())
    }

    async fn get_signup(
        &self,
        partition_key: &str,
        row_key: &str,
    ) -> Result<Option<SignupRecord>> {
        let table_name = self.table().await?;

        let result = self
            .client
            .get_item()
            .table_name(table_name)
            .key(
                attributes::PARTITION_KEY,
                AttributeValue::S(partition_key.to_string()),
            )
            .key(attributes::ROW_KEY, AttributeValue::S(row_key.to_string()))
            .consistent_read(true)
            .send()
            .await
            .map_err(map_get_item_error)?;

        match result.item {
            Some(item) => Ok(Some(item_to_signup(&item)?)),
            None => Ok(None),
        }
    }

    async fn list_signups_by_genre(&self, genre: &str) -> Result<Vec<SignupRecord>> {
        let table_name = self.table().await?;
        let mut records = Vec::new();
        let mut start_key = None;

        loop {
            let result = self
                .client
                .query()
                .table_name(table_name)
                .key_condition_expression("#pk = :pk")
                .expression_attribute_names("#pk", attributes::PARTITION_KEY)
                .expression_attribute_values(":pk", AttributeValue::S(genre.to_string()))
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_query_error)?;

            for item in result.items() {
                records.push(item_to_signup(item)?);
            }

            match result.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(records)
    }
}
