//! DynamoDB attribute names.
//!
//! One table per deployment, keyed by genre (hash) and `<name>:<ticks>` (range).

pub const PARTITION_KEY: &str = "PartitionKey";
pub const ROW_KEY: &str = "RowKey";
pub const NAME: &str = "Name";
pub const EMAIL: &str = "Email";
pub const GENRE: &str = "Genre";
pub const TIMESTAMP: &str = "Timestamp";
