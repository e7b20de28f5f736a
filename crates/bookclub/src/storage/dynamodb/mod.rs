//! DynamoDB storage backend implementation.
//!
//! This module provides a DynamoDB-based implementation of the repository trait
//! using `aws-sdk-dynamodb`. The table is created on first use if it is missing.

mod attributes;
mod conversions;
mod error;
mod repository;
mod table;

pub use repository::DynamoDbRepository;
