//! bookclub_client - CLI client for the bookclub signup API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::BookclubClient;
pub use error::{ClientError, Result};
