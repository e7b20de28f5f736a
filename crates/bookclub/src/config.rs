use std::{env, time::Duration};

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Name of the queue signups are relayed through (default: "bookclubsignups")
    pub queue_name: String,
    /// Name of the table signups are stored in (default: "BookClubSignups")
    pub table_name: String,
    /// Path to SQLite database file (default: "bookclub.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    /// Redis connection URL (default: "redis://localhost:6379")
    /// Note: Only used when the `redis` feature is enabled.
    #[allow(dead_code)]
    pub redis_url: String,
    /// Custom AWS endpoint, e.g. a local DynamoDB (default: unset)
    /// Note: Only used when the `dynamodb` feature is enabled.
    #[allow(dead_code)]
    pub aws_endpoint_url: Option<String>,
    /// AWS region (default: "us-east-1")
    #[allow(dead_code)]
    pub aws_region: String,
    /// Origin allowed to POST signups cross-origin (default: "http://localhost:4200")
    pub cors_allowed_origin: String,
    /// How long a queue poll waits for a message, in seconds (default: 1)
    pub queue_poll_seconds: u64,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `QUEUE_NAME` - Signup queue name (default: "bookclubsignups")
    /// - `TABLE_NAME` - Signup table name (default: "BookClubSignups")
    /// - `SQLITE_PATH` - SQLite database path (default: "bookclub.db")
    /// - `REDIS_URL` - Redis connection URL (default: "redis://localhost:6379")
    /// - `AWS_ENDPOINT_URL` - Custom AWS endpoint (default: unset)
    /// - `AWS_REGION` - AWS region (default: "us-east-1")
    /// - `CORS_ALLOWED_ORIGIN` - Allowed CORS origin (default: "http://localhost:4200")
    /// - `QUEUE_POLL_SECONDS` - Queue poll wait in seconds (default: 1)
    pub fn from_env() -> Self {
        Self {
            queue_name: env::var("QUEUE_NAME").unwrap_or_else(|_| "bookclubsignups".to_string()),
            table_name: env::var("TABLE_NAME").unwrap_or_else(|_| "BookClubSignups".to_string()),
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "bookclub.db".to_string()),
            redis_url: env::var("REDIS_URL")
                .unwrap_or_else(|_| "redis://localhost:6379".to_string()),
            aws_endpoint_url: env::var("AWS_ENDPOINT_URL").ok(),
            aws_region: env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:4200".to_string()),
            queue_poll_seconds: env::var("QUEUE_POLL_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
        }
    }

    /// Get the queue poll wait as a Duration.
    pub fn queue_poll(&self) -> Duration {
        Duration::from_secs(self.queue_poll_seconds)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_poll_conversion() {
        let config = Config {
            queue_poll_seconds: 5,
            ..Config::from_env()
        };

        assert_eq!(config.queue_poll(), Duration::from_secs(5));
    }

    #[test]
    fn test_default_values() {
        // Clear environment variables to test defaults
        env::remove_var("QUEUE_NAME");
        env::remove_var("TABLE_NAME");
        env::remove_var("SQLITE_PATH");
        env::remove_var("REDIS_URL");
        env::remove_var("AWS_REGION");
        env::remove_var("CORS_ALLOWED_ORIGIN");
        env::remove_var("QUEUE_POLL_SECONDS");

        let config = Config::from_env();

        assert_eq!(config.queue_name, "bookclubsignups");
        assert_eq!(config.table_name, "BookClubSignups");
        assert_eq!(config.sqlite_path, "bookclub.db");
        assert_eq!(config.redis_url, "redis://localhost:6379");
        assert_eq!(config.aws_region, "us-east-1");
        assert_eq!(config.cors_allowed_origin, "http://localhost:4200");
        assert_eq!(config.queue_poll_seconds, 1);
    }
}
