//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use bookclub_core::signup::SignupRecord;
use chrono::{DateTime, Utc};
use rusqlite::Row;

/// Convert a SQLite row to a SignupRecord.
///
/// Expected columns: partition_key, row_key, name, email, genre, submitted_at
pub fn row_to_signup(row: &Row) -> rusqlite::Result<SignupRecord> {
    let submitted_at: String = row.get(5)?;

    Ok(SignupRecord {
        partition_key: row.get(0)?,
        row_key: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        genre: row.get(4)?,
        submitted_at: parse_datetime(&submitted_at)?,
    })
}

/// Format a DateTime for SQLite storage (RFC 3339).
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

fn parse_datetime(s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_datetime_format_keeps_sub_second_precision() {
        let dt = Utc.timestamp_opt(1_700_000_000, 123_456_700).unwrap();

        let parsed = parse_datetime(&format_datetime(&dt)).unwrap();

        assert_eq!(parsed, dt);
    }

    #[test]
    fn test_parse_datetime_rejects_garbage() {
        assert!(parse_datetime("yesterday").is_err());
    }
}
