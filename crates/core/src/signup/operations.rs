//! Mapping from submitted signups to stored records.

use chrono::{DateTime, Utc};

use super::ticks::ticks;
use super::types::{SignupRecord, SignupRequest};

/// Builds the row key for a signup.
///
/// Pattern: `<name>:<ticks>`. The name is used as-is, so an empty name
/// yields a key that starts with `:`.
pub fn row_key(name: &str, ticks: i64) -> String {
    format!("{name}:{ticks}")
}

/// Builds the stored record for a signup submitted at `at`.
///
/// The genre becomes the partition key. Name, email and genre are copied
/// verbatim.
pub fn adapt_request_at(request: &SignupRequest, at: DateTime<Utc>) -> SignupRecord {
    SignupRecord {
        partition_key: request.genre.clone(),
        row_key: row_key(&request.name, ticks(at)),
        name: request.name.clone(),
        email: request.email.clone(),
        genre: request.genre.clone(),
        submitted_at: at,
    }
}

/// Builds the stored record for a signup using the current clock reading.
pub fn adapt_request(request: &SignupRequest) -> SignupRecord {
    adapt_request_at(request, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn test_row_key_format() {
        assert_eq!(row_key("Ada", 42), "Ada:42");
    }

    #[test]
    fn test_adapt_copies_fields_verbatim() {
        let request = SignupRequest::new("A", "a@x.com", "SciFi");
        let when = at(1_700_000_000);

        let record = adapt_request_at(&request, when);

        assert_eq!(record.partition_key, "SciFi");
        assert_eq!(record.row_key, format!("A:{}", ticks(when)));
        assert_eq!(record.name, "A");
        assert_eq!(record.email, "a@x.com");
        assert_eq!(record.genre, "SciFi");
        assert_eq!(record.submitted_at, when);
    }

    #[test]
    fn test_same_name_and_genre_at_different_instants_get_distinct_row_keys() {
        let request = SignupRequest::new("A", "a@x.com", "SciFi");
        let first = adapt_request_at(&request, at(1_700_000_000));
        let second = adapt_request_at(&request, at(1_700_000_000) + Duration::milliseconds(5));

        assert_eq!(first.partition_key, second.partition_key);
        assert_ne!(first.row_key, second.row_key);
    }

    #[test]
    fn test_empty_name_is_accepted() {
        let request = SignupRequest::new("", "", "");
        let when = at(1_700_000_000);

        let record = adapt_request_at(&request, when);

        assert_eq!(record.row_key, format!(":{}", ticks(when)));
        assert_eq!(record.partition_key, "");
    }

    #[test]
    fn test_adapt_request_uses_current_clock() {
        let before = ticks(Utc::now());
        let record = adapt_request(&SignupRequest::new("A", "a@x.com", "SciFi"));
        let after = ticks(Utc::now());

        let token: i64 = record.row_key.rsplit(':').next().unwrap().parse().unwrap();
        assert!(token >= before && token <= after);
    }
}
