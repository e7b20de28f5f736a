use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A genre signup as submitted by the web form.
///
/// Fields are carried verbatim. Nothing here is validated: an empty name or
/// a malformed email is a perfectly good `SignupRequest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub genre: String,
}

impl SignupRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            genre: genre.into(),
        }
    }
}

/// A signup as persisted in the record store.
///
/// Records are write-once. `partition_key` groups signups by genre and
/// `row_key` identifies a signup within that genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignupRecord {
    pub partition_key: String,
    pub row_key: String,
    pub name: String,
    pub email: String,
    pub genre: String,
    pub submitted_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_lowercase_fields() {
        let json = r#"{"name":"A","email":"a@x.com","genre":"SciFi"}"#;
        let request: SignupRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request, SignupRequest::new("A", "a@x.com", "SciFi"));
    }

    #[test]
    fn test_request_rejects_missing_field() {
        let json = r#"{"name":"A","email":"a@x.com"}"#;
        let result: Result<SignupRequest, _> = serde_json::from_str(json);

        assert!(result.is_err());
    }
}
