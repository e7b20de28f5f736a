//! Queue transport encoding.
//!
//! A payload travels as base64 (standard alphabet, padded) of its JSON text.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{de::DeserializeOwned, Serialize};

use super::{QueueError, Result};

/// Serializes a payload to JSON and encodes it as base64.
pub fn encode_message<T: Serialize + ?Sized>(message: &T) -> Result<String> {
    let json = serde_json::to_string(message).map_err(|e| QueueError::Encoding(e.to_string()))?;
    Ok(STANDARD.encode(json.as_bytes()))
}

/// Decodes a base64 transport string and deserializes the JSON inside it.
pub fn decode_message<T: DeserializeOwned>(body: &str) -> Result<T> {
    let bytes = STANDARD
        .decode(body.trim())
        .map_err(|e| QueueError::Decoding(format!("invalid base64: {e}")))?;
    serde_json::from_slice(&bytes).map_err(|e| QueueError::Decoding(format!("invalid JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signup::SignupRequest;

    #[test]
    fn test_encoded_message_is_base64_of_json() {
        let request = SignupRequest::new("A", "a@x.com", "SciFi");

        let encoded = encode_message(&request).unwrap();

        let json = String::from_utf8(STANDARD.decode(&encoded).unwrap()).unwrap();
        assert_eq!(json, r#"{"name":"A","email":"a@x.com","genre":"SciFi"}"#);
    }

    #[test]
    fn test_decode_signup_request() {
        // base64 of {"name":"A","email":"a@x.com","genre":"SciFi"}
        let body = "eyJuYW1lIjoiQSIsImVtYWlsIjoiYUB4LmNvbSIsImdlbnJlIjoiU2NpRmkifQ==";

        let request: SignupRequest = decode_message(body).unwrap();

        assert_eq!(request, SignupRequest::new("A", "a@x.com", "SciFi"));
    }

    #[test]
    fn test_decode_rejects_plain_json() {
        let body = r#"{"name":"A","email":"a@x.com","genre":"SciFi"}"#;

        let result: Result<SignupRequest> = decode_message(body);

        assert!(matches!(result, Err(QueueError::Decoding(_))));
    }

    #[test]
    fn test_decode_rejects_wrong_shape() {
        let body = STANDARD.encode(r#"{"title":"Dune"}"#);

        let result: Result<SignupRequest> = decode_message(&body);

        match result {
            Err(QueueError::Decoding(msg)) => assert!(msg.starts_with("invalid JSON")),
            other => panic!("expected decoding error, got {other:?}"),
        }
    }
}
