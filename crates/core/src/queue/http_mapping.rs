use super::QueueError;

/// Maps a [`QueueError`] to an HTTP status code.
///
/// - `ConnectionFailed` -> 503 (Service Unavailable)
/// - `Encoding` / `Decoding` -> 400 (Bad Request)
/// - `OperationFailed` -> 500 (Internal Server Error)
pub fn queue_error_to_status_code(error: &QueueError) -> u16 {
    match error {
        QueueError::ConnectionFailed(_) => 503,
        QueueError::OperationFailed(_) => 500,
        QueueError::Encoding(_) | QueueError::Decoding(_) => 400,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_failed_maps_to_503() {
        let error = QueueError::ConnectionFailed("refused".to_string());
        assert_eq!(queue_error_to_status_code(&error), 503);
    }

    #[test]
    fn test_operation_failed_maps_to_500() {
        let error = QueueError::OperationFailed("WRONGTYPE".to_string());
        assert_eq!(queue_error_to_status_code(&error), 500);
    }

    #[test]
    fn test_encoding_maps_to_400() {
        let error = QueueError::Encoding("key must be a string".to_string());
        assert_eq!(queue_error_to_status_code(&error), 400);
    }
}
