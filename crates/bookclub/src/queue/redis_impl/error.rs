//! Redis error mapping to QueueError.

use bookclub_core::queue::QueueError;

/// Maps Redis errors to QueueError.
pub fn map_redis_error(err: redis::RedisError) -> QueueError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        QueueError::ConnectionFailed(err.to_string())
    } else {
        QueueError::OperationFailed(err.to_string())
    }
}
