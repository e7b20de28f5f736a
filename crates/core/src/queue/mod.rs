mod codec;
mod error;
mod http_mapping;
mod traits;
mod types;

pub use codec::{decode_message, encode_message};
pub use error::{QueueError, Result};
pub use http_mapping::queue_error_to_status_code;
pub use traits::MessageQueue;
pub use types::{MessageId, QueueMessage};
