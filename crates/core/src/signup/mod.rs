mod operations;
mod ticks;
mod types;

pub use operations::{adapt_request, adapt_request_at, row_key};
pub use ticks::{ticks, TICKS_AT_UNIX_EPOCH, TICKS_PER_SECOND};
pub use types::{SignupRecord, SignupRequest};
