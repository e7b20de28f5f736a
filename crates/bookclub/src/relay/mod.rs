//! Queue-triggered relay from the signup queue to the signup table.

mod processor;
mod trigger;

pub use processor::{RelayError, SignupRelay};
pub use trigger::{InvocationOutcome, QueueTrigger};
