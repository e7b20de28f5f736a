//! In-memory queue backend for development and testing.
//!
//! Messages are not persisted and are lost when the process exits.

mod queue;

pub use queue::MemoryQueue;
