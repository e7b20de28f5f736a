//! Redis queue backend implementation.
//!
//! Each named queue is a Redis list. Producers `LPUSH`, the queue trigger
//! `BRPOP`s, so messages come out in arrival order.

mod error;
mod queue;

pub use queue::RedisQueue;
