//! Queue backend implementations.
//!
//! This module provides concrete implementations of the queue trait
//! defined in `bookclub_core::queue`, plus the [`QueueAccess`] adapter the
//! HTTP handlers use to enqueue signups. The backend is selected at compile
//! time via feature flags.
//!
//! # Feature Flags
//!
//! - `memory` (default): In-process queues, shared by the API and the queue trigger
//! - `redis`: Redis lists, so the API and the queue trigger can run as separate processes
//!
//! These features are mutually exclusive - only one queue backend can be
//! enabled at a time.

// Compile-time checks for mutual exclusivity
#[cfg(all(feature = "memory", feature = "redis"))]
compile_error!(
    "Features 'memory' and 'redis' are mutually exclusive. \
    Enable only one queue backend at a time."
);

#[cfg(not(any(feature = "memory", feature = "redis")))]
compile_error!(
    "No queue backend selected. Enable 'memory' or 'redis' feature. \
    Example: cargo build -p bookclub --features memory"
);

mod access;

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "redis")]
pub mod redis_impl;

pub use access::QueueAccess;

#[cfg(feature = "memory")]
pub use memory::MemoryQueue;

#[cfg(feature = "redis")]
pub use redis_impl::RedisQueue;
