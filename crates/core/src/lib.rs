//! bookclub_core - Functional core for the bookclub signup relay.
//!
//! Pure types and functions shared by the server and the client. Anything
//! that talks to a queue, a table, or the network lives in the `bookclub`
//! crate behind the traits defined here.

pub mod queue;
pub mod signup;
pub mod storage;
