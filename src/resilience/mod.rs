//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Before talking to the node:
//!     → retries.rs (poll /blocks until 200)
//!     → backoff.rs (linear delay between attempts)
//! ```
//!
//! Commit waiting lives with the registry client; it relies on the
//! node's server-side `wait` instead of client-side sleeps.

pub mod backoff;
pub mod retries;

pub use backoff::linear_backoff;
pub use retries::{wait_for_rest_api, wait_until_status};
