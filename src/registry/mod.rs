//! Certificate registry transaction family.
//!
//! # Data Flow
//! ```text
//! Action (payload.rs, protos.rs)
//!     → addressing.rs (input/output addresses)
//!     → client.rs (sign, batch, submit, poll status)
//!     → state reads decoded into Agent records
//! ```

pub mod addressing;
pub mod client;
pub mod payload;
pub mod protos;
pub mod types;

pub use client::ConsensourceClient;
pub use payload::Action;
pub use protos::Agent;
pub use types::{RegistryError, RegistryResult};
