//! Consensource ledger client library.
//!
//! Builds, signs, and submits certificate registry transactions to a ledger
//! node over its REST API, and reads the resulting state back.

pub mod config;
pub mod observability;
pub mod registry;
pub mod resilience;
pub mod sawtooth;

pub use config::ClientConfig;
pub use registry::ConsensourceClient;
pub use sawtooth::{RestClient, Signer};
