//! Ledger framework integration subsystem.
//!
//! # Data Flow
//! ```text
//! Key (generated, env var, or key file)
//!     → signer.rs (secp256k1 signing)
//!     → batch.rs (transaction + batch envelopes, protos.rs wire types)
//!     → client.rs (REST submission, status polling, state reads)
//! ```
//!
//! # Security Constraints
//! - Never log private keys
//! - All REST calls have configurable timeouts

pub mod batch;
pub mod client;
pub mod protos;
pub mod signer;
pub mod types;

pub use batch::BatchBuilder;
pub use client::RestClient;
pub use signer::Signer;
pub use types::{BatchStatus, BatchStatusKind, SawtoothError, SawtoothResult, SigningError};
