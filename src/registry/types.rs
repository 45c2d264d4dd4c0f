//! Registry error definitions.

use thiserror::Error;

use crate::sawtooth::types::SawtoothError;

/// Errors from registry client operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Sawtooth(#[from] SawtoothError),

    /// State or payload bytes are not a valid message.
    #[error("Failed to decode registry data: {0}")]
    Decode(#[from] prost::DecodeError),

    #[error("Unsupported action: {0}")]
    UnsupportedAction(String),

    /// The node answered without a status for the submitted batch.
    #[error("No status returned for batch {0}")]
    MissingStatus(String),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;
