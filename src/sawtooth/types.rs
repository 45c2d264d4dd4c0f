//! REST API types and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export RestApiConfig from config module to avoid duplication
pub use crate::config::schema::RestApiConfig;

/// Errors that can occur while talking to the ledger node.
#[derive(Debug, Error)]
pub enum SawtoothError {
    /// Connection or transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The REST API answered with a non-success status.
    #[error("REST API returned {code}: {message}")]
    Status { code: u16, message: String },

    /// Invalid REST API URL.
    #[error("Invalid REST API URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Endpoint never became reachable.
    #[error("{url} is not available within {attempts} attempts")]
    Unavailable { url: String, attempts: u32 },

    /// Batch did not reach a final status in time.
    #[error("Batch {batch_id} still pending after {secs} seconds")]
    Timeout { batch_id: String, secs: u64 },

    /// Key parsing or signing failure.
    #[error(transparent)]
    Signing(#[from] SigningError),
}

/// Result type for REST API operations.
pub type SawtoothResult<T> = Result<T, SawtoothError>;

/// Errors from key handling and signature checks.
#[derive(Debug, Error)]
pub enum SigningError {
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Key not available: {0}")]
    KeyUnavailable(String),
}

/// Commit status of a batch as reported by the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatusKind {
    Committed,
    Invalid,
    Pending,
    Unknown,
}

impl BatchStatusKind {
    /// Whether the node will not change this status any more.
    pub fn is_final(&self) -> bool {
        matches!(self, BatchStatusKind::Committed | BatchStatusKind::Invalid)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BatchStatusKind::Committed => "COMMITTED",
            BatchStatusKind::Invalid => "INVALID",
            BatchStatusKind::Pending => "PENDING",
            BatchStatusKind::Unknown => "UNKNOWN",
        }
    }
}

/// A transaction the validator rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidTransaction {
    pub id: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_data: Option<String>,
}

/// One entry of a `/batch_statuses` response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStatus {
    pub id: String,
    pub status: BatchStatusKind,
    #[serde(default)]
    pub invalid_transactions: Vec<InvalidTransaction>,
}

impl BatchStatus {
    /// Message of the first rejected transaction, if any.
    pub fn first_invalid_message(&self) -> Option<&str> {
        self.invalid_transactions
            .first()
            .map(|txn| txn.message.as_str())
    }
}

/// A decoded state entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateEntry {
    pub address: String,
    pub data: Vec<u8>,
}

/// Block summary from `/blocks`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
    pub header_signature: String,
    #[serde(default)]
    pub header: serde_json::Value,
}

impl Block {
    /// Block height. The REST API renders 64-bit integers as strings.
    pub fn block_num(&self) -> Option<u64> {
        match self.header.get("block_num")? {
            serde_json::Value::String(s) => s.parse().ok(),
            serde_json::Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }
}

/// Paging links of a list response.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct Paging {
    #[serde(default)]
    pub next: Option<String>,
}

/// Generic `{ "data": ..., "link": ..., "paging": ... }` envelope.
#[derive(Debug, Deserialize)]
pub(crate) struct DataEnvelope<T> {
    pub data: T,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

/// `/state` list item, data still base64-encoded.
#[derive(Debug, Deserialize)]
pub(crate) struct RawStateEntry {
    pub address: String,
    pub data: String,
}

/// Response to `POST /batches`.
#[derive(Debug, Deserialize)]
pub(crate) struct SubmitResponse {
    pub link: String,
}

/// `{ "error": { "code", "title", "message" } }`
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_status_deserialize() {
        let body = r#"{
            "id": "abc",
            "status": "INVALID",
            "invalid_transactions": [
                {"id": "t1", "message": "Name was not provided", "extended_data": ""}
            ]
        }"#;
        let status: BatchStatus = serde_json::from_str(body).unwrap();
        assert_eq!(status.status, BatchStatusKind::Invalid);
        assert_eq!(status.first_invalid_message(), Some("Name was not provided"));
    }

    #[test]
    fn test_committed_status_without_invalid_list() {
        let status: BatchStatus =
            serde_json::from_str(r#"{"id": "abc", "status": "COMMITTED"}"#).unwrap();
        assert!(status.status.is_final());
        assert!(status.invalid_transactions.is_empty());
        assert_eq!(status.first_invalid_message(), None);
    }

    #[test]
    fn test_pending_is_not_final() {
        assert!(!BatchStatusKind::Pending.is_final());
        assert!(!BatchStatusKind::Unknown.is_final());
        assert_eq!(BatchStatusKind::Pending.as_str(), "PENDING");
    }

    #[test]
    fn test_block_num_string_or_number() {
        let block: Block = serde_json::from_str(
            r#"{"header_signature": "b0", "header": {"block_num": "12"}}"#,
        )
        .unwrap();
        assert_eq!(block.block_num(), Some(12));

        let block: Block = serde_json::from_str(
            r#"{"header_signature": "b1", "header": {"block_num": 7}}"#,
        )
        .unwrap();
        assert_eq!(block.block_num(), Some(7));
    }

    #[test]
    fn test_error_display() {
        let err = SawtoothError::Unavailable {
            url: "http://rest-api:8008/blocks".to_string(),
            attempts: 5,
        };
        assert_eq!(
            err.to_string(),
            "http://rest-api:8008/blocks is not available within 5 attempts"
        );

        let err = SawtoothError::Status {
            code: 404,
            message: "State Not Found".to_string(),
        };
        assert!(err.to_string().contains("404"));
    }
}
