//! Transaction and batch building and signing.
//!
//! # Responsibilities
//! - Wrap a family payload in a signed transaction header
//! - Wrap transactions in a signed batch header
//! - Produce the batch list accepted by `POST /batches`

use prost::Message;
use sha2::{Digest, Sha512};

use crate::sawtooth::protos::{Batch, BatchHeader, BatchList, Transaction, TransactionHeader};
use crate::sawtooth::signer::Signer;

/// Builds signed envelopes for one transaction family.
#[derive(Debug, Clone)]
pub struct BatchBuilder {
    family_name: String,
    family_version: String,
}

impl BatchBuilder {
    /// Create a builder for the given family name and version.
    pub fn new(family_name: impl Into<String>, family_version: impl Into<String>) -> Self {
        Self {
            family_name: family_name.into(),
            family_version: family_version.into(),
        }
    }

    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    pub fn family_version(&self) -> &str {
        &self.family_version
    }

    /// Build and sign a transaction.
    ///
    /// # Arguments
    /// * `signer` - Signs the header; also recorded as the batcher
    /// * `payload` - Encoded family payload
    /// * `inputs` - State addresses the transaction reads
    /// * `outputs` - State addresses the transaction writes
    pub fn transaction(
        &self,
        signer: &Signer,
        payload: Vec<u8>,
        inputs: Vec<String>,
        outputs: Vec<String>,
    ) -> Transaction {
        let signer_public_key = signer.public_key_hex();

        let header = TransactionHeader {
            batcher_public_key: signer_public_key.clone(),
            dependencies: Vec::new(),
            family_name: self.family_name.clone(),
            family_version: self.family_version.clone(),
            inputs,
            nonce: hex::encode(rand::random::<[u8; 16]>()),
            outputs,
            payload_sha512: payload_digest(&payload),
            signer_public_key,
        };
        let header_bytes = header.encode_to_vec();
        let header_signature = signer.sign(&header_bytes);

        tracing::trace!(
            transaction_id = %header_signature,
            family = %self.family_name,
            "Transaction signed"
        );

        Transaction {
            header: header_bytes,
            header_signature,
            payload,
        }
    }

    /// Build and sign a batch around already-signed transactions.
    pub fn batch(&self, signer: &Signer, transactions: Vec<Transaction>) -> Batch {
        let header = BatchHeader {
            signer_public_key: signer.public_key_hex(),
            transaction_ids: transactions
                .iter()
                .map(|txn| txn.header_signature.clone())
                .collect(),
        };
        let header_bytes = header.encode_to_vec();
        let header_signature = signer.sign(&header_bytes);

        tracing::debug!(
            batch_id = %header_signature,
            transactions = transactions.len(),
            "Batch signed"
        );

        Batch {
            header: header_bytes,
            header_signature,
            transactions,
            trace: false,
        }
    }

    /// Single-transaction batch, the common case.
    pub fn single(
        &self,
        signer: &Signer,
        payload: Vec<u8>,
        inputs: Vec<String>,
        outputs: Vec<String>,
    ) -> Batch {
        let txn = self.transaction(signer, payload, inputs, outputs);
        self.batch(signer, vec![txn])
    }
}

/// Wrap batches for submission.
pub fn batch_list(batches: Vec<Batch>) -> BatchList {
    BatchList { batches }
}

/// Hex SHA-512 of a payload, as carried in the transaction header.
pub fn payload_digest(payload: &[u8]) -> String {
    hex::encode(Sha512::digest(payload))
}
