//! Key management and transaction signing.
//!
//! # Security
//! - Private keys come from generation, the environment, or a key file
//! - Keys are never logged or serialized; `Debug` shows the public key only

use secp256k1::ecdsa::Signature;
use secp256k1::{All, Message, PublicKey, Secp256k1, SecretKey};
use sha2::{Digest, Sha256};
use std::path::Path;

use crate::sawtooth::types::SigningError;

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "CONSENSOURCE_PRIVATE_KEY";

/// secp256k1 key pair used to sign transaction and batch headers.
#[derive(Clone)]
pub struct Signer {
    secp: Secp256k1<All>,
    secret: SecretKey,
    public: PublicKey,
}

impl Signer {
    /// Generate a new random key pair.
    pub fn generate() -> Self {
        let secp = Secp256k1::new();
        let (secret, public) = secp.generate_keypair(&mut secp256k1::rand::thread_rng());

        tracing::debug!(public_key = %hex::encode(public.serialize()), "Generated signing key");

        Self {
            secp,
            secret,
            public,
        }
    }

    /// Create a signer from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - 32-byte key as hex (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> Result<Self, SigningError> {
        let trimmed = private_key_hex.trim();
        let key_hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let bytes = hex::decode(key_hex)
            .map_err(|e| SigningError::InvalidPrivateKey(format!("not hex: {}", e)))?;
        let secret = SecretKey::from_slice(&bytes)
            .map_err(|e| SigningError::InvalidPrivateKey(e.to_string()))?;

        let secp = Secp256k1::new();
        let public = PublicKey::from_secret_key(&secp, &secret);

        Ok(Self {
            secp,
            secret,
            public,
        })
    }

    /// Load the private key from `CONSENSOURCE_PRIVATE_KEY`.
    pub fn from_env() -> Result<Self, SigningError> {
        let private_key = std::env::var(PRIVATE_KEY_ENV_VAR).map_err(|_| {
            SigningError::KeyUnavailable(format!(
                "Environment variable {} not set",
                PRIVATE_KEY_ENV_VAR
            ))
        })?;

        Self::from_private_key(&private_key)
    }

    /// Load the private key from a file holding the hex key.
    pub fn from_file(path: &Path) -> Result<Self, SigningError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SigningError::KeyUnavailable(format!("{}: {}", path.display(), e))
        })?;

        Self::from_private_key(&content)
    }

    /// Compressed public key as lowercase hex.
    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public.serialize())
    }

    /// Private key as lowercase hex. Only for writing key files.
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret.secret_bytes())
    }

    /// Sign a message: SHA-256, then ECDSA, as the hex compact signature.
    pub fn sign(&self, message: &[u8]) -> String {
        let digest: [u8; 32] = Sha256::digest(message).into();
        let msg = Message::from_digest(digest);
        let signature = self.secp.sign_ecdsa(&msg, &self.secret);
        hex::encode(signature.serialize_compact())
    }
}

impl std::fmt::Debug for Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signer")
            .field("public_key", &self.public_key_hex())
            .finish()
    }
}

/// Check a hex compact signature over `message` against a hex public key.
pub fn verify(
    public_key_hex: &str,
    message: &[u8],
    signature_hex: &str,
) -> Result<bool, SigningError> {
    let key_bytes = hex::decode(public_key_hex)
        .map_err(|e| SigningError::InvalidPublicKey(e.to_string()))?;
    let public = PublicKey::from_slice(&key_bytes)
        .map_err(|e| SigningError::InvalidPublicKey(e.to_string()))?;

    let sig_bytes = hex::decode(signature_hex)
        .map_err(|e| SigningError::InvalidSignature(e.to_string()))?;
    let signature = Signature::from_compact(&sig_bytes)
        .map_err(|e| SigningError::InvalidSignature(e.to_string()))?;

    let digest: [u8; 32] = Sha256::digest(message).into();
    let msg = Message::from_digest(digest);

    let secp = Secp256k1::verification_only();
    Ok(secp.verify_ecdsa(&msg, &signature, &public).is_ok())
}
