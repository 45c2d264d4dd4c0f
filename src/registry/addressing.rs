//! State addressing for the certificate registry family.
//!
//! ```text
//! address = namespace (6) + reserved "00" (2) + type prefix (2) + sha256(key)[..60]
//! ```

use sha2::{Digest, Sha256};

pub const FAMILY_NAME: &str = "certificate_registry";
pub const FAMILY_VERSION: &str = "0.1";

const PREFIX_SIZE: usize = 6;
const KEY_HASH_SIZE: usize = 60;
const RESERVED_SPACE: &str = "00";

/// Length of every address in this family.
pub const ADDRESS_LENGTH: usize = 70;

/// Record types stored by the family, each with its own address prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    Agent,
    Certificate,
    Organization,
    Standard,
    CertificateRequest,
}

impl RecordType {
    pub fn prefix(&self) -> &'static str {
        match self {
            RecordType::Agent => "00",
            RecordType::Certificate => "01",
            RecordType::Organization => "02",
            RecordType::Standard => "03",
            RecordType::CertificateRequest => "04",
        }
    }
}

fn hash(value: &str, num: usize) -> String {
    let digest = hex::encode(Sha256::digest(value.as_bytes()));
    digest[..num].to_string()
}

/// First 6 hex characters of sha256(family name).
pub fn family_namespace() -> String {
    hash(FAMILY_NAME, PREFIX_SIZE)
}

/// Prefix shared by every record of one type.
pub fn record_prefix(record_type: RecordType) -> String {
    format!("{}{}{}", family_namespace(), RESERVED_SPACE, record_type.prefix())
}

/// Full address of a record identified by `key`.
pub fn make_address(record_type: RecordType, key: &str) -> String {
    format!("{}{}", record_prefix(record_type), hash(key, KEY_HASH_SIZE))
}

pub fn agent_address_prefix() -> String {
    record_prefix(RecordType::Agent)
}

pub fn make_agent_address(public_key: &str) -> String {
    make_address(RecordType::Agent, public_key)
}

pub fn make_certificate_address(certificate_id: &str) -> String {
    make_address(RecordType::Certificate, certificate_id)
}

pub fn make_organization_address(organization_id: &str) -> String {
    make_address(RecordType::Organization, organization_id)
}

pub fn make_standard_address(standard_id: &str) -> String {
    make_address(RecordType::Standard, standard_id)
}

pub fn make_certificate_request_address(request_id: &str) -> String {
    make_address(RecordType::CertificateRequest, request_id)
}
