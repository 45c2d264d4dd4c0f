//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the REST API URL and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ClientConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;

use crate::config::schema::ClientConfig;
use crate::sawtooth::client::normalize_base_url;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("rest_api.url is invalid: {0}")]
    InvalidUrl(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ClientConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = normalize_base_url(&config.rest_api.url) {
        errors.push(ValidationError::InvalidUrl(e.to_string()));
    }
    if config.rest_api.request_timeout_secs == 0 {
        errors.push(ValidationError::Zero("rest_api.request_timeout_secs"));
    }
    if config.polling.availability_tries == 0 {
        errors.push(ValidationError::Zero("polling.availability_tries"));
    }
    if config.family.name.trim().is_empty() {
        errors.push(ValidationError::Empty("family.name"));
    }
    if config.family.version.trim().is_empty() {
        errors.push(ValidationError::Empty("family.version"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
