//! Availability polling.
//!
//! # Responsibilities
//! - Poll a URL until it answers with an expected status
//! - Sleep with linear backoff between attempts
//! - Give up after a bounded number of attempts

use std::time::Duration;
use tokio::time::sleep;

use crate::resilience::backoff::linear_backoff;
use crate::sawtooth::client::normalize_base_url;
use crate::sawtooth::types::{SawtoothError, SawtoothResult};

/// Wait until `url` answers with `status_code`.
///
/// Any response with the expected code counts, including error codes.
/// Connection failures and other codes are retried; there is no sleep after
/// the last attempt.
pub async fn wait_until_status(
    http: &reqwest::Client,
    url: &str,
    status_code: u16,
    tries: u32,
    step: Duration,
) -> SawtoothResult<()> {
    for attempt in 1..=tries {
        match http.get(url).send().await {
            Ok(response) if response.status().as_u16() == status_code => {
                tracing::debug!(url, attempt, "Endpoint available");
                return Ok(());
            }
            Ok(response) => {
                tracing::debug!(url, status = response.status().as_u16(), "Unexpected status");
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "Failed to read url");
            }
        }

        if attempt < tries {
            let delay = linear_backoff(attempt, step);
            tracing::debug!(delay_ms = delay.as_millis() as u64, "Retrying");
            sleep(delay).await;
        }
    }

    tracing::warn!(url, attempts = tries, "Endpoint did not become available");
    Err(SawtoothError::Unavailable {
        url: url.to_string(),
        attempts: tries,
    })
}

/// Wait until the REST API at `endpoint` serves `/blocks` with 200.
///
/// `endpoint` may be a bare `host:port`.
pub async fn wait_for_rest_api(
    http: &reqwest::Client,
    endpoint: &str,
    tries: u32,
    step: Duration,
) -> SawtoothResult<()> {
    let base = normalize_base_url(endpoint)?;
    wait_until_status(http, &format!("{}/blocks", base), 200, tries, step).await
}
