//! Ledger REST API client with timeout and error handling.
//!
//! # Responsibilities
//! - Submit batch lists
//! - Query batch commit status (optionally waiting server-side)
//! - Read state by address or address prefix, following paging links
//! - Provide a liveness check against `/blocks`

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use prost::Message;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::observability::metrics;
use crate::sawtooth::protos::BatchList;
use crate::sawtooth::types::{
    BatchStatus, Block, DataEnvelope, ErrorEnvelope, RawStateEntry, RestApiConfig, SawtoothError,
    SawtoothResult, StateEntry, SubmitResponse,
};

/// Turn `host:port` or a full URL into a base URL without trailing slash.
pub fn normalize_base_url(endpoint: &str) -> SawtoothResult<String> {
    let trimmed = endpoint.trim();
    let candidate = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };

    let parsed = url::Url::parse(&candidate).map_err(|e| SawtoothError::InvalidUrl {
        url: endpoint.to_string(),
        reason: e.to_string(),
    })?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(SawtoothError::InvalidUrl {
            url: endpoint.to_string(),
            reason: "missing host".to_string(),
        });
    }

    Ok(candidate.trim_end_matches('/').to_string())
}

/// REST API client for a ledger node.
#[derive(Clone)]
pub struct RestClient {
    http: reqwest::Client,
    base_url: String,
    timeout_duration: Duration,
}

impl RestClient {
    /// Create a new REST client.
    ///
    /// No request is made; use [`RestClient::is_available`] or
    /// `resilience::wait_for_rest_api` to check the node.
    pub fn new(config: &RestApiConfig) -> SawtoothResult<Self> {
        let base_url = normalize_base_url(&config.url)?;
        let timeout_duration = Duration::from_secs(config.request_timeout_secs);
        let http = reqwest::Client::builder()
            .timeout(timeout_duration)
            .build()?;

        tracing::debug!(base_url = %base_url, timeout_secs = config.request_timeout_secs, "REST client initialized");

        Ok(Self {
            http,
            base_url,
            timeout_duration,
        })
    }

    /// Base URL requests are made against.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Underlying HTTP client, shared with the availability poller.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Submit a batch list. Returns the status link the node hands back.
    pub async fn send_batches(&self, batch_list: &BatchList) -> SawtoothResult<String> {
        let url = format!("{}/batches", self.base_url);
        let result = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/octet-stream")
            .body(batch_list.encode_to_vec())
            .send()
            .await;
        let response = self.check("batches", result).await?;

        let submitted: SubmitResponse = decode_json(response).await?;
        for batch in &batch_list.batches {
            tracing::info!(batch_id = %batch.header_signature, "Batch submitted");
        }
        metrics::record_batches_submitted(batch_list.batches.len());
        Ok(submitted.link)
    }

    /// Fetch commit status for batches.
    ///
    /// # Arguments
    /// * `ids` - Batch ids (header signatures)
    /// * `wait` - Seconds the node may wait for a final status before answering
    pub async fn get_statuses(
        &self,
        ids: &[String],
        wait: Option<u64>,
    ) -> SawtoothResult<Vec<BatchStatus>> {
        // Batch ids are hex, so they go into the query string as-is.
        let mut url = format!("{}/batch_statuses?id={}", self.base_url, ids.join(","));
        if let Some(wait) = wait {
            url.push_str(&format!("&wait={}", wait));
        }

        // The node may hold the request for `wait` seconds on top of the usual latency.
        let timeout = self.timeout_duration + Duration::from_secs(wait.unwrap_or(0));
        let result = self
            .http
            .get(&url)
            .timeout(timeout)
            .send()
            .await;
        let response = self.check("batch_statuses", result).await?;

        let envelope: DataEnvelope<Vec<BatchStatus>> = decode_json(response).await?;
        for status in &envelope.data {
            tracing::debug!(batch_id = %status.id, status = status.status.as_str(), "Batch status");
            metrics::record_batch_status(status.status);
        }
        Ok(envelope.data)
    }

    /// List state entries, optionally restricted to an address prefix.
    pub async fn list_state(&self, subtree: Option<&str>) -> SawtoothResult<Vec<StateEntry>> {
        let mut next = Some(match subtree {
            Some(prefix) => format!("{}/state?address={}", self.base_url, prefix),
            None => format!("{}/state", self.base_url),
        });
        let mut entries = Vec::new();

        while let Some(url) = next.take() {
            let result = self.http.get(&url).send().await;
            let response = self.check("state", result).await?;
            let envelope: DataEnvelope<Vec<RawStateEntry>> = decode_json(response).await?;

            for raw in envelope.data {
                entries.push(StateEntry {
                    data: decode_base64(&raw.data)?,
                    address: raw.address,
                });
            }
            next = envelope.paging.and_then(|p| p.next).filter(|n| !n.is_empty());
        }

        tracing::debug!(subtree = ?subtree, count = entries.len(), "State listed");
        Ok(entries)
    }

    /// Read the data at one address. `None` when nothing is stored there.
    pub async fn get_state(&self, address: &str) -> SawtoothResult<Option<Vec<u8>>> {
        let url = format!("{}/state/{}", self.base_url, address);
        let result = self.http.get(&url).send().await;

        if let Ok(response) = &result {
            if response.status() == StatusCode::NOT_FOUND {
                metrics::record_rest_request("state", true);
                return Ok(None);
            }
        }

        let response = self.check("state", result).await?;
        let envelope: DataEnvelope<String> = decode_json(response).await?;
        Ok(Some(decode_base64(&envelope.data)?))
    }

    /// List blocks, newest first.
    pub async fn list_blocks(&self) -> SawtoothResult<Vec<Block>> {
        let url = format!("{}/blocks", self.base_url);
        let result = self.http.get(&url).send().await;
        let response = self.check("blocks", result).await?;

        let envelope: DataEnvelope<Vec<Block>> = decode_json(response).await?;
        if let Some(link) = &envelope.link {
            tracing::trace!(link = %link, "Blocks listed");
        }
        Ok(envelope.data)
    }

    /// Check if the node is reachable and serving `/blocks`.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/blocks", self.base_url);
        match self.http.get(&url).send().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                tracing::debug!(error = %e, "REST API unreachable");
                false
            }
        }
    }

    /// Map transport failures and non-success statuses to errors.
    async fn check(
        &self,
        endpoint: &'static str,
        result: reqwest::Result<Response>,
    ) -> SawtoothResult<Response> {
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(endpoint, error = %e, "REST request failed");
                metrics::record_rest_request(endpoint, false);
                return Err(SawtoothError::Http(e));
            }
        };

        let status = response.status();
        if status.is_success() {
            metrics::record_rest_request(endpoint, true);
            return Ok(response);
        }

        metrics::record_rest_request(endpoint, false);
        let text = response.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<ErrorEnvelope>(&text) {
            Ok(envelope) => envelope
                .error
                .message
                .or(envelope.error.title)
                .unwrap_or_else(|| text.clone()),
            Err(_) => text,
        };

        tracing::warn!(endpoint, status = status.as_u16(), message = %message, "REST API error");
        Err(SawtoothError::Status {
            code: status.as_u16(),
            message,
        })
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> SawtoothResult<T> {
    let text = response.text().await?;
    serde_json::from_str(&text).map_err(|e| SawtoothError::Decode(format!("{}: {}", e, text)))
}

fn decode_base64(data: &str) -> SawtoothResult<Vec<u8>> {
    STANDARD
        .decode(data)
        .map_err(|e| SawtoothError::Decode(format!("invalid base64 state data: {}", e)))
}
