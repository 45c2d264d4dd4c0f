//! Client metrics.
//!
//! # Metrics
//! - `consensource_batches_submitted_total` (counter)
//! - `consensource_batch_status_total` (counter): observed statuses by `status`
//! - `consensource_rest_requests_total` (counter): by `endpoint` and `outcome`
//!
//! Recorded through the `metrics` facade; no exporter is installed here.

use crate::sawtooth::types::BatchStatusKind;

pub fn record_batches_submitted(count: usize) {
    metrics::counter!("consensource_batches_submitted_total").increment(count as u64);
}

pub fn record_batch_status(status: BatchStatusKind) {
    metrics::counter!("consensource_batch_status_total", "status" => status.as_str()).increment(1);
}

pub fn record_rest_request(endpoint: &'static str, success: bool) {
    let outcome = if success { "success" } else { "error" };
    metrics::counter!(
        "consensource_rest_requests_total",
        "endpoint" => endpoint,
        "outcome" => outcome
    )
    .increment(1);
}
