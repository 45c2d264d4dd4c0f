//! Linear backoff.

use std::time::Duration;

/// Delay before retrying after failed attempt `attempt` (1-based): `attempt * step`.
pub fn linear_backoff(attempt: u32, step: Duration) -> Duration {
    step.saturating_mul(attempt)
}
