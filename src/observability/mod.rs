//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters)
//! ```

pub mod logging;
pub mod metrics;

pub use logging::init_logging;
