//! # Tollgate Telemetry
//!
//! Logging, metrics and status reporting for Tollgate ticket services.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tollgate_telemetry::{init_telemetry, TelemetryConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = TelemetryConfig::from_env();
//!     let _guard = init_telemetry(&config)?;
//!     // Logs and metrics are now being collected
//!     Ok(())
//! }
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `TG_SERVICE_NAME` | `tollgate` | Service name in log lines |
//! | `TG_LOG_LEVEL` | `info` | Log level filter (`RUST_LOG` also honoured) |
//! | `TG_JSON_LOGS` | `false` | JSON log lines instead of pretty output |
//! | `TG_CONSOLE_OUTPUT` | `true` | Write log lines to stdout |
//! | `TG_METRICS_ENABLED` | `true` | Register Prometheus metrics |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;
pub mod reporting;

pub use config::TelemetryConfig;
pub use logging::init_logging;
pub use metrics::{
    encode_metrics, register_metrics, HistogramTimer, MetricsHandle, KEY_CONTAINERS_LOADED,
    TICKETS_ISSUED, TICKET_VERIFICATIONS, TICKET_VERIFICATION_DURATION,
};
pub use reporting::{Reporter, ReporterRegistry};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The subscriber could not be installed
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// A metric could not be registered or encoded
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),
}

/// Initialize logging and, when enabled, metrics.
///
/// Returns a guard that should be held for the lifetime of the application.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    // Metrics first so early log lines can already be counted against them
    let metrics = if config.metrics_enabled {
        Some(register_metrics()?)
    } else {
        None
    };

    init_logging(config)?;

    Ok(TelemetryGuard { _metrics: metrics })
}

/// Guard that keeps telemetry active.
pub struct TelemetryGuard {
    _metrics: Option<MetricsHandle>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        tracing::info!("Shutting down telemetry...");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_service() {
        let config = TelemetryConfig::default();
        assert_eq!(config.service_name, "tollgate");
    }
}
