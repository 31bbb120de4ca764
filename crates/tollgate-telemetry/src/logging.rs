//! Subscriber setup and structured log helpers.
//!
//! Log lines carry consistent fields so a collector can index them:
//! - `timestamp`, `level`, `target`: added by the fmt layer
//! - `issuer`, `jti`: added by `log_ticket_event!` for ticket-scoped events
//! - Additional context fields

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::{TelemetryConfig, TelemetryError};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured level when both are set. Fails if a
/// global subscriber is already installed.
pub fn init_logging(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    if !config.console_output {
        tracing_subscriber::registry()
            .with(env_filter)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else if config.json_logs {
        // JSON output for containers/production
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        // Pretty output for development
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        level = %config.log_level,
        "Logging initialized"
    );

    Ok(())
}

/// Log a ticket-scoped event with the issuer and ticket id attached.
///
/// # Example
///
/// ```rust,ignore
/// log_ticket_event!(info, "Ticket issued", payload.issuer, payload.id, expires = payload.expiration_time);
/// ```
#[macro_export]
macro_rules! log_ticket_event {
    ($level:ident, $msg:expr, $issuer:expr, $jti:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            issuer = %$issuer,
            jti = %$jti,
            $($($field)*,)?
            $msg
        )
    };
}

/// Log a key-loading event with the key source attached.
#[macro_export]
macro_rules! log_key_event {
    ($level:ident, $msg:expr, $source:expr $(, $($field:tt)*)?) => {
        tracing::$level!(
            source = %$source,
            $($($field)*,)?
            $msg
        )
    };
}
