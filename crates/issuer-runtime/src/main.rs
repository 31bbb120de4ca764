//! # Tollgate Issuer
//!
//! Loads the configured keys, issues a ticket for the configured tier and
//! prints it with its price.
//!
//! ## Usage
//!
//! ```bash
//! TG_PRIVATE_KEY_PATH=~/.ssh/id_ed25519 TG_TOKEN_TIER=medium tollgate-issuer
//! ```

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use issuer_runtime::{IssuerConfig, IssuerRuntime};
use shared_types::UnixSeconds;
use tollgate_telemetry::{encode_metrics, init_telemetry, TelemetryConfig};
use tracing::{debug, info, warn};

fn main() -> Result<()> {
    let _telemetry = init_telemetry(&TelemetryConfig::for_service("issuer"))
        .context("Failed to initialize telemetry")?;

    info!("===========================================");
    info!("  Tollgate Issuer v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");

    let config = IssuerConfig::from_env().context("Invalid issuer configuration")?;
    info!(
        tier = %config.tier,
        validity_days = config.validity_days,
        service_url = %config.service_url,
        "Configuration loaded"
    );

    let runtime = IssuerRuntime::new(config).context("Failed to start issuer")?;
    let ticket = runtime
        .issue_tier_ticket(unix_now()?)
        .context("Failed to issue ticket")?;

    println!("{}", ticket.token);
    println!(
        "tier {} costs {:.6} per month, {:.6} for this ticket",
        ticket.quote.tier, ticket.quote.monthly_price, ticket.price
    );

    runtime.report();
    match encode_metrics() {
        Ok(text) => debug!(metrics = %text, "Metrics snapshot"),
        Err(e) => warn!(error = %e, "Metrics unavailable"),
    }
    Ok(())
}

fn unix_now() -> Result<UnixSeconds> {
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("System clock is before 1970")?
        .as_secs();
    UnixSeconds::try_from(secs).context("System clock is past 2106")
}
