//! Prometheus metrics for ticket issuance and verification.
//!
//! All metrics follow the naming convention: `tg_<subject>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

use crate::TelemetryError;

lazy_static! {
    /// Global metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    // =========================================================================
    // ISSUANCE METRICS
    // =========================================================================

    /// Total tickets signed
    pub static ref TICKETS_ISSUED: Counter = Counter::new(
        "tg_tickets_issued_total",
        "Total number of tickets signed"
    ).expect("metric creation failed");

    // =========================================================================
    // VERIFICATION METRICS
    // =========================================================================

    /// Ticket verifications by outcome
    pub static ref TICKET_VERIFICATIONS: CounterVec = CounterVec::new(
        Opts::new("tg_ticket_verifications_total", "Total ticket verifications"),
        &["result"]  // result: valid/malformed/bad_signature/unknown_issuer
    ).expect("metric creation failed");

    /// Ticket verification duration
    pub static ref TICKET_VERIFICATION_DURATION: Histogram = Histogram::with_opts(
        prometheus::HistogramOpts::new(
            "tg_ticket_verification_duration_seconds",
            "Time spent verifying tickets"
        ).buckets(exponential_buckets(0.00001, 2.0, 15).unwrap())
    ).expect("metric creation failed");

    // =========================================================================
    // KEY METRICS
    // =========================================================================

    /// Key containers and key lists loaded
    pub static ref KEY_CONTAINERS_LOADED: CounterVec = CounterVec::new(
        Opts::new("tg_key_containers_loaded_total", "Key sources loaded at startup"),
        &["kind"]  // kind: private/public/private_list/public_list
    ).expect("metric creation failed");
}

/// Handle to the registered metrics
pub struct MetricsHandle {
    _registry: Arc<Registry>,
}

/// Register all metrics with the global registry.
///
/// Registering twice is not an error.
pub fn register_metrics() -> Result<MetricsHandle, TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // Issuance
        Box::new(TICKETS_ISSUED.clone()),
        // Verification
        Box::new(TICKET_VERIFICATIONS.clone()),
        Box::new(TICKET_VERIFICATION_DURATION.clone()),
        // Keys
        Box::new(KEY_CONTAINERS_LOADED.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }

    Ok(MetricsHandle {
        _registry: Arc::new(REGISTRY.clone()),
    })
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
