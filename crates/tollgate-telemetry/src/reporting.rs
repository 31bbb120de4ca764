//! Periodic status reporters.
//!
//! Components that want to show up in status output implement `Reporter` and
//! are registered explicitly with a `ReporterRegistry` by the entry point.

use std::time::Duration;

/// A source of human-readable status lines.
pub trait Reporter: Send + Sync {
    /// Short unique name, used as the `reporter` log field.
    fn name(&self) -> &str;

    /// Status lines covering the last `elapsed` interval.
    fn report(&self, elapsed: Duration) -> Vec<String>;
}

/// Explicitly registered reporters, in registration order.
#[derive(Default)]
pub struct ReporterRegistry {
    reporters: Vec<Box<dyn Reporter>>,
}

impl ReporterRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a reporter. Returns `false` if the name is already taken.
    pub fn register(&mut self, reporter: Box<dyn Reporter>) -> bool {
        if self.reporters.iter().any(|r| r.name() == reporter.name()) {
            return false;
        }
        self.reporters.push(reporter);
        true
    }

    /// Registered names, in order.
    pub fn names(&self) -> Vec<&str> {
        self.reporters.iter().map(|r| r.name()).collect()
    }

    /// Number of registered reporters.
    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    /// Whether nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }

    /// Collect every reporter's lines, keyed by reporter name.
    pub fn report_all(&self, elapsed: Duration) -> Vec<(String, Vec<String>)> {
        self.reporters
            .iter()
            .map(|r| (r.name().to_string(), r.report(elapsed)))
            .collect()
    }

    /// Emit every line as an `info` event.
    pub fn log_all(&self, elapsed: Duration) {
        for (name, lines) in self.report_all(elapsed) {
            for line in lines {
                tracing::info!(reporter = %name, "{}", line);
            }
        }
    }
}

impl std::fmt::Debug for ReporterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReporterRegistry")
            .field("reporters", &self.names())
            .finish()
    }
}
