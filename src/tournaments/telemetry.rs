use std::sync::atomic::{AtomicU64, Ordering};

use tracing::warn;

use super::provider::FailureReporter;

/// Default reporter: a warning in the log plus a running count that the
/// health endpoint exposes.
#[derive(Debug, Default)]
pub struct TracingReporter {
    failures: AtomicU64,
}

impl TracingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}

impl FailureReporter for TracingReporter {
    fn report_parse_failure(&self) {
        let total = self.failures.fetch_add(1, Ordering::Relaxed) + 1;
        warn!(total, "Skipped a malformed tournament row");
    }
}
