//! Load summaries

use std::fmt;
use std::time::Duration;

/// One record that could not be loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    /// Zero-based position of the record in the input
    pub index: usize,
    /// Pattern name, when the record carried a readable one
    pub name: Option<String>,
    /// Human-readable cause
    pub reason: String,
}

impl fmt::Display for LoadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "record {} ('{}'): {}", self.index, name, self.reason),
            None => write!(f, "record {}: {}", self.index, self.reason),
        }
    }
}

/// Summary of one loader run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Records read from the input
    pub attempted: usize,
    /// Records added to the repository
    pub succeeded: usize,
    /// Records skipped
    pub failed: usize,
    /// Wall-clock time of the run
    pub duration: Duration,
    /// Why each skipped record was skipped, in input order
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    /// Percentage of attempted records that loaded (0.0 when none were attempted)
    pub fn success_rate(&self) -> f64 {
        if self.attempted == 0 {
            return 0.0;
        }
        self.succeeded as f64 / self.attempted as f64 * 100.0
    }

    /// Whether every attempted record loaded
    pub fn is_complete(&self) -> bool {
        self.failed == 0
    }

    /// Elapsed time in milliseconds
    pub fn duration_ms(&self) -> f64 {
        self.duration.as_secs_f64() * 1000.0
    }

    pub(crate) fn record_success(&mut self) {
        self.attempted += 1;
        self.succeeded += 1;
    }

    pub(crate) fn record_failure(&mut self, failure: LoadFailure) {
        self.attempted += 1;
        self.failed += 1;
        self.failures.push(failure);
    }
}

impl fmt::Display for LoadReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} patterns loaded, {} failed in {:.2}ms ({:.1}%)",
            self.succeeded,
            self.attempted,
            self.failed,
            self.duration_ms(),
            self.success_rate()
        )
    }
}
