//! Statistics tracking for annotation parsing.
//!
//! Malformed rows are dropped before they reach the evaluation engine;
//! these counters record what was dropped and why.

use serde::{Deserialize, Serialize};

/// Counters collected while parsing a MOT annotation stream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseStats {
    /// Total number of lines seen.
    pub total_lines: usize,

    /// Number of lines that parsed into a detection record.
    pub parsed: usize,

    /// Number of blank or comment lines.
    pub comments: usize,

    /// Number of lines skipped for having too few fields.
    pub skipped_short: usize,

    /// Number of lines skipped for non-numeric fields.
    pub skipped_malformed: usize,
}

impl ParseStats {
    /// Create a new `ParseStats` with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of dropped data lines.
    pub fn total_skipped(&self) -> usize {
        self.skipped_short + self.skipped_malformed
    }

    /// Get a formatted one-line summary of the statistics.
    pub fn summary_string(&self) -> String {
        format!(
            "ParseStats {{ lines: {}, parsed: {}, comments: {}, skipped: {} }}",
            self.total_lines,
            self.parsed,
            self.comments,
            self.total_skipped()
        )
    }
}
