use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Statistics for one minified file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinificationStats {
    pub input_file: String,
    pub output_file: String,
    pub original_size: usize,
    pub minified_size: usize,
    #[serde(rename = "reduction_percentage")]
    pub reduction: f64,
    #[serde(rename = "process_time_ms")]
    pub process_time: f64,
}

impl MinificationStats {
    pub fn new(
        input_file: impl Into<String>,
        output_file: impl Into<String>,
        original_size: usize,
        minified_size: usize,
        elapsed: Duration,
    ) -> Self {
        Self {
            input_file: input_file.into(),
            output_file: output_file.into(),
            original_size,
            minified_size,
            reduction: reduction_pct(original_size, minified_size),
            process_time: elapsed.as_micros() as f64 / 1000.0,
        }
    }
}

/// Percentage of bytes removed. Empty inputs report 0.
pub fn reduction_pct(original: usize, minified: usize) -> f64 {
    if original == 0 {
        return 0.0;
    }
    (original as f64 - minified as f64) / original as f64 * 100.0
}

/// Totals over a directory run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub files: usize,
    pub failures: usize,
    pub original_bytes: usize,
    pub minified_bytes: usize,
}

impl BatchSummary {
    pub fn record(&mut self, stats: &MinificationStats) {
        self.files += 1;
        self.original_bytes += stats.original_size;
        self.minified_bytes += stats.minified_size;
    }

    pub fn record_failure(&mut self) {
        self.failures += 1;
    }

    pub fn reduction(&self) -> f64 {
        reduction_pct(self.original_bytes, self.minified_bytes)
    }
}
