//! Human and JSON renderings of minification statistics.

use jsm_core::error::Result;
use jsm_core::MinificationStats;
use std::fmt::Write;

/// Output format for per-file statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

pub struct Report;

impl Report {
    /// Four-line block for one file.
    pub fn text(stats: &MinificationStats) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Processed {}:", stats.input_file);
        let _ = writeln!(out, "  Output: {}", stats.output_file);
        let _ = writeln!(
            out,
            "  Reduction: {:.2}% ({} → {} bytes)",
            stats.reduction, stats.original_size, stats.minified_size
        );
        let _ = writeln!(out, "  Process time: {:.2} ms", stats.process_time);
        out
    }

    /// Pretty JSON object for a single file.
    pub fn json_one(stats: &MinificationStats) -> Result<String> {
        Ok(serde_json::to_string_pretty(stats)?)
    }

    /// Pretty JSON array for a directory run.
    pub fn json_many(stats: &[MinificationStats]) -> Result<String> {
        Ok(serde_json::to_string_pretty(stats)?)
    }

    pub fn render_one(stats: &MinificationStats, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(Self::text(stats)),
            ReportFormat::Json => Self::json_one(stats),
        }
    }

    pub fn render_many(stats: &[MinificationStats], format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Text => Ok(stats.iter().map(Self::text).collect::<Vec<_>>().join("\n")),
            ReportFormat::Json => Self::json_many(stats),
        }
    }
}
