//! Minification pipeline — runs the stages in order over the whole buffer.

use crate::{stage1_license, stage2_comments, stage3_whitespace, stage4_punctuation, stage5_rename};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Engine options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyOptions {
    pub preserve_license: bool,
    pub shorten_vars: bool,
}

/// Pipeline stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    License,
    Comments,
    Whitespace,
    Punctuation,
    Rename,
    Reinsert,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::License => "license",
            Self::Comments => "comments",
            Self::Whitespace => "whitespace",
            Self::Punctuation => "punctuation",
            Self::Rename => "rename",
            Self::Reinsert => "reinsert",
        }
    }
}

/// Minification output with statistics.
#[derive(Debug, Clone)]
pub struct MinifyResult {
    pub output: String,
    pub original_len: usize,
    pub minified_len: usize,
    pub reduction_pct: f64,
    pub license_preserved: bool,
    pub stages_applied: Vec<Stage>,
}

impl MinifyResult {
    pub fn ratio(&self) -> f64 {
        if self.original_len == 0 { return 1.0; }
        self.minified_len as f64 / self.original_len as f64
    }
}

/// The JavaScript minifier. Holds only options, so one instance can serve many
/// concurrent calls.
#[derive(Debug, Clone, Copy, Default)]
pub struct Minifier {
    pub options: MinifyOptions,
}

impl Minifier {
    pub fn new(options: MinifyOptions) -> Self {
        Self { options }
    }

    pub fn with_flags(preserve_license: bool, shorten_vars: bool) -> Self {
        Self::new(MinifyOptions { preserve_license, shorten_vars })
    }

    /// Minify `src`. Never fails; malformed input yields best-effort output.
    pub fn minify(&self, src: &str) -> String {
        self.execute(src, None).output
    }

    /// Minify and report sizes and the stages that ran.
    pub fn run(&self, src: &str) -> MinifyResult {
        self.execute(src, None)
    }

    /// Minify while writing each stage's name and output buffer to `sink`.
    /// Sink write errors are ignored.
    pub fn minify_with_sink(&self, src: &str, sink: &mut dyn Write) -> String {
        self.execute(src, Some(sink)).output
    }

    fn execute(&self, src: &str, mut sink: Option<&mut dyn Write>) -> MinifyResult {
        let original_len = src.len();
        let mut stages = Vec::new();
        let mut record = |stage: Stage, buffer: &str, stages: &mut Vec<Stage>| {
            tracing::trace!(stage = stage.as_str(), len = buffer.len(), "stage done");
            if let Some(out) = sink.as_mut() {
                let _ = writeln!(out, "[{}] {} bytes", stage.as_str(), buffer.len());
                let _ = writeln!(out, "{buffer}");
            }
            stages.push(stage);
        };

        // Stage 1: license block (only when requested)
        let (license, mut result) = if self.options.preserve_license {
            let (license, rest) = stage1_license::extract(src);
            record(Stage::License, &rest, &mut stages);
            (license, rest)
        } else {
            (None, src.to_string())
        };

        // Stages 2-4 always run
        result = stage2_comments::strip(&result);
        record(Stage::Comments, &result, &mut stages);

        result = stage3_whitespace::normalize(&result);
        record(Stage::Whitespace, &result, &mut stages);

        result = stage4_punctuation::compact(&result);
        record(Stage::Punctuation, &result, &mut stages);

        // Stage 5: renaming (optional)
        if self.options.shorten_vars {
            let (renamed, table) = stage5_rename::rename_with_table(&result);
            tracing::trace!(bindings = ?table.entries(), "renamed bindings");
            result = renamed;
            record(Stage::Rename, &result, &mut stages);
        }

        // Stage 6: put the license back in front
        let license_preserved = license.is_some();
        if license_preserved {
            result = stage1_license::reinsert(license.as_deref(), result);
            record(Stage::Reinsert, &result, &mut stages);
        }

        let minified_len = result.len();
        let reduction = if original_len > 0 {
            (original_len as f64 - minified_len as f64) / original_len as f64 * 100.0
        } else {
            0.0
        };
        tracing::debug!(original_len, minified_len, "minified");

        MinifyResult {
            output: result,
            original_len,
            minified_len,
            reduction_pct: reduction,
            license_preserved,
            stages_applied: stages,
        }
    }
}

/// Minify with the given options.
pub fn minify(src: &str, options: MinifyOptions) -> String {
    Minifier::new(options).minify(src)
}
