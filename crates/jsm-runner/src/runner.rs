//! Per-file processing and bounded parallel directory runs.

use crate::fs;
use jsm_core::error::{MinifyError, Result};
use jsm_core::{BatchSummary, MinificationStats, MinifyConfig};
use jsm_engine::{Minifier, MinifyOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, Semaphore};

/// Engine options carried by a config.
pub fn options_from(config: &MinifyConfig) -> MinifyOptions {
    MinifyOptions {
        preserve_license: config.preserve_license,
        shorten_vars: config.shorten_vars,
    }
}

/// Result of a directory run.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Stats in completion order.
    pub stats: Vec<MinificationStats>,
    pub failed: Vec<(PathBuf, String)>,
    pub summary: BatchSummary,
}

/// Reads, minifies and writes files.
#[derive(Debug, Clone)]
pub struct Runner {
    minifier: Minifier,
    min_suffix: String,
    jobs: usize,
    trace_stages: bool,
}

impl Runner {
    pub fn new(config: &MinifyConfig) -> Self {
        Self {
            minifier: Minifier::new(options_from(config)),
            min_suffix: config.min_suffix.clone(),
            jobs: config.jobs.max(1),
            trace_stages: false,
        }
    }

    /// Dump every stage's buffer at DEBUG level.
    pub fn with_stage_trace(mut self, enabled: bool) -> Self {
        self.trace_stages = enabled;
        self
    }

    pub fn min_suffix(&self) -> &str {
        &self.min_suffix
    }

    pub fn output_path_for(&self, input: &Path) -> PathBuf {
        fs::default_output_path(input, &self.min_suffix)
    }

    fn minify(&self, input: &Path, src: &str) -> String {
        if !self.trace_stages {
            return self.minifier.minify(src);
        }
        let mut sink: Vec<u8> = Vec::new();
        let out = self.minifier.minify_with_sink(src, &mut sink);
        tracing::debug!(file = %input.display(), "stage trace:\n{}", String::from_utf8_lossy(&sink));
        out
    }

    /// Minify one file. Output defaults to `<stem>.min<ext>` beside the input.
    pub async fn process_file(&self, input: &Path, output: Option<&Path>) -> Result<MinificationStats> {
        let start = Instant::now();
        let content = fs::read_source(input).await?;
        let minified = self.minify(input, &content);

        let output_path = match output {
            Some(p) => p.to_path_buf(),
            None => self.output_path_for(input),
        };
        fs::write_output(&output_path, &minified).await?;

        let stats = MinificationStats::new(
            input.display().to_string(),
            output_path.display().to_string(),
            content.len(),
            minified.len(),
            start.elapsed(),
        );
        tracing::info!(
            input = %stats.input_file,
            output = %stats.output_file,
            reduction = format!("{:.2}%", stats.reduction),
            "minified"
        );
        Ok(stats)
    }

    /// Single-file entry point: the input must exist and be a regular file.
    pub async fn process_single(&self, input: &Path, output: Option<&Path>) -> Result<MinificationStats> {
        let meta = tokio::fs::metadata(input)
            .await
            .map_err(|_| MinifyError::InputNotFound { path: input.to_path_buf() })?;
        if !meta.is_file() {
            return Err(MinifyError::NotAJsFile { path: input.to_path_buf() });
        }
        self.process_file(input, output).await
    }

    /// Minify every `*.js` file in `dir` with at most `jobs` files in flight.
    ///
    /// A file that fails is logged and skipped; only a failure to list the directory is
    /// returned as an error.
    pub async fn process_directory(&self, dir: &Path) -> Result<BatchOutcome> {
        let files = fs::list_js_files(dir, &self.min_suffix).await?;
        tracing::info!(dir = %dir.display(), files = files.len(), jobs = self.jobs, "processing directory");

        let permits = Arc::new(Semaphore::new(self.jobs));
        let (tx, mut rx) = mpsc::channel(files.len().max(1));

        for file in files {
            let runner = self.clone();
            let permits = permits.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = match permits.acquire_owned().await {
                    Ok(_permit) => runner.process_file(&file, None).await,
                    Err(e) => Err(MinifyError::Other(e.into())),
                };
                let _ = tx.send((file, result)).await;
            });
        }
        drop(tx);

        let mut outcome = BatchOutcome::default();
        while let Some((file, result)) = rx.recv().await {
            match result {
                Ok(stats) => {
                    outcome.summary.record(&stats);
                    outcome.stats.push(stats);
                }
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "skipping file");
                    outcome.summary.record_failure();
                    outcome.failed.push((file, e.to_string()));
                }
            }
        }
        tracing::info!(
            files = outcome.summary.files,
            failures = outcome.summary.failures,
            reduction = format!("{:.2}%", outcome.summary.reduction()),
            "directory done"
        );
        Ok(outcome)
    }
}
