//! Polling watch mode: re-minify files whose modification time advanced.

use crate::fs;
use crate::runner::Runner;
use jsm_core::error::{MinifyError, Result};
use jsm_core::MinificationStats;
use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::time::MissedTickBehavior;

/// Watches a directory (or a single file) by polling mtimes.
#[derive(Debug)]
pub struct Watcher {
    runner: Runner,
    target: PathBuf,
    output: Option<PathBuf>,
    interval: Duration,
    seen: HashMap<PathBuf, SystemTime>,
}

impl Watcher {
    pub fn new(runner: Runner, target: impl Into<PathBuf>, interval: Duration) -> Self {
        Self {
            runner,
            target: target.into(),
            output: None,
            interval,
            seen: HashMap::new(),
        }
    }

    /// Explicit output path, used only when the target is a single file.
    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    #[cfg(test)]
    fn tracked(&self) -> usize {
        self.seen.len()
    }

    async fn candidates(&self) -> Result<Vec<PathBuf>> {
        let meta = tokio::fs::metadata(&self.target)
            .await
            .map_err(|_| MinifyError::InputNotFound { path: self.target.clone() })?;
        if meta.is_dir() {
            fs::list_js_files(&self.target, self.runner.min_suffix()).await
        } else {
            Ok(vec![self.target.clone()])
        }
    }

    fn output_for(&self, file: &Path) -> Option<PathBuf> {
        if file == self.target {
            self.output.clone()
        } else {
            None
        }
    }

    /// One scan. Files are (re)processed when new or when their mtime differs from the
    /// last scan; the mtime is recorded even if processing fails so a broken file is
    /// retried only after it changes again.
    pub async fn poll_once(&mut self) -> Result<Vec<MinificationStats>> {
        let mut processed = Vec::new();
        for file in self.candidates().await? {
            let modified = match tokio::fs::metadata(&file).await.and_then(|m| m.modified()) {
                Ok(t) => t,
                Err(e) => {
                    tracing::warn!(file = %file.display(), error = %e, "cannot stat file");
                    continue;
                }
            };
            if self.seen.get(&file) == Some(&modified) {
                continue;
            }
            self.seen.insert(file.clone(), modified);

            let output = self.output_for(&file);
            match self.runner.process_file(&file, output.as_deref()).await {
                Ok(stats) => {
                    tracing::info!(
                        "Reduced by {:.2}% ({} → {} bytes)",
                        stats.reduction,
                        stats.original_size,
                        stats.minified_size
                    );
                    processed.push(stats);
                }
                Err(e) => tracing::warn!(file = %file.display(), error = %e, "minify failed"),
            }
        }
        Ok(processed)
    }

    /// Poll until `shutdown` resolves. Scan errors are logged and polling continues.
    pub async fn run<F>(&mut self, shutdown: F) -> Result<()>
    where
        F: Future<Output = ()>,
    {
        tracing::info!(
            path = %self.target.display(),
            interval_ms = self.interval.as_millis() as u64,
            "watching for changes"
        );
        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    tracing::info!("watch stopped");
                    return Ok(());
                }
                _ = ticker.tick() => {
                    if let Err(e) = self.poll_once().await {
                        tracing::warn!(error = %e, "watch scan failed");
                    }
                }
            }
        }
    }
}
