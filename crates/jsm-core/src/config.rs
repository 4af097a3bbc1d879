use crate::error::{MinifyError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Minifier settings shared by the engine options and the file runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyConfig {
    /// Keep a leading `/*! ... */` block in the output.
    pub preserve_license: bool,
    /// Rename `var`/`let`/`const` bindings to short names.
    pub shorten_vars: bool,
    /// Maximum files minified concurrently in directory mode.
    pub jobs: usize,
    /// Poll period for watch mode.
    pub watch_interval_ms: u64,
    /// Inserted between file stem and extension for default output names.
    pub min_suffix: String,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            preserve_license: false,
            shorten_vars: false,
            jobs: std::thread::available_parallelism().map_or(4, |n| n.get()),
            watch_interval_ms: 1000,
            min_suffix: ".min".into(),
        }
    }
}

impl MinifyConfig {
    /// Load a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| MinifyError::io(path, e))?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.jobs == 0 {
            return Err(MinifyError::Config("jobs must be at least 1".into()));
        }
        if self.watch_interval_ms == 0 {
            return Err(MinifyError::Config("watch_interval_ms must be positive".into()));
        }
        if !self.min_suffix.starts_with('.') || self.min_suffix.len() < 2 {
            return Err(MinifyError::Config(format!(
                "min_suffix must look like \".min\", got {:?}",
                self.min_suffix
            )));
        }
        Ok(())
    }
}
