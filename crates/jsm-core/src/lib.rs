//! Shared types for jsmin: configuration, error taxonomy and per-file statistics.

pub mod config;
pub mod error;
pub mod types;

pub use config::MinifyConfig;
pub use error::{MinifyError, Result};
pub use types::{BatchSummary, MinificationStats};
