use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MinifyError {
    #[error("Input not found: {}", path.display())]
    InputNotFound { path: PathBuf },
    #[error("Not a JavaScript file: {}", path.display())]
    NotAJsFile { path: PathBuf },
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MinifyError {
    /// Wrap an IO error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, MinifyError>;
