use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failures surfaced by the scanner and the settings store.
///
/// Neither variant is retried. A failure anywhere in a walk aborts the
/// whole scan, so callers never see a partial result.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("I/O error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid settings in {path}: {message}")]
    Config { path: PathBuf, message: String },
}

impl ScanError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        ScanError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn config(path: &Path, message: impl Into<String>) -> Self {
        ScanError::Config {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

pub type ScanResult<T> = std::result::Result<T, ScanError>;
