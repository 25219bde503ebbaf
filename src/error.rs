use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, FixfetchError>;

#[derive(Error, Debug)]
pub enum FixfetchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: '{url}'")]
    InvalidUrl { url: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("Unsupported archive format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("Archive member escapes destination: {entry}")]
    UnsafePath { entry: PathBuf },

    #[error("Corrupt archive {path}: {message}")]
    CorruptArchive { path: PathBuf, message: String },
}

impl FixfetchError {
    pub fn network<S: Into<String>>(url: &str, message: S) -> Self {
        FixfetchError::Network {
            url: url.to_string(),
            message: message.into(),
        }
    }
}
