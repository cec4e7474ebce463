//! Error types for hosts-fs

use std::path::PathBuf;

/// Result type for hosts-fs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, writing or backing up hosts files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {format} settings at {path}: {message}")]
    ConfigParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Failed to serialize {format} settings for {path}: {message}")]
    ConfigSerialize {
        path: PathBuf,
        format: String,
        message: String,
    },

    #[error("Unsupported settings format: {extension}")]
    UnsupportedFormat { extension: String },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    #[error("{path} was modified since it was loaded; reload and try again")]
    Modified { path: PathBuf },

    #[error("Backup {path} already exists; use --force to overwrite it")]
    BackupExists { path: PathBuf },

    #[error("Backup {path} does not exist")]
    BackupNotFound { path: PathBuf },

    #[error(transparent)]
    Document(#[from] hosts_dom::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
