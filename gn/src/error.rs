//! Error types for a notification run

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a run
///
/// Every variant is fatal: the run stops and the watermark is left untouched,
/// so the next run reconsiders the same comments.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Failed to read watermark from {path}: {reason}")]
    StoreRead { path: PathBuf, reason: String },

    #[error("Failed to write watermark to {path}: {source}")]
    StoreWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Remote error {status}: {body}")]
    Remote { status: u16, body: String },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Unexpected response shape from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid timestamp '{value}': {source}")]
    TimestampParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Failed to render report: {0}")]
    Render(String),

    #[error("Failed to dispatch notification: {0}")]
    Dispatch(String),
}

impl NotifyError {
    /// Get the HTTP status if this is a non-success response
    pub fn status(&self) -> Option<u16> {
        match self {
            NotifyError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NotifyError {
    fn from(err: reqwest::Error) -> Self {
        NotifyError::Transport(err.to_string())
    }
}
