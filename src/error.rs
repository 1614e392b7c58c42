/// Error types for the application
///
/// Nothing here is fatal: every variant ends up as a toast, an error
/// answer, or a log line, and the UI stays interactive.
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

/// Why a submit attempt was refused before any request was sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    /// No image selected, or the question is blank after trimming
    #[error("Please upload an image and enter a question.")]
    MissingInput,

    /// A request is already in flight
    #[error("A question is already being analyzed")]
    AlreadySubmitting,
}

/// Failures on the way to and from the VQA backend
///
/// Cloneable so it can travel inside UI messages; foreign errors are
/// shared behind an `Arc`.
#[derive(Debug, Clone, Error)]
pub enum BackendError {
    #[error("could not read {}: {source}", .path.display())]
    ReadImage {
        path: PathBuf,
        #[source]
        source: Arc<std::io::Error>,
    },

    #[error("invalid content type {0}")]
    InvalidMime(String),

    #[error("request failed: {0}")]
    Transport(#[source] Arc<reqwest::Error>),

    /// Non-2xx reply
    #[error("HTTP error! status: {0}")]
    Status(u16),

    /// Reply body was not JSON
    #[error("invalid response body: {0}")]
    InvalidBody(#[source] Arc<serde_json::Error>),
}

impl From<reqwest::Error> for BackendError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Arc::new(err))
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidBody(Arc::new(err))
    }
}

/// Problems loading the optional settings file
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}
