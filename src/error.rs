//! Error handling for nes-submit

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for submission operations
#[derive(Error, Debug)]
pub enum SubmitError {
    #[error("cannot read {path:?}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("Authentication rejected by server: {status}")]
    AuthRejected { status: StatusCode, body: String },

    #[error("Request rejected by server: {status}")]
    RequestRejected { status: StatusCode, body: String },

    #[error("Server error: {status}")]
    ServerError { status: StatusCode, body: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("SSL/TLS error: {0}")]
    Ssl(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SubmitError {
    /// Response body carried by a status-classified error, if any.
    pub fn body(&self) -> Option<&str> {
        match self {
            SubmitError::AuthRejected { body, .. }
            | SubmitError::RequestRejected { body, .. }
            | SubmitError::ServerError { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for submission operations
pub type Result<T> = std::result::Result<T, SubmitError>;
