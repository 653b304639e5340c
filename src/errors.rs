//! Error types for loam_iiif
//!
//! This module defines error types for all components of the application.
//! Errors are designed to be actionable and provide clear context for
//! debugging and user feedback.

use std::path::PathBuf;
use thiserror::Error;

/// Fetching and JSON decoding errors
#[derive(Error, Debug)]
pub enum FetchError {
    /// Connection-level failure after retries are exhausted
    #[error("HTTP request failed for {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Final non-2xx response, retry-exhausted or non-retryable
    #[error("Server returned HTTP {status} for {url}")]
    Status { status: u16, url: String },

    /// Response body invalid even after trailing-comma repair
    #[error("Invalid JSON response from {url}")]
    MalformedJson {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl FetchError {
    /// The URL the failed request was issued against
    pub fn url(&self) -> &str {
        match self {
            FetchError::Transport { url, .. }
            | FetchError::Status { url, .. }
            | FetchError::MalformedJson { url, .. } => url,
        }
    }
}

/// Cache store errors
#[derive(Error, Debug)]
pub enum CacheError {
    /// Cache directory not found or inaccessible
    #[error("Cache directory not accessible: {path}")]
    DirectoryNotAccessible { path: PathBuf },

    /// I/O error during cache operations
    #[error("Cache I/O error")]
    Io(#[from] std::io::Error),

    /// Cached document could not be serialized or deserialized
    #[error("Cache serialization error")]
    Serialization(#[from] serde_json::Error),
}

/// Top-level application error that can represent any error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Fetch error
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Cache error
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Generic I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Generic application error with context
    #[error("Application error: {message}")]
    Generic { message: String },
}

impl AppError {
    /// Create a generic application error with a message
    pub fn generic(message: impl Into<String>) -> Self {
        Self::Generic {
            message: message.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            AppError::Fetch(_) => "fetch",
            AppError::Cache(_) => "cache",
            AppError::Io(_) => "io",
            AppError::Generic { .. } => "generic",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;

/// Fetch result type alias
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Cache result type alias
pub type CacheResult<T> = std::result::Result<T, CacheError>;
