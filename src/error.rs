//! Error types for starr
//!
//! Every public API returns `Result<T, Error>` where Error is defined here.
//! Endpoint failures are wrapped with the method and path that produced them,
//! while cancellation is always surfaced bare so callers can tell
//! "the server failed" apart from "I gave up".

use thiserror::Error;

/// The main error type for starr
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Request cancelled")]
    Cancelled,

    // ============================================================================
    // Data Errors
    // ============================================================================
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Failed to decode response: {source}")]
    Decode {
        #[source]
        source: serde_json::Error,
    },

    // ============================================================================
    // Endpoint context
    // ============================================================================
    #[error("api.{method}({endpoint}): {source}")]
    Endpoint {
        method: String,
        endpoint: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error for a response body
    pub fn decode(source: serde_json::Error) -> Self {
        Self::Decode { source }
    }

    /// Wrap an error with the endpoint that produced it.
    ///
    /// `Cancelled` passes through untouched.
    pub fn endpoint(method: impl Into<String>, endpoint: impl Into<String>, source: Error) -> Self {
        if source.is_cancelled() {
            return source;
        }

        Self::Endpoint {
            method: method.into(),
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// Check if this error is a caller cancellation
    pub fn is_cancelled(&self) -> bool {
        match self {
            Error::Cancelled => true,
            Error::Endpoint { source, .. } => source.is_cancelled(),
            _ => false,
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            Error::Endpoint { source, .. } => source.is_retryable(),
            _ => false,
        }
    }

    /// HTTP status of the failed response, if the server answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::HttpStatus { status, .. } => Some(*status),
            Error::Endpoint { source, .. } => source.status(),
            _ => None,
        }
    }
}

/// Check if an HTTP status code is retryable
pub(crate) fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for starr
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for tagging errors with the endpoint they came from
pub trait ResultExt<T> {
    /// Wrap an error with method and endpoint context
    fn endpoint(self, method: &str, endpoint: &str) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn endpoint(self, method: &str, endpoint: &str) -> Result<T> {
        self.map_err(|e| Error::endpoint(method, endpoint, e.into()))
    }
}
