use std::path::PathBuf;

use thiserror::Error;

/// Failure of one API call, as surfaced to repository consumers.
///
/// Every variant is local to the request that produced it; nothing here is
/// retried automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No connectivity, DNS failure, timeout.
    #[error("network error: {0}")]
    Network(String),

    /// Server answered with a non-2xx status other than 401.
    #[error("request failed with status {status}: {message}")]
    Http { status: u16, message: String },

    /// Response body did not match the expected schema.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// Session missing, expired or rejected by the server.
    #[error("not authenticated - sign in again")]
    Unauthenticated,

    /// Request could not be built from the route table.
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

/// Coarse classification of an [`ApiError`], for display decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Network,
    Http(u16),
    Decode,
    Unauthenticated,
    InvalidRequest,
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) => ErrorKind::Network,
            ApiError::Http { status, .. } => ErrorKind::Http(*status),
            ApiError::Decode(_) => ErrorKind::Decode,
            ApiError::Unauthenticated => ErrorKind::Unauthenticated,
            ApiError::InvalidRequest(_) => ErrorKind::InvalidRequest,
        }
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, ApiError::Unauthenticated)
    }
}

/// Result type for API and repository operations
pub type ApiResult<T> = Result<T, ApiError>;

/// Errors raised by a [`Transport`](crate::transport::Transport) before any
/// HTTP status is known.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("invalid transport configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else if err.is_connect() {
            TransportError::Connect(err.to_string())
        } else if err.is_builder() {
            TransportError::Config(err.to_string())
        } else {
            TransportError::Other(err.to_string())
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Config(message) => ApiError::InvalidRequest(message),
            other => ApiError::Network(other.to_string()),
        }
    }
}

/// Errors reading or writing the persisted theme preferences.
#[derive(Error, Debug)]
pub enum PreferencesError {
    #[error("failed to access preferences file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupted preferences file: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no configuration directory available on this platform")]
    NoConfigDir,
}
