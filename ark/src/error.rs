//! Error types for the Ark API client.

use thiserror::Error;

/// API error codes returned by Ark.
pub mod error_code {
    /// Unrecoverable server-side failure. The streaming processor
    /// treats this code as fatal for the remainder of a stream.
    pub const INTERNAL_SERVICE_ERROR: &str = "InternalServiceError";
    pub const RATE_LIMIT_EXCEEDED: &str = "RateLimitExceeded";
    pub const QUOTA_EXCEEDED: &str = "QuotaExceeded";
    pub const AUTHENTICATION_ERROR: &str = "AuthenticationError";
    pub const INVALID_PARAMETER: &str = "InvalidParameter";
    pub const SENSITIVE_CONTENT: &str = "SensitiveContentDetected";
}

/// Result type alias for Ark operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for Ark API operations.
#[derive(Error, Debug)]
pub enum Error {
    /// API error returned by Ark.
    #[error("ark: {message} (code={code})")]
    Api {
        code: String,
        message: String,
        http_status: u16,
    },

    /// HTTP request error.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a new API error.
    pub fn api(code: impl Into<String>, message: impl Into<String>, http_status: u16) -> Self {
        Error::Api {
            code: code.into(),
            message: message.into(),
            http_status,
        }
    }

    /// Returns true if this is the fatal internal service error.
    pub fn is_internal_service(&self) -> bool {
        matches!(self, Error::Api { code, .. } if code == error_code::INTERNAL_SERVICE_ERROR)
    }

    /// Returns true if this is a rate limit error.
    pub fn is_rate_limit(&self) -> bool {
        match self {
            Error::Api {
                code, http_status, ..
            } => code == error_code::RATE_LIMIT_EXCEEDED || *http_status == 429,
            _ => false,
        }
    }

    /// Returns true if this is an authentication error.
    pub fn is_authentication(&self) -> bool {
        match self {
            Error::Api {
                code, http_status, ..
            } => code == error_code::AUTHENTICATION_ERROR || *http_status == 401,
            _ => false,
        }
    }

    /// Returns true if this is an invalid request error.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Error::Api { code, .. } if code == error_code::INVALID_PARAMETER)
    }
}
