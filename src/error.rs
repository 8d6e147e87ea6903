//! Error types for notion-loader
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use serde::Deserialize;
use thiserror::Error;

/// The main error type for notion-loader
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Validation Errors
    // ============================================================================
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    // ============================================================================
    // Input Errors
    // ============================================================================
    #[error("Failed to load data file '{path}': {message}")]
    File { path: String, message: String },

    #[error("Malformed record: {message}")]
    MalformedRecord { message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP / API Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status} ({code}): {message}")]
    Api {
        status: u16,
        code: ApiErrorCode,
        message: String,
    },

    #[error("Unexpected API response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Error codes reported by the Notion API in its error body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorCode {
    InvalidJson,
    InvalidRequestUrl,
    InvalidRequest,
    ValidationError,
    MissingVersion,
    Unauthorized,
    RestrictedResource,
    ObjectNotFound,
    ConflictError,
    RateLimited,
    InternalServerError,
    ServiceUnavailable,
    DatabaseConnectionUnavailable,
    GatewayTimeout,
    #[serde(other)]
    Unknown,
}

impl ApiErrorCode {
    /// Wire name of the code
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiErrorCode::InvalidJson => "invalid_json",
            ApiErrorCode::InvalidRequestUrl => "invalid_request_url",
            ApiErrorCode::InvalidRequest => "invalid_request",
            ApiErrorCode::ValidationError => "validation_error",
            ApiErrorCode::MissingVersion => "missing_version",
            ApiErrorCode::Unauthorized => "unauthorized",
            ApiErrorCode::RestrictedResource => "restricted_resource",
            ApiErrorCode::ObjectNotFound => "object_not_found",
            ApiErrorCode::ConflictError => "conflict_error",
            ApiErrorCode::RateLimited => "rate_limited",
            ApiErrorCode::InternalServerError => "internal_server_error",
            ApiErrorCode::ServiceUnavailable => "service_unavailable",
            ApiErrorCode::DatabaseConnectionUnavailable => "database_connection_unavailable",
            ApiErrorCode::GatewayTimeout => "gateway_timeout",
            ApiErrorCode::Unknown => "unknown",
        }
    }

    /// Fallback classification when the body carries no code
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ApiErrorCode::InvalidRequest,
            401 => ApiErrorCode::Unauthorized,
            403 => ApiErrorCode::RestrictedResource,
            404 => ApiErrorCode::ObjectNotFound,
            409 => ApiErrorCode::ConflictError,
            429 => ApiErrorCode::RateLimited,
            500 => ApiErrorCode::InternalServerError,
            503 => ApiErrorCode::ServiceUnavailable,
            504 => ApiErrorCode::GatewayTimeout,
            _ => ApiErrorCode::Unknown,
        }
    }
}

impl std::fmt::Display for ApiErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coarse classification of a schema fetch failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    /// The database does not exist or is not shared with the integration
    NotFound,
    /// The token is invalid or lacks the capability
    PermissionDenied,
    /// Network failure or any other unsuccessful response
    Transport,
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a file error
    pub fn file(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::File {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a malformed record error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedRecord {
            message: message.into(),
        }
    }

    /// Create an API error
    pub fn api(status: u16, code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            code,
            message: message.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Build an API error from an unsuccessful response body
    ///
    /// Notion answers failures with `{"object":"error","status":..,"code":..,"message":..}`.
    /// Bodies that do not follow that shape are classified by status alone.
    pub fn from_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            code: Option<ApiErrorCode>,
            message: Option<String>,
        }

        match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => Self::Api {
                status,
                code: parsed
                    .code
                    .unwrap_or_else(|| ApiErrorCode::from_status(status)),
                message: parsed.message.unwrap_or_default(),
            },
            Err(_) => Self::Api {
                status,
                code: ApiErrorCode::from_status(status),
                message: body.trim().to_string(),
            },
        }
    }

    /// Classify a failure of a database lookup
    pub fn fetch_failure(&self) -> FetchFailure {
        match self {
            Error::Api {
                code: ApiErrorCode::ObjectNotFound,
                ..
            } => FetchFailure::NotFound,
            Error::Api {
                code: ApiErrorCode::Unauthorized | ApiErrorCode::RestrictedResource,
                ..
            } => FetchFailure::PermissionDenied,
            _ => FetchFailure::Transport,
        }
    }

    /// Whether the failure means the integration cannot reach the database
    pub fn is_access_error(&self) -> bool {
        matches!(
            self.fetch_failure(),
            FetchFailure::NotFound | FetchFailure::PermissionDenied
        )
    }
}

/// Result type alias for notion-loader
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }
}
