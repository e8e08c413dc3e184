//! Error types for adwql
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//! Every variant belongs to one [`ErrorKind`], which mirrors the phase in
//! which it can occur (parse, open, fetch, row materialization).

use thiserror::Error;

/// The main error type for adwql
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid data source name {dsn:?}: {message}")]
    InvalidDsn { dsn: String, message: String },

    #[error("Invalid duration {value:?} for '{field}'")]
    InvalidDuration { field: String, value: String },

    // ============================================================================
    // Credential Errors
    // ============================================================================
    #[error("Missing required option: adwords_id")]
    MissingAccountId,

    #[error("Developer token is required with {method} authentication")]
    MissingDeveloperToken { method: &'static str },

    #[error("No HTTP client registered with the name {name:?}")]
    UnknownNamedClient { name: String },

    #[error("Invalid credential: {message}")]
    InvalidCredential { message: String },

    // ============================================================================
    // Network Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Report download failed: {error_type} (trigger: {trigger:?}, field: {field_path:?})")]
    Api {
        error_type: String,
        trigger: String,
        field_path: String,
    },

    #[error("Token refresh failed: {message}")]
    TokenRefresh { message: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Unknown value {value:?}: {message}")]
    Codec { value: String, message: String },

    #[error("CSV parsing error: {message}")]
    CsvParse { message: String },

    // ============================================================================
    // Statement Lifecycle Errors
    // ============================================================================
    #[error("Empty statement: no query to prepare")]
    EmptyStatement,

    #[error("{operation} is not supported, proceed without it")]
    Unsupported { operation: &'static str },

    #[error("Connection is closed")]
    ConnectionClosed,

    #[error("Statement is closed")]
    StatementClosed,

    #[error("Expected {expected} query arguments, got {got}")]
    ArgumentCount { expected: usize, got: usize },

    #[error("Column {column} not found in result set")]
    ColumnNotFound { column: String },

    // ============================================================================
    // Cache Errors
    // ============================================================================
    #[error("Cache error: {message}")]
    Cache { message: String },

    #[error("Cache directory {path} is already in use by another writer")]
    CacheLocked { path: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

/// Broad error categories callers can branch on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad connection string or option value, raised before any resource is acquired
    Config,
    /// Unusable credentials, raised at open time before any network call
    Credential,
    /// Transport failure, timeout, rejected authentication or API error
    Network,
    /// A cell whose text is neither a known sentinel nor a number
    Codec,
    /// Misuse of the connection/statement lifecycle
    Statement,
    /// Result cache failure
    Cache,
    /// Local I/O or serialization failure
    Io,
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid DSN error naming the offending input
    pub fn invalid_dsn(dsn: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidDsn {
            dsn: dsn.into(),
            message: message.into(),
        }
    }

    /// Create an invalid duration error
    pub fn invalid_duration(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidDuration {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a codec error for an unrecognized cell value
    pub fn codec(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Codec {
            value: value.into(),
            message: message.into(),
        }
    }

    /// Create a token refresh error
    pub fn token_refresh(message: impl Into<String>) -> Self {
        Self::TokenRefresh {
            message: message.into(),
        }
    }

    /// Create a cache error
    pub fn cache(message: impl Into<String>) -> Self {
        Self::Cache {
            message: message.into(),
        }
    }

    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Config { .. } | Error::InvalidDsn { .. } | Error::InvalidDuration { .. } => {
                ErrorKind::Config
            }
            Error::MissingAccountId
            | Error::MissingDeveloperToken { .. }
            | Error::UnknownNamedClient { .. }
            | Error::InvalidCredential { .. } => ErrorKind::Credential,
            Error::Http(_)
            | Error::HttpStatus { .. }
            | Error::Api { .. }
            | Error::TokenRefresh { .. }
            | Error::Timeout { .. } => ErrorKind::Network,
            Error::Codec { .. } | Error::CsvParse { .. } => ErrorKind::Codec,
            Error::EmptyStatement
            | Error::Unsupported { .. }
            | Error::ConnectionClosed
            | Error::StatementClosed
            | Error::ArgumentCount { .. }
            | Error::ColumnNotFound { .. } => ErrorKind::Statement,
            Error::Cache { .. } | Error::CacheLocked { .. } => ErrorKind::Cache,
            Error::Io(_) | Error::JsonParse(_) | Error::Other(_) => ErrorKind::Io,
        }
    }

    /// Check if this is the "unsupported, proceed without it" signal
    pub fn is_unsupported(&self) -> bool {
        matches!(self, Error::Unsupported { .. })
    }

    /// Check if this error was raised by the network layer
    pub fn is_network(&self) -> bool {
        self.kind() == ErrorKind::Network
    }
}

/// Result type alias for adwql
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::config("test message");
        assert_eq!(err.to_string(), "Configuration error: test message");

        let err = Error::invalid_dsn("awql", "missing `?`");
        assert_eq!(
            err.to_string(),
            "Invalid data source name \"awql\": missing `?`"
        );

        let err = Error::http_status(404, "Not found");
        assert_eq!(err.to_string(), "HTTP 404: Not found");

        let err = Error::MissingDeveloperToken {
            method: "access token",
        };
        assert_eq!(
            err.to_string(),
            "Developer token is required with access token authentication"
        );
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::config("x").kind(), ErrorKind::Config);
        assert_eq!(
            Error::invalid_duration("timeout", "3x").kind(),
            ErrorKind::Config
        );
        assert_eq!(Error::MissingAccountId.kind(), ErrorKind::Credential);
        assert_eq!(
            Error::UnknownNamedClient {
                name: "shared".into()
            }
            .kind(),
            ErrorKind::Credential
        );
        assert_eq!(Error::codec("abc", "not a number").kind(), ErrorKind::Codec);
        assert_eq!(Error::Timeout { timeout_ms: 10 }.kind(), ErrorKind::Network);
        assert_eq!(Error::token_refresh("denied").kind(), ErrorKind::Network);
        assert_eq!(Error::EmptyStatement.kind(), ErrorKind::Statement);
        assert_eq!(Error::cache("boom").kind(), ErrorKind::Cache);
    }

    #[test]
    fn test_is_unsupported() {
        assert!(Error::Unsupported {
            operation: "Transactions"
        }
        .is_unsupported());
        assert!(!Error::ConnectionClosed.is_unsupported());
        assert!(Error::http_status(500, "").is_network());
        assert!(!Error::EmptyStatement.is_network());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));

        let result: Result<()> = Err(Error::cache("locked"));
        let err = result
            .with_context(|| format!("Failed to flush {}", "/tmp/c"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Failed to flush /tmp/c: Cache error: locked");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::JsonParse(_)));
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
