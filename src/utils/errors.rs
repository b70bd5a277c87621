//! Error handling for the exam results front-end
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the application
#[derive(Error, Debug)]
pub enum ExamResultsError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration loading error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Data store error: {0}")]
    Store(#[from] StoreError),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("{0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Request cancelled")]
    Cancelled,
}

/// Errors reported by the hosted data store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("request failed with HTTP {status}: {message}")]
    RequestFailed { status: u16, message: String },

    #[error("request timed out")]
    Timeout,

    #[error("data store unavailable")]
    ServiceUnavailable,

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("duplicate value: {0}")]
    UniqueViolation(String),

    #[error("{0}")]
    ForeignKeyViolation(String),
}

/// Result type alias for application operations
pub type Result<T> = std::result::Result<T, ExamResultsError>;

impl ExamResultsError {
    /// Shorthand for an input validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        ExamResultsError::Validation(message.into())
    }

    /// Check if the error is recoverable by the operator re-trying the action
    pub fn is_recoverable(&self) -> bool {
        match self {
            ExamResultsError::Config(_) => false,
            ExamResultsError::ConfigLoad(_) => false,
            ExamResultsError::Store(_) => true,
            ExamResultsError::Http(_) => true,
            ExamResultsError::Serialization(_) => false,
            ExamResultsError::Io(_) => true,
            ExamResultsError::UrlParse(_) => false,
            ExamResultsError::Validation(_) => true,
            ExamResultsError::NotFound { .. } => true,
            ExamResultsError::Cancelled => true,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            ExamResultsError::Config(_) => ErrorSeverity::Critical,
            ExamResultsError::ConfigLoad(_) => ErrorSeverity::Critical,
            ExamResultsError::UrlParse(_) => ErrorSeverity::Critical,
            ExamResultsError::Validation(_) => ErrorSeverity::Info,
            ExamResultsError::Cancelled => ErrorSeverity::Info,
            ExamResultsError::NotFound { .. } => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
