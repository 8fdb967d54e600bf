//! Error types for txboard-core
//!
//! Every failure while loading transactions collapses into one recoverable
//! state in the view. The variants here exist for logging; users only ever
//! see [`FETCH_ERROR_MESSAGE`].

use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Message shown in place of the table when a fetch fails
pub const FETCH_ERROR_MESSAGE: &str = "Could not load transactions. Please try again.";

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Network failure or non-2xx status
    FetchFailed,
    /// Response body could not be understood
    InvalidResponse,
    /// Configuration error
    ConfigError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::FetchFailed => write!(f, "FETCH_FAILED"),
            ErrorCode::InvalidResponse => write!(f, "INVALID_RESPONSE"),
            ErrorCode::ConfigError => write!(f, "CONFIG_ERROR"),
        }
    }
}

/// Detailed error information for logs and JSON responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Warning - operation may be affected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Main error type for txboard-core
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Fetch failed: {message}")]
    FetchFailed { message: String },

    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::FetchFailed { .. } => ErrorCode::FetchFailed,
            CoreError::InvalidResponse { .. } => ErrorCode::InvalidResponse,
            CoreError::ConfigError { .. } => ErrorCode::ConfigError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::FetchFailed { .. } => ErrorSeverity::Warning,
            CoreError::InvalidResponse { .. } => ErrorSeverity::Error,
            CoreError::ConfigError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Message safe to show to the user
    pub fn user_message(&self) -> &'static str {
        FETCH_ERROR_MESSAGE
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::FetchFailed { .. } => {
                details = details.with_suggestion(
                    "Check that the transactions API is reachable at api.base_url.".to_string()
                );
            }
            CoreError::InvalidResponse { message } => {
                details = details.with_detail(serde_json::json!({ "decode_message": message }));
                details = details.with_suggestion(
                    "The API must answer with {data, pagination} JSON.".to_string()
                );
            }
            CoreError::ConfigError { .. } => {
                details = details.with_suggestion(
                    "Run `txboard --init` to see a valid configuration.".to_string()
                );
            }
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Sequence number of the request that failed
    pub request_id: Option<String>,
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: String) -> Self {
        Self {
            request_id: None,
            operation,
            data: serde_json::json!({}),
        }
    }

    /// Add request ID
    pub fn with_request_id(mut self, request_id: String) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger: Send + Sync {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
    /// Log debug information
    fn log_debug(&self, message: &str, context: &ErrorContext);
}

/// Default error logger using log crate
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        log::error!(
            target: "txboard::error",
            "ERROR [{}] {} - Operation: {} - Request: {:?} - Data: {}",
            error.severity(),
            error.to_details(),
            context.operation,
            context.request_id,
            context.data
        );
    }

    fn log_debug(&self, message: &str, context: &ErrorContext) {
        log::debug!(
            target: "txboard::error",
            "DEBUG: {} - Operation: {} - Request: {:?}",
            message,
            context.operation,
            context.request_id
        );
    }
}

// ==================== Tests ====================
