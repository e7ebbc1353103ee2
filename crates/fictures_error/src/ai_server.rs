//! AI server client errors and retry classification.

/// AI server error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum AiServerErrorKind {
    /// Request could not be sent or timed out
    #[display("AI server request failed: {}", _0)]
    Request(String),
    /// Server answered with a non-success status
    #[display("HTTP {} error: {}", status_code, message)]
    Status {
        /// HTTP status code
        status_code: u16,
        /// Response body or reason
        message: String,
    },
    /// API key missing or rejected
    #[display("AI server rejected the API key")]
    Unauthorized,
    /// Response body was not the expected JSON
    #[display("Failed to decode AI server response: {}", _0)]
    Decode(String),
    /// Base URL could not be joined with an endpoint path
    #[display("Invalid AI server URL: {}", _0)]
    InvalidUrl(String),
}

impl AiServerErrorKind {
    /// Check if this error type should be retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            AiServerErrorKind::Status { status_code, .. } => {
                matches!(*status_code, 408 | 429 | 500 | 502 | 503 | 504)
            }
            AiServerErrorKind::Request(_) => true,
            _ => false,
        }
    }

    /// Get retry strategy parameters for this error type.
    ///
    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    pub fn retry_strategy_params(&self) -> (u64, usize, u64) {
        match self {
            AiServerErrorKind::Status { status_code, .. } => match *status_code {
                429 => (5000, 3, 40),
                503 => (2000, 5, 60),
                500 | 502 | 504 => (1000, 3, 8),
                _ => (2000, 4, 30),
            },
            AiServerErrorKind::Request(_) => (1000, 3, 10),
            _ => (2000, 5, 60),
        }
    }
}

/// AI server error with source location tracking.
///
/// # Examples
///
/// ```
/// use fictures_error::{AiServerError, AiServerErrorKind, RetryableError};
///
/// let err = AiServerError::new(AiServerErrorKind::Status {
///     status_code: 503,
///     message: "Service unavailable".to_string(),
/// });
///
/// assert!(err.is_retryable());
/// let (backoff, retries, _max_delay) = err.retry_strategy_params();
/// assert_eq!(backoff, 2000);
/// assert_eq!(retries, 5);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("AI Server Error: {} at line {} in {}", kind, line, file)]
pub struct AiServerError {
    /// The kind of error that occurred
    pub kind: AiServerErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl AiServerError {
    /// Create a new AiServerError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: AiServerErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

/// Errors that know whether, and how patiently, to retry.
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    fn is_retryable(&self) -> bool;

    /// Returns `(initial_backoff_ms, max_retries, max_delay_secs)`.
    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        (2000, 5, 60)
    }
}

impl RetryableError for AiServerError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    fn retry_strategy_params(&self) -> (u64, usize, u64) {
        self.kind.retry_strategy_params()
    }
}
