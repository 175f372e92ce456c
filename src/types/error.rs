//! Unified Error Type System
//!
//! Centralized error types for the validator.
//!
//! ## Error Origins
//!
//! - **ServiceUnavailable**: no credential at startup. Surfaced to the caller,
//!   never converted into a verdict.
//! - **Transport**: the generation call failed (network, timeout, status).
//! - **MalformedOutput**: the call succeeded but the payload has the wrong shape.
//! - **Internal**: anything else that went wrong while interpreting.
//!
//! The last three are [`PipelineFailure`] variants and are always recovered
//! into a fallback [`ValidationResult`](crate::types::ValidationResult).

use std::time::Duration;
use thiserror::Error;

// =============================================================================
// Error Categories
// =============================================================================

/// Transport error categories, used for diagnostics only (the core never retries)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rate limited by the service
    RateLimit,
    /// Credential rejected
    Auth,
    /// Network/connectivity issues, including timeouts
    Network,
    /// Service or model unavailable
    Unavailable,
    /// Request rejected as invalid
    BadRequest,
    /// Service response envelope could not be read
    ParseError,
    /// Temporary server issues
    Transient,
    /// Unknown error
    Unknown,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RateLimit => write!(f, "RATE_LIMIT"),
            Self::Auth => write!(f, "AUTH"),
            Self::Network => write!(f, "NETWORK"),
            Self::Unavailable => write!(f, "UNAVAILABLE"),
            Self::BadRequest => write!(f, "BAD_REQUEST"),
            Self::ParseError => write!(f, "PARSE_ERROR"),
            Self::Transient => write!(f, "TRANSIENT"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

// =============================================================================
// LLM Error
// =============================================================================

/// Generation service error with category and provider context
#[derive(Debug, Clone)]
pub struct LlmError {
    /// Error category for diagnostics
    pub category: ErrorCategory,
    /// Detailed error message
    pub message: String,
    /// Provider that produced the error
    pub provider: Option<String>,
}

impl std::fmt::Display for LlmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(provider) = &self.provider {
            write!(f, "[{}:{}] {}", provider, self.category, self.message)
        } else {
            write!(f, "[{}] {}", self.category, self.message)
        }
    }
}

impl std::error::Error for LlmError {}

impl LlmError {
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self {
            category,
            message: message.into(),
            provider: None,
        }
    }

    pub fn with_provider(
        category: ErrorCategory,
        message: impl Into<String>,
        provider: impl Into<String>,
    ) -> Self {
        Self {
            category,
            message: message.into(),
            provider: Some(provider.into()),
        }
    }

    /// Add provider context to existing error
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Create from simple message (defaults to Unknown category)
    pub fn from_message(message: impl Into<String>) -> Self {
        Self::new(ErrorCategory::Unknown, message)
    }
}

// =============================================================================
// Error Classifier
// =============================================================================

/// Maps raw transport failures to categories
pub struct ErrorClassifier;

impl ErrorClassifier {
    /// Classify an error message from any provider
    pub fn classify(message: &str, provider: &str) -> LlmError {
        let lower = message.to_lowercase();

        if lower.contains("rate limit")
            || lower.contains("429")
            || lower.contains("too many requests")
            || lower.contains("quota exceeded")
        {
            return LlmError::with_provider(ErrorCategory::RateLimit, message, provider);
        }

        if lower.contains("auth")
            || lower.contains("401")
            || lower.contains("403")
            || lower.contains("api key")
            || lower.contains("invalid key")
            || lower.contains("unauthorized")
        {
            return LlmError::with_provider(ErrorCategory::Auth, message, provider);
        }

        if lower.contains("network")
            || lower.contains("connection")
            || lower.contains("dns")
            || lower.contains("timeout")
            || lower.contains("timed out")
            || lower.contains("unreachable")
        {
            return LlmError::with_provider(ErrorCategory::Network, message, provider);
        }

        if lower.contains("503")
            || lower.contains("502")
            || lower.contains("service unavailable")
            || lower.contains("server error")
            || lower.contains("not found")
        {
            return LlmError::with_provider(ErrorCategory::Unavailable, message, provider);
        }

        if lower.contains("400") || lower.contains("bad request") {
            return LlmError::with_provider(ErrorCategory::BadRequest, message, provider);
        }

        if lower.contains("decode") || lower.contains("json") || lower.contains("parse") {
            return LlmError::with_provider(ErrorCategory::ParseError, message, provider);
        }

        LlmError::with_provider(ErrorCategory::Unknown, message, provider)
    }

    /// Classify HTTP status code directly (more accurate than string matching)
    pub fn classify_http_status(status: u16, message: &str, provider: &str) -> LlmError {
        match status {
            429 => LlmError::with_provider(ErrorCategory::RateLimit, message, provider),
            401 | 403 => LlmError::with_provider(ErrorCategory::Auth, message, provider),
            400 | 422 => LlmError::with_provider(ErrorCategory::BadRequest, message, provider),
            500 | 502 | 503 | 504 => {
                LlmError::with_provider(ErrorCategory::Transient, message, provider)
            }
            404 => LlmError::with_provider(ErrorCategory::Unavailable, message, provider),
            _ => LlmError::with_provider(ErrorCategory::Unknown, message, provider),
        }
    }

    /// Classify a reqwest failure by its kind before falling back to the message
    pub fn classify_reqwest(err: &reqwest::Error, provider: &str) -> LlmError {
        let message = format!("Request failed: {}", err);
        if err.is_timeout() || err.is_connect() {
            return LlmError::with_provider(ErrorCategory::Network, message, provider);
        }
        if err.is_decode() {
            return LlmError::with_provider(ErrorCategory::ParseError, message, provider);
        }
        if let Some(status) = err.status() {
            return Self::classify_http_status(status.as_u16(), &message, provider);
        }
        Self::classify(&message, provider)
    }
}

// =============================================================================
// Pipeline Failure
// =============================================================================

/// Recoverable failure inside one validation call
///
/// Every variant is turned into a fallback verdict by
/// [`FallbackPolicy`](crate::validator::FallbackPolicy).
#[derive(Debug, Clone, Error)]
pub enum PipelineFailure {
    /// Producer answered, but not with a usable verdict
    #[error("Malformed producer output: {reason}")]
    MalformedOutput { raw: String, reason: String },

    /// The generation call itself failed
    #[error("{0}")]
    Transport(LlmError),

    /// Unexpected failure while building or interpreting
    #[error("{0}")]
    Internal(String),
}

impl PipelineFailure {
    pub fn malformed(raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedOutput {
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// True when the producer is at fault rather than this service
    pub fn is_content_problem(&self) -> bool {
        matches!(self, Self::MalformedOutput { .. })
    }

    /// Short label for logs
    pub fn origin(&self) -> &'static str {
        match self {
            Self::MalformedOutput { .. } => "malformed_output",
            Self::Transport(_) => "transport",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<ValidatorError> for PipelineFailure {
    fn from(err: ValidatorError) -> Self {
        match err {
            ValidatorError::Llm(llm) => PipelineFailure::Transport(llm),
            ValidatorError::LlmApi(msg) => {
                PipelineFailure::Transport(ErrorClassifier::classify(&msg, "unknown"))
            }
            ValidatorError::Timeout { .. } => PipelineFailure::Transport(LlmError::new(
                ErrorCategory::Network,
                err.to_string(),
            )),
            other => PipelineFailure::Internal(other.to_string()),
        }
    }
}

// =============================================================================
// Application Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ValidatorError {
    // -------------------------------------------------------------------------
    // System Errors (auto From impl)
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // -------------------------------------------------------------------------
    // Generation Service Errors
    // -------------------------------------------------------------------------
    /// Structured LLM error with category
    #[error("LLM error: {0}")]
    Llm(LlmError),

    /// Simple LLM API error (use Llm variant for structured errors)
    #[error("LLM API error: {0}")]
    LlmApi(String),

    /// Operation timeout with context
    #[error("Timeout after {duration:?}: {operation}")]
    Timeout {
        operation: String,
        duration: Duration,
    },

    // -------------------------------------------------------------------------
    // Service Errors
    // -------------------------------------------------------------------------
    #[error("Config error: {0}")]
    Config(String),

    /// Validator has no credential; requests are refused
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Listing rejected at the boundary
    #[error("Invalid listing: {0}")]
    InvalidListing(String),
}

impl From<LlmError> for ValidatorError {
    fn from(err: LlmError) -> Self {
        ValidatorError::Llm(err)
    }
}

pub type Result<T> = std::result::Result<T, ValidatorError>;

impl ValidatorError {
    /// Create a timeout error
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Create an LLM error with category
    pub fn llm_with_category(category: ErrorCategory, message: impl Into<String>) -> Self {
        Self::Llm(LlmError::new(category, message))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable(_))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::RateLimit.to_string(), "RATE_LIMIT");
        assert_eq!(ErrorCategory::Auth.to_string(), "AUTH");
        assert_eq!(ErrorCategory::Network.to_string(), "NETWORK");
    }

    #[test]
    fn test_classify_rate_limit() {
        let err = ErrorClassifier::classify("Rate limit exceeded, please retry", "openai");
        assert_eq!(err.category, ErrorCategory::RateLimit);
        assert_eq!(err.provider.as_deref(), Some("openai"));
    }

    #[test]
    fn test_classify_auth() {
        let err = ErrorClassifier::classify("Invalid API key provided", "openai");
        assert_eq!(err.category, ErrorCategory::Auth);
    }

    #[test]
    fn test_classify_network() {
        let err = ErrorClassifier::classify("Connection timed out after 30s", "openai");
        assert_eq!(err.category, ErrorCategory::Network);
    }

    #[test]
    fn test_classify_unknown() {
        let err = ErrorClassifier::classify("Something weird happened", "test");
        assert_eq!(err.category, ErrorCategory::Unknown);
    }

    #[test]
    fn test_classify_http_status() {
        let rate_limit = ErrorClassifier::classify_http_status(429, "Rate limited", "test");
        assert_eq!(rate_limit.category, ErrorCategory::RateLimit);

        let auth = ErrorClassifier::classify_http_status(401, "Unauthorized", "test");
        assert_eq!(auth.category, ErrorCategory::Auth);

        let server_error = ErrorClassifier::classify_http_status(500, "Server error", "test");
        assert_eq!(server_error.category, ErrorCategory::Transient);
    }

    #[test]
    fn test_llm_error_display() {
        let err = LlmError::with_provider(ErrorCategory::Transient, "HTTP 500", "openai");
        assert_eq!(err.to_string(), "[openai:TRANSIENT] HTTP 500");

        let bare = LlmError::from_message("boom");
        assert_eq!(bare.to_string(), "[UNKNOWN] boom");
    }

    #[test]
    fn test_pipeline_failure_from_validator_error() {
        let transport: PipelineFailure =
            ValidatorError::llm_with_category(ErrorCategory::Network, "down").into();
        assert!(matches!(transport, PipelineFailure::Transport(_)));
        assert!(!transport.is_content_problem());

        let timeout: PipelineFailure =
            ValidatorError::timeout("generation", Duration::from_secs(5)).into();
        assert_eq!(timeout.origin(), "transport");

        let internal: PipelineFailure = ValidatorError::Config("bad".to_string()).into();
        assert_eq!(internal.origin(), "internal");

        let malformed = PipelineFailure::malformed("oops", "not json");
        assert!(malformed.is_content_problem());
        assert_eq!(malformed.to_string(), "Malformed producer output: not json");
    }
}
