//! Listing Validation
//!
//! Pipeline per listing:
//!
//! ```text
//! listing ─► ValidationPrompt ─► ValidationClient ─► ResponseInterpreter ─► ValidationResult
//!                                      │                     │
//!                                      └──── failure ────────┴─► FallbackPolicy
//! ```
//!
//! `ListingValidator::validate` always yields a result. The only refusal is
//! the unavailable state of `ValidatorService`, when no credential was found.

mod client;
mod fallback;
pub mod text_metrics;

pub use client::{DecodingParams, ValidationClient};
pub use fallback::FallbackPolicy;
pub use text_metrics::{ReadingLevel, TextMetrics, estimate_reading_level, word_count};

use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::ai::prompt::{PolicyTemplate, ValidationPrompt};
use crate::ai::validation::ResponseInterpreter;
use crate::config::{Config, RequestConfig};
use crate::constants::service::{LOG_PREVIEW_CHARS, UNAVAILABLE_MESSAGE};
use crate::types::{Result, ValidationResult, ValidatorError, preview};

// =============================================================================
// Listing Validator
// =============================================================================

/// Stateless per call; one instance is shared by all concurrent validations
#[derive(Debug)]
pub struct ListingValidator {
    prompt: ValidationPrompt,
    client: ValidationClient,
    interpreter: ResponseInterpreter,
}

impl ListingValidator {
    pub fn new(prompt: ValidationPrompt, client: ValidationClient) -> Self {
        Self {
            prompt,
            client,
            interpreter: ResponseInterpreter::new(),
        }
    }

    /// Load the policy template and build the configured client
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = ValidationClient::from_config(&config.llm)?;
        let template = PolicyTemplate::load(&config.policy.template_path);
        info!(
            "Validator ready (model: {}, policy: {})",
            client.model(),
            template.source()
        );
        Ok(Self::new(ValidationPrompt::new(&template), client))
    }

    /// Validate one listing. Never fails: transport and format problems come
    /// back as fallback verdicts.
    pub async fn validate(&self, listing: &str) -> ValidationResult {
        info!(
            "Validating listing: {}",
            preview(listing, LOG_PREVIEW_CHARS)
        );

        let prompt = self.prompt.build(listing);
        debug!("Composed prompt: {} characters", prompt.len());

        match self.client.invoke(&prompt).await {
            Ok(raw) => self.interpreter.interpret(&raw, listing),
            Err(failure) => FallbackPolicy::new().recover(&failure, listing),
        }
    }
}

// =============================================================================
// Service State
// =============================================================================

/// Health status reported at the boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    /// "healthy" when a validator is ready, "degraded" otherwise
    pub status: String,
    pub version: String,
}

impl HealthReport {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Ready validator, or the reason none could be built
#[derive(Debug, Clone)]
pub enum ValidatorService {
    Ready(Arc<ListingValidator>),
    Unavailable { reason: String },
}

impl ValidatorService {
    /// A missing credential yields `Unavailable`; other errors propagate
    pub fn from_config(config: &Config) -> Result<Self> {
        match ListingValidator::from_config(config) {
            Ok(validator) => Ok(Self::Ready(Arc::new(validator))),
            Err(e) if e.is_unavailable() => {
                warn!("Validator unavailable: {}", e);
                Ok(Self::Unavailable {
                    reason: e.to_string(),
                })
            }
            Err(e) => Err(e),
        }
    }

    pub fn ready(validator: ListingValidator) -> Self {
        Self::Ready(Arc::new(validator))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Validate, or refuse with `ServiceUnavailable`
    pub async fn validate(&self, listing: &str) -> Result<ValidationResult> {
        match self {
            Self::Ready(validator) => Ok(validator.validate(listing).await),
            Self::Unavailable { reason } => {
                debug!("Refusing validation: {}", reason);
                Err(ValidatorError::ServiceUnavailable(
                    UNAVAILABLE_MESSAGE.to_string(),
                ))
            }
        }
    }

    pub fn health(&self) -> HealthReport {
        let status = if self.is_ready() { "healthy" } else { "degraded" };
        HealthReport {
            status: status.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Boundary length check, in characters
pub fn check_listing_bounds(listing: &str, limits: &RequestConfig) -> Result<()> {
    let chars = listing.chars().count();
    if chars < limits.min_length {
        return Err(ValidatorError::InvalidListing(format!(
            "listing has {} characters, minimum is {}",
            chars, limits.min_length
        )));
    }
    if chars > limits.max_length {
        return Err(ValidatorError::InvalidListing(format!(
            "listing has {} characters, maximum is {}",
            chars, limits.max_length
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::provider::scripted::{ScriptedProvider, ScriptedReply};
    use crate::config::LlmConfig;
    use crate::types::{ComplianceStatus, ErrorCategory, Severity, ValidationCategory};
    use futures::future::join_all;
    use serde_json::json;
    use std::time::Duration;

    const LISTING: &str = "Get 0% APR for 12 months! Apply now and enjoy amazing rewards!";

    fn validator(provider: Arc<ScriptedProvider>) -> ListingValidator {
        let client = ValidationClient::with_provider(
            provider,
            DecodingParams::from(&LlmConfig::default()),
            Duration::from_millis(200),
        );
        ListingValidator::new(ValidationPrompt::new(&PolicyTemplate::built_in()), client)
    }

    fn verdict(score: f64) -> String {
        json!({
            "status": "non_compliant",
            "compliance_score": score,
            "issues": [{
                "category": "Prohibited Language",
                "rule_violated": "Exaggerated superlatives",
                "current_text": "amazing",
                "issue": "Superlative without substantiation",
                "suggested_fix": "Describe the rewards factually",
                "severity": "medium"
            }],
            "suggestions": "Replace promotional wording with concrete terms.",
            "word_count": 3,
            "reading_level": ""
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_validate_end_to_end() {
        let provider = Arc::new(ScriptedProvider::replying(format!(
            "```json\n{}\n```",
            verdict(6.5)
        )));
        let result = validator(provider.clone()).validate(LISTING).await;

        assert_eq!(result.status, ComplianceStatus::NonCompliant);
        assert_eq!(result.compliance_score, 6.5);
        assert_eq!(result.issues[0].category, ValidationCategory::ProhibitedLanguage);
        assert_eq!(result.issues[0].severity, Severity::Medium);
        assert_eq!(result.word_count, 12);
        assert_eq!(result.reading_level.as_deref(), Some("Grade 8 or below"));

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].prompt.contains(LISTING));
        assert!(!requests[0].prompt.contains("{{ listing }}"));
    }

    #[tokio::test]
    async fn test_transport_failure_gives_system_error() {
        let provider = Arc::new(ScriptedProvider::failing(
            ErrorCategory::Network,
            "connection reset",
        ));
        let result = validator(provider.clone()).validate(LISTING).await;

        assert_eq!(result.compliance_score, 0.0);
        assert_eq!(result.issues[0].rule_violated, "System Error");
        assert!(result.issues[0].issue.starts_with("Validation failed: "));
        assert_eq!(result.word_count, 12);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_prose_reply_gives_malformed_fallback() {
        let provider = Arc::new(ScriptedProvider::replying(
            "This listing looks compliant to me.",
        ));
        let result = validator(provider).validate(LISTING).await;

        assert_eq!(result.compliance_score, 5.0);
        assert_eq!(result.issues[0].rule_violated, "Response Format");
        assert!(result.suggestions.contains("This listing looks compliant to me."));
    }

    #[tokio::test]
    async fn test_slow_provider_times_out_to_system_error() {
        let provider = Arc::new(ScriptedProvider::new(vec![ScriptedReply::Delay(
            Duration::from_secs(5),
            verdict(9.0),
        )]));
        let result = validator(provider).validate(LISTING).await;

        assert_eq!(result.compliance_score, 0.0);
        assert_eq!(result.issues[0].rule_violated, "System Error");
    }

    #[tokio::test]
    async fn test_concurrent_validations_are_independent() {
        let provider = Arc::new(ScriptedProvider::new(vec![
            ScriptedReply::Text(verdict(7.0)),
            ScriptedReply::Fail(ErrorCategory::Unavailable, "503".to_string()),
            ScriptedReply::Text("not json".to_string()),
        ]));
        let validator = Arc::new(validator(provider.clone()));

        let results = join_all((0..3).map(|_| {
            let validator = validator.clone();
            async move { validator.validate(LISTING).await }
        }))
        .await;

        let mut scores: Vec<f64> = results.iter().map(|r| r.compliance_score).collect();
        scores.sort_by(|a, b| a.total_cmp(b));
        assert_eq!(scores, vec![0.0, 5.0, 7.0]);
        assert_eq!(provider.call_count(), 3);
        assert!(results.iter().all(|r| r.word_count == 12));
    }

    #[tokio::test]
    async fn test_unavailable_service_refuses() {
        let service = ValidatorService::Unavailable {
            reason: "no key".to_string(),
        };
        let err = service.validate(LISTING).await.unwrap_err();
        assert!(err.is_unavailable());
        assert_eq!(
            err.to_string(),
            format!("Service unavailable: {}", UNAVAILABLE_MESSAGE)
        );

        let health = service.health();
        assert_eq!(health.status, "degraded");
        assert!(!health.is_healthy());
    }

    #[tokio::test]
    async fn test_ready_service_is_healthy() {
        let service =
            ValidatorService::ready(validator(Arc::new(ScriptedProvider::replying(verdict(8.0)))));
        assert!(service.health().is_healthy());
        assert_eq!(service.health().version, env!("CARGO_PKG_VERSION"));
        assert_eq!(service.validate(LISTING).await.unwrap().compliance_score, 8.0);
    }

    #[test]
    fn test_missing_credential_yields_unavailable_state() {
        let mut config = Config::default();
        config.llm.api_key = None;
        config.llm.api_key_env = "LISTING_VALIDATOR_TEST_UNSET_KEY".to_string();

        let service = ValidatorService::from_config(&config).unwrap();
        assert!(!service.is_ready());
    }

    #[test]
    fn test_listing_bounds() {
        let limits = RequestConfig::default();
        assert!(check_listing_bounds("too short", &limits).is_err());
        assert!(check_listing_bounds("exactly 10", &limits).is_ok());
        assert!(check_listing_bounds(&"a".repeat(5000), &limits).is_ok());

        let err = check_listing_bounds(&"a".repeat(5001), &limits).unwrap_err();
        assert!(matches!(err, ValidatorError::InvalidListing(_)));

        // Characters, not bytes
        assert!(check_listing_bounds("ééééééééé", &limits).is_err());
    }
}
