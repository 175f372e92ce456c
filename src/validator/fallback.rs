//! Degraded verdicts for failed validations
//!
//! Every recoverable failure still yields a complete `ValidationResult`:
//! one synthetic issue, a fixed score, and metrics computed from the
//! original listing so degraded results agree with successful ones.
//!
//! The unavailable state (no credential) is deliberately not handled here;
//! it is refused before a validation starts.

use tracing::warn;

use super::text_metrics;
use crate::constants::fallback as fb;
use crate::types::{
    ComplianceStatus, Issue, PipelineFailure, Severity, ValidationCategory, ValidationResult,
    truncate_chars,
};

/// Synthesizes results for malformed output and system failures
#[derive(Debug, Clone, Copy, Default)]
pub struct FallbackPolicy;

impl FallbackPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Route a pipeline failure to the matching fallback
    pub fn recover(&self, failure: &PipelineFailure, listing: &str) -> ValidationResult {
        warn!(origin = failure.origin(), "Using fallback result: {}", failure);

        match failure {
            PipelineFailure::MalformedOutput { raw, .. } => self.malformed_output(listing, raw),
            PipelineFailure::Transport(err) => self.system_error(listing, &err.to_string()),
            PipelineFailure::Internal(message) => self.system_error(listing, message),
        }
    }

    /// Producer answered with something that is not a usable verdict
    pub fn malformed_output(&self, listing: &str, raw: &str) -> ValidationResult {
        let excerpt = truncate_chars(raw.trim(), fb::RAW_EXCERPT_CHARS);

        ValidationResult {
            status: ComplianceStatus::NonCompliant,
            compliance_score: fb::MALFORMED_SCORE,
            issues: vec![Issue {
                category: ValidationCategory::ContentQuality,
                rule_violated: fb::MALFORMED_RULE.to_string(),
                current_text: fb::NO_EXCERPT.to_string(),
                issue: fb::MALFORMED_ISSUE.to_string(),
                suggested_fix: fb::MALFORMED_FIX.to_string(),
                severity: Severity::Medium,
            }],
            suggestions: format!("{}{}...", fb::MALFORMED_SUGGESTIONS_PREFIX, excerpt),
            word_count: text_metrics::word_count(listing),
            reading_level: Some(text_metrics::estimate_reading_level(listing)),
        }
    }

    /// Generation call failed, or something unexpected broke
    pub fn system_error(&self, listing: &str, message: &str) -> ValidationResult {
        ValidationResult {
            status: ComplianceStatus::NonCompliant,
            compliance_score: fb::SYSTEM_SCORE,
            issues: vec![Issue {
                category: ValidationCategory::ContentQuality,
                rule_violated: fb::SYSTEM_RULE.to_string(),
                current_text: fb::NO_EXCERPT.to_string(),
                issue: format!("Validation failed: {}", message),
                suggested_fix: fb::SYSTEM_FIX.to_string(),
                severity: Severity::High,
            }],
            suggestions: fb::SYSTEM_SUGGESTIONS.to_string(),
            word_count: text_metrics::word_count(listing),
            reading_level: Some(text_metrics::estimate_reading_level(listing)),
        }
    }
}
