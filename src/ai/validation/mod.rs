//! Producer Response Interpretation
//!
//! Turns untrusted producer text into a `ValidationResult`:
//!
//! 1. Trim and strip a code fence
//! 2. Parse strictly as JSON
//! 3. Validate the verdict shape
//! 4. Overwrite `word_count` from the listing
//! 5. Backfill `reading_level` when absent, null or empty
//!
//! `interpret` never fails: any problem is recovered through the
//! [`FallbackPolicy`].

mod json_extract;
mod response;

pub use json_extract::{ExtractError, ExtractedJson, extract_json, strip_code_fence};
pub use response::{FindingLevel, ResponseValidator, ShapeFinding, ShapeReport};

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::constants::fallback::RAW_EXCERPT_CHARS;
use crate::types::{PipelineFailure, ValidationResult, json_is_blank, preview};
use crate::validator::FallbackPolicy;
use crate::validator::text_metrics;

/// Parses, validates and completes producer verdicts
#[derive(Debug, Default)]
pub struct ResponseInterpreter {
    validator: ResponseValidator,
    fallback: FallbackPolicy,
}

impl ResponseInterpreter {
    pub fn new() -> Self {
        Self {
            validator: ResponseValidator::new(),
            fallback: FallbackPolicy::new(),
        }
    }

    /// Interpret raw producer output; falls back instead of failing
    pub fn interpret(&self, raw: &str, listing: &str) -> ValidationResult {
        match self.try_interpret(raw, listing) {
            Ok(result) => result,
            Err(failure) => self.fallback.recover(&failure, listing),
        }
    }

    /// Interpret raw producer output, reporting why it could not be used
    pub fn try_interpret(
        &self,
        raw: &str,
        listing: &str,
    ) -> Result<ValidationResult, PipelineFailure> {
        let extracted = extract_json(raw).map_err(|e| {
            warn!(
                "Producer output is not JSON ({}): {}",
                e,
                preview(raw.trim(), RAW_EXCERPT_CHARS)
            );
            PipelineFailure::malformed(raw, e.to_string())
        })?;

        let report = self.validator.validate(&extracted.value);
        for finding in report.warnings() {
            warn!("Producer output: {}", finding);
        }
        if !report.is_valid() {
            let reason = report.error_summary();
            warn!("Producer output has invalid shape: {}", reason);
            return Err(PipelineFailure::malformed(raw, reason));
        }

        let completed = complete_payload(extracted.value, listing);

        let result: ValidationResult = serde_json::from_value(completed).map_err(|e| {
            PipelineFailure::malformed(raw, format!("verdict did not deserialize: {}", e))
        })?;

        info!(
            "Validation verdict: {} (score {}/10, {} issues)",
            result.status,
            result.compliance_score,
            result.issues.len()
        );

        Ok(result)
    }
}

/// Apply locally computed metrics to a shape-checked payload
fn complete_payload(mut value: Value, listing: &str) -> Value {
    let backfill_level = json_is_blank(&value, "reading_level");

    if let Some(object) = value.as_object_mut() {
        if matches!(object.get("issues"), Some(Value::Null)) {
            object.remove("issues");
        }

        let word_count = text_metrics::word_count(listing);
        if let Some(reported) = object.get("word_count").and_then(Value::as_u64)
            && reported != word_count as u64
        {
            debug!(
                "Producer reported {} words, listing has {}",
                reported, word_count
            );
        }
        object.insert("word_count".to_string(), Value::from(word_count));

        if backfill_level {
            let level = text_metrics::estimate_reading_level(listing);
            debug!("Calculated reading level: {}", level);
            object.insert("reading_level".to_string(), Value::String(level));
        }
    }

    value
}
