//! Response Shape Validation
//!
//! Checks a decoded producer payload against the verdict shape:
//! - `status` in the closed status set
//! - `compliance_score` numeric within 0..=10
//! - `issues` (optional) an array of complete issue objects with known
//!   category and severity
//! - `suggestions` a string, `reading_level` a string or null
//!
//! `word_count` is not checked: it is always recomputed locally.
//! Errors make the payload unusable; warnings are logged and ignored.

use serde_json::{Map, Value};
use std::fmt;

use crate::types::{ComplianceStatus, Severity, ValidationCategory, json_type_name};

const KNOWN_FIELDS: [&str; 6] = [
    "status",
    "compliance_score",
    "issues",
    "suggestions",
    "word_count",
    "reading_level",
];

const ISSUE_TEXT_FIELDS: [&str; 4] = ["rule_violated", "current_text", "issue", "suggested_fix"];

/// Severity levels for shape findings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingLevel {
    /// Payload is unusable
    Error,
    /// Payload usable, but something looks off
    Warning,
}

impl fmt::Display for FindingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindingLevel::Error => write!(f, "ERROR"),
            FindingLevel::Warning => write!(f, "WARN"),
        }
    }
}

/// A single shape finding
#[derive(Debug, Clone)]
pub struct ShapeFinding {
    pub level: FindingLevel,
    pub message: String,
    pub location: Option<String>,
}

impl ShapeFinding {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FindingLevel::Error,
            message: message.into(),
            location: None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: FindingLevel::Warning,
            message: message.into(),
            location: None,
        }
    }

    pub fn at(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

impl fmt::Display for ShapeFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "[{}] {}: {}", self.level, location, self.message),
            None => write!(f, "[{}] {}", self.level, self.message),
        }
    }
}

/// All findings for one payload
#[derive(Debug, Clone, Default)]
pub struct ShapeReport {
    pub findings: Vec<ShapeFinding>,
    pub issues_checked: usize,
}

impl ShapeReport {
    /// Check if payload is usable (no errors)
    pub fn is_valid(&self) -> bool {
        !self.findings.iter().any(|f| f.level == FindingLevel::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ShapeFinding> {
        self.findings.iter().filter(|f| f.level == FindingLevel::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ShapeFinding> {
        self.findings
            .iter()
            .filter(|f| f.level == FindingLevel::Warning)
    }

    /// Error messages joined for a fallback reason
    pub fn error_summary(&self) -> String {
        self.errors()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn add(&mut self, finding: ShapeFinding) {
        self.findings.push(finding);
    }
}

/// Validator for producer verdict payloads
#[derive(Debug, Default)]
pub struct ResponseValidator;

impl ResponseValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, response: &Value) -> ShapeReport {
        let mut report = ShapeReport::default();

        let Some(object) = response.as_object() else {
            report.add(ShapeFinding::error(format!(
                "Response must be a JSON object, got {}",
                json_type_name(response)
            )));
            return report;
        };

        let status = self.validate_status(object, &mut report);
        self.validate_score(object, &mut report);
        let max_severity = self.validate_issues(object, &mut report);
        self.validate_text_fields(object, &mut report);

        if status == Some(ComplianceStatus::Compliant) && max_severity == Some(Severity::High) {
            report.add(ShapeFinding::warning(
                "Status is compliant but a high severity issue was reported",
            ));
        }

        for key in object.keys() {
            if !KNOWN_FIELDS.contains(&key.as_str()) {
                report.add(ShapeFinding::warning(format!("Unexpected field '{}'", key)).at(key));
            }
        }

        report
    }

    fn validate_status(
        &self,
        object: &Map<String, Value>,
        report: &mut ShapeReport,
    ) -> Option<ComplianceStatus> {
        match object.get("status") {
            Some(Value::String(s)) => match s.parse::<ComplianceStatus>() {
                Ok(status) => Some(status),
                Err(msg) => {
                    report.add(ShapeFinding::error(msg).at("status"));
                    None
                }
            },
            Some(other) => {
                report.add(
                    ShapeFinding::error(format!(
                        "'status' must be a string, got {}",
                        json_type_name(other)
                    ))
                    .at("status"),
                );
                None
            }
            None => {
                report.add(ShapeFinding::error("Missing required 'status' field"));
                None
            }
        }
    }

    fn validate_score(&self, object: &Map<String, Value>, report: &mut ShapeReport) {
        match object.get("compliance_score") {
            Some(Value::Number(n)) => {
                let within = n.as_f64().is_some_and(|score| (0.0..=10.0).contains(&score));
                if !within {
                    report.add(
                        ShapeFinding::error(format!(
                            "'compliance_score' must be between 0 and 10, got {}",
                            n
                        ))
                        .at("compliance_score"),
                    );
                }
            }
            Some(other) => {
                report.add(
                    ShapeFinding::error(format!(
                        "'compliance_score' must be a number, got {}",
                        json_type_name(other)
                    ))
                    .at("compliance_score"),
                );
            }
            None => {
                report.add(ShapeFinding::error("Missing required 'compliance_score' field"));
            }
        }
    }

    /// Returns the highest valid severity seen
    fn validate_issues(
        &self,
        object: &Map<String, Value>,
        report: &mut ShapeReport,
    ) -> Option<Severity> {
        let issues = match object.get("issues") {
            None | Some(Value::Null) => return None,
            Some(Value::Array(arr)) => arr,
            Some(other) => {
                report.add(
                    ShapeFinding::error(format!(
                        "'issues' must be an array, got {}",
                        json_type_name(other)
                    ))
                    .at("issues"),
                );
                return None;
            }
        };

        let mut max_severity = None;
        for (idx, issue) in issues.iter().enumerate() {
            if let Some(severity) = self.validate_issue(issue, idx, report) {
                max_severity = max_severity.max(Some(severity));
            }
            report.issues_checked += 1;
        }
        max_severity
    }

    fn validate_issue(&self, issue: &Value, idx: usize, report: &mut ShapeReport) -> Option<Severity> {
        let location = format!("issues[{}]", idx);

        let Some(object) = issue.as_object() else {
            report.add(
                ShapeFinding::error(format!(
                    "Issue must be an object, got {}",
                    json_type_name(issue)
                ))
                .at(location),
            );
            return None;
        };

        match object.get("category").and_then(Value::as_str) {
            Some(category) => {
                if let Err(msg) = category.parse::<ValidationCategory>() {
                    report.add(ShapeFinding::error(msg).at(format!("{}.category", location)));
                }
            }
            None => report.add(
                ShapeFinding::error("Missing or invalid 'category'")
                    .at(format!("{}.category", location)),
            ),
        }

        for field in ISSUE_TEXT_FIELDS {
            if !object.get(field).is_some_and(Value::is_string) {
                report.add(
                    ShapeFinding::error(format!("Missing or invalid '{}'", field))
                        .at(format!("{}.{}", location, field)),
                );
            }
        }

        match object.get("severity").and_then(Value::as_str) {
            Some(severity) => match severity.parse::<Severity>() {
                Ok(severity) => Some(severity),
                Err(msg) => {
                    report.add(ShapeFinding::error(msg).at(format!("{}.severity", location)));
                    None
                }
            },
            None => {
                report.add(
                    ShapeFinding::error("Missing or invalid 'severity'")
                        .at(format!("{}.severity", location)),
                );
                None
            }
        }
    }

    fn validate_text_fields(&self, object: &Map<String, Value>, report: &mut ShapeReport) {
        match object.get("suggestions") {
            Some(Value::String(_)) => {}
            Some(other) => report.add(
                ShapeFinding::error(format!(
                    "'suggestions' must be a string, got {}",
                    json_type_name(other)
                ))
                .at("suggestions"),
            ),
            None => report.add(ShapeFinding::error("Missing required 'suggestions' field")),
        }

        match object.get("reading_level") {
            None | Some(Value::Null) | Some(Value::String(_)) => {}
            Some(other) => report.add(
                ShapeFinding::error(format!(
                    "'reading_level' must be a string, got {}",
                    json_type_name(other)
                ))
                .at("reading_level"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_payload() -> Value {
        json!({
            "status": "non_compliant",
            "compliance_score": 6.5,
            "issues": [{
                "category": "Prohibited Language",
                "rule_violated": "No exaggerated superlatives",
                "current_text": "amazing rewards",
                "issue": "Superlative without substantiation",
                "suggested_fix": "competitive rewards",
                "severity": "medium"
            }],
            "suggestions": "Tone down promotional language.",
            "word_count": 11,
            "reading_level": "Grade 8 or below"
        })
    }

    #[test]
    fn test_valid_response() {
        let report = ResponseValidator::new().validate(&valid_payload());
        assert!(report.is_valid(), "{}", report.error_summary());
        assert_eq!(report.issues_checked, 1);
        assert_eq!(report.warnings().count(), 0);
    }

    #[test]
    fn test_non_object() {
        let report = ResponseValidator::new().validate(&json!([1, 2]));
        assert!(!report.is_valid());
        assert!(report.error_summary().contains("array"));
    }

    #[test]
    fn test_unknown_status() {
        let mut payload = valid_payload();
        payload["status"] = json!("mostly_fine");
        let report = ResponseValidator::new().validate(&payload);
        assert!(!report.is_valid());
        assert!(report.error_summary().contains("status"));
    }

    #[test]
    fn test_score_out_of_range_or_wrong_type() {
        let validator = ResponseValidator::new();

        let mut payload = valid_payload();
        payload["compliance_score"] = json!(11);
        assert!(!validator.validate(&payload).is_valid());

        payload["compliance_score"] = json!(-0.5);
        assert!(!validator.validate(&payload).is_valid());

        payload["compliance_score"] = json!("7");
        assert!(!validator.validate(&payload).is_valid());

        payload["compliance_score"] = json!(10);
        assert!(validator.validate(&payload).is_valid());

        payload["compliance_score"] = json!(0);
        assert!(validator.validate(&payload).is_valid());
    }

    #[test]
    fn test_missing_issues_is_allowed() {
        let validator = ResponseValidator::new();
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("issues");
        assert!(validator.validate(&payload).is_valid());

        payload["issues"] = Value::Null;
        assert!(validator.validate(&payload).is_valid());
    }

    #[test]
    fn test_issue_with_unknown_category() {
        let mut payload = valid_payload();
        payload["issues"][0]["category"] = json!("Tone");
        let report = ResponseValidator::new().validate(&payload);
        assert!(!report.is_valid());
        assert!(report.error_summary().contains("issues[0].category"));
    }

    #[test]
    fn test_issue_with_unknown_severity() {
        let mut payload = valid_payload();
        payload["issues"][0]["severity"] = json!("critical");
        let report = ResponseValidator::new().validate(&payload);
        assert!(!report.is_valid());
        assert!(report.error_summary().contains("issues[0].severity"));
    }

    #[test]
    fn test_issue_missing_text_field() {
        let mut payload = valid_payload();
        payload["issues"][0]
            .as_object_mut()
            .unwrap()
            .remove("suggested_fix");
        let report = ResponseValidator::new().validate(&payload);
        assert!(!report.is_valid());
        assert!(report.error_summary().contains("suggested_fix"));
    }

    #[test]
    fn test_missing_suggestions() {
        let mut payload = valid_payload();
        payload.as_object_mut().unwrap().remove("suggestions");
        assert!(!ResponseValidator::new().validate(&payload).is_valid());
    }

    #[test]
    fn test_reading_level_must_be_string() {
        let mut payload = valid_payload();
        payload["reading_level"] = json!(8);
        assert!(!ResponseValidator::new().validate(&payload).is_valid());
    }

    #[test]
    fn test_word_count_is_not_checked() {
        let mut payload = valid_payload();
        payload["word_count"] = json!("many");
        assert!(ResponseValidator::new().validate(&payload).is_valid());
    }

    #[test]
    fn test_warnings_do_not_invalidate() {
        let mut payload = valid_payload();
        payload["status"] = json!("compliant");
        payload["issues"][0]["severity"] = json!("high");
        payload["confidence"] = json!(0.9);

        let report = ResponseValidator::new().validate(&payload);
        assert!(report.is_valid());
        assert_eq!(report.warnings().count(), 2);
    }
}
