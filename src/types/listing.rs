//! Listing validation data model
//!
//! Closed enumerations are enforced at deserialization: any category,
//! severity or status outside the known set fails to parse.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy area an issue belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValidationCategory {
    #[serde(rename = "Regulatory & Compliance")]
    RegulatoryCompliance,
    #[serde(rename = "Content Quality")]
    ContentQuality,
    #[serde(rename = "User Experience")]
    UserExperience,
    #[serde(rename = "Brand & Tone Alignment")]
    BrandTone,
    #[serde(rename = "Prohibited Language")]
    ProhibitedLanguage,
    #[serde(rename = "Ethical Standards")]
    EthicalStandards,
}

impl ValidationCategory {
    pub const ALL: [ValidationCategory; 6] = [
        ValidationCategory::RegulatoryCompliance,
        ValidationCategory::ContentQuality,
        ValidationCategory::UserExperience,
        ValidationCategory::BrandTone,
        ValidationCategory::ProhibitedLanguage,
        ValidationCategory::EthicalStandards,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationCategory::RegulatoryCompliance => "Regulatory & Compliance",
            ValidationCategory::ContentQuality => "Content Quality",
            ValidationCategory::UserExperience => "User Experience",
            ValidationCategory::BrandTone => "Brand & Tone Alignment",
            ValidationCategory::ProhibitedLanguage => "Prohibited Language",
            ValidationCategory::EthicalStandards => "Ethical Standards",
        }
    }
}

impl fmt::Display for ValidationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ValidationCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("Unknown validation category: {}", s))
    }
}

/// Issue severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Low, Severity::Medium, Severity::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Low => "low",
            Severity::Medium => "medium",
            Severity::High => "high",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|sev| sev.as_str() == s)
            .ok_or_else(|| format!("Unknown severity: {}. Valid values: low, medium, high", s))
    }
}

/// Overall verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceStatus {
    Compliant,
    NonCompliant,
}

impl ComplianceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplianceStatus::Compliant => "compliant",
            ComplianceStatus::NonCompliant => "non_compliant",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ComplianceStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compliant" => Ok(ComplianceStatus::Compliant),
            "non_compliant" => Ok(ComplianceStatus::NonCompliant),
            _ => Err(format!(
                "Unknown status: {}. Valid values: compliant, non_compliant",
                s
            )),
        }
    }
}

/// A single policy violation found in a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub category: ValidationCategory,
    pub rule_violated: String,
    /// Verbatim excerpt from the listing, or "N/A"
    pub current_text: String,
    pub issue: String,
    pub suggested_fix: String,
    pub severity: Severity,
}

/// Structured verdict for one listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub status: ComplianceStatus,
    /// 0.0..=10.0
    pub compliance_score: f64,
    /// Discovery order from the producer
    #[serde(default)]
    pub issues: Vec<Issue>,
    pub suggestions: String,
    /// Always recomputed from the submitted listing
    pub word_count: usize,
    #[serde(default)]
    pub reading_level: Option<String>,
}

impl ValidationResult {
    pub fn is_compliant(&self) -> bool {
        self.status == ComplianceStatus::Compliant
    }

    /// Highest severity among the issues, if any
    pub fn max_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&ValidationCategory::BrandTone).unwrap();
        assert_eq!(json, "\"Brand & Tone Alignment\"");

        let parsed: ValidationCategory =
            serde_json::from_str("\"Regulatory & Compliance\"").unwrap();
        assert_eq!(parsed, ValidationCategory::RegulatoryCompliance);
    }

    #[test]
    fn test_category_rejects_unknown() {
        assert!(serde_json::from_str::<ValidationCategory>("\"Tone\"").is_err());
        assert!("content quality".parse::<ValidationCategory>().is_err());
        assert_eq!(
            "Ethical Standards".parse::<ValidationCategory>().unwrap(),
            ValidationCategory::EthicalStandards
        );
    }

    #[test]
    fn test_severity_and_status() {
        assert_eq!(serde_json::to_string(&Severity::Medium).unwrap(), "\"medium\"");
        assert!(serde_json::from_str::<Severity>("\"critical\"").is_err());
        assert_eq!(
            serde_json::to_string(&ComplianceStatus::NonCompliant).unwrap(),
            "\"non_compliant\""
        );
        assert_eq!(
            "compliant".parse::<ComplianceStatus>().unwrap(),
            ComplianceStatus::Compliant
        );
        assert!(Severity::High > Severity::Low);
    }

    #[test]
    fn test_result_field_names() {
        let result = ValidationResult {
            status: ComplianceStatus::Compliant,
            compliance_score: 9.5,
            issues: Vec::new(),
            suggestions: "Looks good".to_string(),
            word_count: 12,
            reading_level: Some("Grade 8 or below".to_string()),
        };

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["status"], "compliant");
        assert_eq!(value["compliance_score"], 9.5);
        assert_eq!(value["word_count"], 12);
        assert!(value["issues"].as_array().unwrap().is_empty());
        assert!(result.is_compliant());
        assert_eq!(result.max_severity(), None);
    }
}
