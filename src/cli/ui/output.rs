use console::{StyledObject, style};

use crate::types::{Severity, ValidationResult};
use crate::validator::HealthReport;

pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn header(&self, message: &str) {
        println!("\n{}", style(message).bold().underlined());
    }

    pub fn section(&self, message: &str) {
        println!("\n{}", style(message).bold());
        println!("{}", "─".repeat(40));
    }

    /// Human-readable verdict
    pub fn result(&self, result: &ValidationResult) {
        let status = if result.is_compliant() {
            style(result.status.as_str()).green().bold()
        } else {
            style(result.status.as_str()).red().bold()
        };

        println!(
            "{} {} ({}/10)",
            style("Status:").bold(),
            status,
            result.compliance_score
        );
        println!(
            "{} {}  {} {}",
            style("Words:").dim(),
            result.word_count,
            style("Reading level:").dim(),
            result.reading_level.as_deref().unwrap_or("Unknown")
        );

        if result.issues.is_empty() {
            self.success("No issues found");
        } else {
            self.section(&format!("Issues ({})", result.issues.len()));
            for (i, issue) in result.issues.iter().enumerate() {
                println!(
                    "{}. [{}] {} / {}",
                    i + 1,
                    severity_label(issue.severity),
                    issue.category,
                    issue.rule_violated
                );
                println!("   {} {}", style("Text:").dim(), issue.current_text);
                println!("   {} {}", style("Issue:").dim(), issue.issue);
                println!("   {} {}", style("Fix:").dim(), issue.suggested_fix);
            }
        }

        if !result.suggestions.is_empty() {
            self.section("Suggestions");
            println!("{}", result.suggestions);
        }
    }

    pub fn health(&self, report: &HealthReport) {
        if report.is_healthy() {
            self.success(&format!("Validator healthy (v{})", report.version));
        } else {
            self.warning(&format!(
                "Validator degraded (v{}): no API credential configured",
                report.version
            ));
        }
    }
}

fn severity_label(severity: Severity) -> StyledObject<&'static str> {
    match severity {
        Severity::High => style(severity.as_str()).red(),
        Severity::Medium => style(severity.as_str()).yellow(),
        Severity::Low => style(severity.as_str()).dim(),
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}
