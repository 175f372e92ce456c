//! Prompt Builder System
//!
//! Composes the validation prompt from three parts:
//!
//! 1. **Policy template**: the human-authored policy document, loaded once
//!    at startup, containing the `{{ listing }}` placeholder
//! 2. **Output contract**: a fixed block demanding a single JSON object with
//!    the verdict shape and the closed category/severity vocabularies
//! 3. **Listing**: substituted verbatim into the placeholder per request
//!
//! A missing or unreadable template file is replaced by a built-in minimal
//! policy. The substitution is not an error, but it is logged at `warn`.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::constants::policy::LISTING_PLACEHOLDER;
use crate::types::{Severity, ValidationCategory};

/// Prompt section types
#[derive(Debug, Clone)]
pub enum PromptSection {
    /// Raw text section with optional header
    Text {
        header: Option<String>,
        content: String,
    },
    /// Code block with language
    Code { language: String, content: String },
    /// Bulleted list with a lead-in line
    List { lead: String, items: Vec<String> },
    /// Hard restrictions the producer must follow
    Focus {
        target: String,
        restrictions: Vec<String>,
    },
    /// Custom section
    Custom(String),
}

/// Prompt builder for consistent prompt construction
#[derive(Debug, Clone, Default)]
pub struct PromptBuilder {
    sections: Vec<PromptSection>,
}

impl PromptBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add text section
    pub fn text(mut self, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: None,
            content: content.to_string(),
        });
        self
    }

    /// Add text section with header
    pub fn section(mut self, header: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Text {
            header: Some(header.to_string()),
            content: content.to_string(),
        });
        self
    }

    /// Add code block
    pub fn code(mut self, language: &str, content: &str) -> Self {
        self.sections.push(PromptSection::Code {
            language: language.to_string(),
            content: content.to_string(),
        });
        self
    }

    /// Add bulleted list
    pub fn list(mut self, lead: &str, items: Vec<String>) -> Self {
        self.sections.push(PromptSection::List {
            lead: lead.to_string(),
            items,
        });
        self
    }

    /// Add focus enforcement section
    pub fn focus(mut self, target: &str, restrictions: Vec<&str>) -> Self {
        self.sections.push(PromptSection::Focus {
            target: target.to_string(),
            restrictions: restrictions.into_iter().map(String::from).collect(),
        });
        self
    }

    /// Add custom section
    pub fn custom(mut self, content: &str) -> Self {
        self.sections
            .push(PromptSection::Custom(content.to_string()));
        self
    }

    /// Build the final prompt string
    pub fn build(self) -> String {
        let mut prompt = String::new();

        for section in self.sections {
            match section {
                PromptSection::Text { header, content } => {
                    if let Some(h) = header {
                        prompt.push_str(&format!("# {}\n\n", h));
                    }
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
                PromptSection::Code { language, content } => {
                    prompt.push_str(&format!("```{}\n", language));
                    prompt.push_str(&content);
                    prompt.push_str("\n```\n\n");
                }
                PromptSection::List { lead, items } => {
                    prompt.push_str(&lead);
                    prompt.push('\n');
                    for item in items {
                        prompt.push_str(&format!("- {}\n", item));
                    }
                    prompt.push('\n');
                }
                PromptSection::Focus {
                    target,
                    restrictions,
                } => {
                    prompt.push_str("<FOCUS>\n");
                    prompt.push_str(&format!("IMPORTANT: {}\n", target));
                    for restriction in restrictions {
                        prompt.push_str(&format!("- {}\n", restriction));
                    }
                    prompt.push_str("</FOCUS>\n\n");
                }
                PromptSection::Custom(content) => {
                    prompt.push_str(&content);
                    prompt.push_str("\n\n");
                }
            }
        }

        prompt.trim_end().to_string()
    }
}

// =============================================================================
// Policy Template
// =============================================================================

const BUILT_IN_POLICY: &str = "You are an AI validator for credit card marketplace listings. Validate the listing against these standards:

1. Regulatory & Compliance: APR disclosure, fee transparency, credit requirements
2. Content Quality: Clear language, proper grammar, completeness
3. User Experience: Appropriate length (100-300 words), readability
4. Brand & Tone Alignment: Professional, factual, not overly promotional
5. Prohibited Language: No misleading claims, exaggerated superlatives, vague terms
6. Ethical Standards: Inclusive language, fair representation

Listing to validate:

{{ listing }}";

/// Where the policy text came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    File(PathBuf),
    BuiltIn,
}

impl std::fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateSource::File(path) => write!(f, "{}", path.display()),
            TemplateSource::BuiltIn => write!(f, "built-in"),
        }
    }
}

/// Base policy document with a listing placeholder
#[derive(Debug, Clone)]
pub struct PolicyTemplate {
    text: String,
    source: TemplateSource,
}

impl PolicyTemplate {
    /// Load from a UTF-8 file, substituting the built-in policy on any read failure
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) if !text.trim().is_empty() => {
                debug!("Loaded policy template from {}", path.display());
                Self {
                    text,
                    source: TemplateSource::File(path.to_path_buf()),
                }
            }
            Ok(_) => {
                warn!(
                    "Policy template {} is empty, using built-in policy",
                    path.display()
                );
                Self::built_in()
            }
            Err(e) => {
                warn!(
                    "Policy template {} unavailable ({}), using built-in policy",
                    path.display(),
                    e
                );
                Self::built_in()
            }
        }
    }

    pub fn built_in() -> Self {
        Self {
            text: BUILT_IN_POLICY.to_string(),
            source: TemplateSource::BuiltIn,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    pub fn is_built_in(&self) -> bool {
        self.source == TemplateSource::BuiltIn
    }

    pub fn has_placeholder(&self) -> bool {
        self.text.contains(LISTING_PLACEHOLDER)
    }
}

// =============================================================================
// Validation Prompt
// =============================================================================

/// Output contract appended to every policy template
pub fn output_contract() -> String {
    let shape = r#"{
    "status": "compliant" or "non_compliant",
    "compliance_score": <float between 0-10>,
    "issues": [
        {
            "category": "<one of the allowed categories>",
            "rule_violated": "<specific rule name>",
            "current_text": "<exact text from listing that violates the rule>",
            "issue": "<description of the issue>",
            "suggested_fix": "<specific suggested replacement>",
            "severity": "<one of the allowed severities>"
        }
    ],
    "suggestions": "<overall suggestions for improvement>",
    "word_count": <number of words in the listing>,
    "reading_level": "<estimated reading level>"
}"#;

    PromptBuilder::new()
        .text("IMPORTANT: You must respond with a valid JSON object in the following format:")
        .code("json", shape)
        .list(
            "Allowed category values:",
            ValidationCategory::ALL
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
        )
        .list(
            "Allowed severity values:",
            Severity::ALL.iter().map(|s| s.as_str().to_string()).collect(),
        )
        .focus(
            "Only return the JSON object, no other text.",
            vec![
                "Do NOT wrap the JSON in markdown or code fences",
                "Do NOT add explanations before or after the JSON object",
                "Use \"N/A\" for current_text when no excerpt applies",
            ],
        )
        .build()
}

/// Composes the per-listing prompt from a loaded policy template
#[derive(Debug, Clone)]
pub struct ValidationPrompt {
    /// Template plus contract, still holding the placeholder
    skeleton: String,
    source: TemplateSource,
}

impl ValidationPrompt {
    pub fn new(template: &PolicyTemplate) -> Self {
        let base = if template.has_placeholder() {
            template.text().trim_end().to_string()
        } else {
            warn!(
                "Policy template {} has no {} placeholder, appending listing section",
                template.source(),
                LISTING_PLACEHOLDER
            );
            PromptBuilder::new()
                .custom(template.text().trim_end())
                .section("Listing", LISTING_PLACEHOLDER)
                .build()
        };

        let skeleton = format!("{}\n\n{}\n", base, output_contract());

        Self {
            skeleton,
            source: template.source().clone(),
        }
    }

    /// Substitute the listing verbatim into the placeholder
    pub fn build(&self, listing: &str) -> String {
        self.skeleton.replace(LISTING_PLACEHOLDER, listing)
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }
}
