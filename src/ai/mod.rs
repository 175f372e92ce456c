//! AI Integration Layer
//!
//! Prompt composition, the outbound generation provider, and interpretation
//! of the untrusted text it returns.

pub mod prompt;
pub mod provider;
pub mod timeout;
pub mod validation;

pub use prompt::{
    PolicyTemplate, PromptBuilder, PromptSection, TemplateSource, ValidationPrompt,
    output_contract,
};
pub use provider::{
    ErrorCategory, ErrorClassifier, GenerationRequest, LlmError, LlmProvider, LlmResponse,
    OpenAiProvider, ResponseMetadata, ResponseTiming, SharedProvider, TokenUsage,
    create_provider,
};
pub use timeout::with_timeout;
pub use validation::{ResponseInterpreter, ResponseValidator, ShapeReport, extract_json};
