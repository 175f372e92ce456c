pub mod error;
pub mod listing;
pub mod utils;

pub use error::{
    ErrorCategory, ErrorClassifier, LlmError, PipelineFailure, Result, ValidatorError,
};
pub use listing::{ComplianceStatus, Issue, Severity, ValidationCategory, ValidationResult};
pub use utils::{json_is_blank, json_type_name, preview, truncate_chars};
