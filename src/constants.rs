//! Global Constants
//!
//! Centralized constants for configuration and tuning.
//! Fixed strings that appear in synthesized results live here too, so tests
//! and the fallback policy agree on them.

/// Generation service defaults
pub mod llm {
    /// Default provider name
    pub const DEFAULT_PROVIDER: &str = "openai";

    /// Default model
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

    /// Low randomness for repeatable verdicts
    pub const DEFAULT_TEMPERATURE: f32 = 0.1;

    /// Output cap for a single verdict
    pub const DEFAULT_MAX_TOKENS: usize = 2000;

    /// Request timeout (seconds)
    pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

    /// Environment variable consulted when no key is configured
    pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

    /// System instruction sent with every validation request
    pub const SYSTEM_INSTRUCTION: &str = "You are a marketplace validator that analyzes credit card listings for compliance. Always respond with valid JSON only.";
}

/// Policy template constants
pub mod policy {
    /// Token replaced by the verbatim listing text
    pub const LISTING_PLACEHOLDER: &str = "{{ listing }}";

    /// Default location of the human-authored policy document
    pub const DEFAULT_TEMPLATE_PATH: &str = "policy/marketplace_validator_prompt.txt";
}

/// Boundary-enforced request limits
pub mod request {
    /// Minimum listing length (characters)
    pub const MIN_LISTING_CHARS: usize = 10;

    /// Maximum listing length (characters)
    pub const MAX_LISTING_CHARS: usize = 5000;

    /// Concurrent validations in batch mode
    pub const DEFAULT_BATCH_CONCURRENCY: usize = 4;
}

/// Reading level heuristic thresholds
pub mod reading_level {
    pub const UNKNOWN: &str = "Unknown";
    pub const GRADE_12_PLUS: &str = "Grade 12+";
    pub const GRADE_10_12: &str = "Grade 10-12";
    pub const GRADE_8_OR_BELOW: &str = "Grade 8 or below";

    /// Average words per sentence above which text is "Grade 12+"
    pub const ADVANCED_SENTENCE_LEN: f64 = 20.0;
    /// Average characters per word above which text is "Grade 12+"
    pub const ADVANCED_WORD_LEN: f64 = 6.0;
    /// Average words per sentence above which text is "Grade 10-12"
    pub const INTERMEDIATE_SENTENCE_LEN: f64 = 15.0;
    /// Average characters per word above which text is "Grade 10-12"
    pub const INTERMEDIATE_WORD_LEN: f64 = 5.0;
}

/// Fallback result constants
pub mod fallback {
    /// Characters of raw producer output kept in a malformed-output result
    pub const RAW_EXCERPT_CHARS: usize = 200;

    pub const MALFORMED_SCORE: f64 = 5.0;
    pub const MALFORMED_RULE: &str = "Response Format";
    pub const MALFORMED_ISSUE: &str = "Unable to parse validation response";
    pub const MALFORMED_FIX: &str = "Please review the listing manually";
    pub const MALFORMED_SUGGESTIONS_PREFIX: &str =
        "Validation completed but response format was unexpected: ";

    pub const SYSTEM_SCORE: f64 = 0.0;
    pub const SYSTEM_RULE: &str = "System Error";
    pub const SYSTEM_FIX: &str = "Please try again or contact support";
    pub const SYSTEM_SUGGESTIONS: &str =
        "System error occurred during validation. Please try again.";

    /// Placeholder for issues without a listing excerpt
    pub const NO_EXCERPT: &str = "N/A";
}

/// Service state messages
pub mod service {
    pub const UNAVAILABLE_MESSAGE: &str =
        "Validator service is not available. Please check API configuration.";

    /// Preview length for listing text in logs
    pub const LOG_PREVIEW_CHARS: usize = 100;
}
