//! Listing Validator - LLM-Backed Compliance Checks for Card Listings
//!
//! Validates credit card marketplace listings against a written policy by
//! asking a generation service for a structured verdict, then enforcing the
//! verdict's shape locally.
//!
//! ## Core Features
//!
//! - **Policy Templates**: Human-authored policy document with a listing placeholder
//! - **Strict Interpretation**: Code-fence stripping, shape validation, closed enums
//! - **Local Metrics**: Word count and reading level computed from the listing itself
//! - **Graceful Degradation**: Malformed output and transport failures become verdicts
//!
//! ## Quick Start
//!
//! ```ignore
//! use listing_validator::{ConfigLoader, ValidatorService};
//!
//! let config = ConfigLoader::load()?;
//! let service = ValidatorService::from_config(&config)?;
//! let result = service.validate("Earn 2% cash back on every purchase.").await?;
//! println!("{} ({}/10)", result.status, result.compliance_score);
//! ```
//!
//! ## Modules
//!
//! - [`ai`]: Prompt composition, provider abstraction, response interpretation
//! - [`validator`]: Validation pipeline, text metrics, fallback policy
//! - [`config`]: Layered configuration
//! - [`types`]: Verdict data model and errors

pub mod ai;
pub mod cli;
pub mod config;
pub mod constants;
pub mod types;
pub mod validator;

// =============================================================================
// Core Re-exports
// =============================================================================

// Configuration
pub use config::{Config, ConfigLoader, LlmConfig, PolicyConfig, RequestConfig};

// Error Types
pub use types::error::{ErrorCategory, LlmError, PipelineFailure, Result, ValidatorError};

// Data Model
pub use types::{ComplianceStatus, Issue, Severity, ValidationCategory, ValidationResult};

// =============================================================================
// Pipeline Re-exports
// =============================================================================

pub use validator::{
    FallbackPolicy, HealthReport, ListingValidator, ValidationClient, ValidatorService,
    check_listing_bounds, estimate_reading_level, word_count,
};

pub use ai::{LlmProvider, PolicyTemplate, ResponseInterpreter, ValidationPrompt};
