//! Configuration Types
//!
//! All configuration structures with sensible defaults.
//! Supports global (~/.config/listing-validator/) and project
//! (.listing-validator/) level configuration.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{llm, policy, request};
use crate::types::{Result, ValidatorError};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Configuration version
    pub version: String,

    /// Generation service settings
    pub llm: LlmConfig,

    /// Policy template settings
    pub policy: PolicyConfig,

    /// Listing bounds and batch settings
    pub request: RequestConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            llm: LlmConfig::default(),
            policy: PolicyConfig::default(),
            request: RequestConfig::default(),
        }
    }
}

impl Config {
    /// Validate configuration values are within acceptable ranges.
    /// Returns `ValidatorError::Config` on validation failure.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ValidatorError::Config(format!(
                "LLM temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.timeout_secs == 0 {
            return Err(ValidatorError::Config(
                "LLM timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.llm.max_tokens == 0 {
            return Err(ValidatorError::Config(
                "LLM max_tokens must be greater than 0".to_string(),
            ));
        }

        if let Some(base) = &self.llm.api_base {
            let parsed = url::Url::parse(base).map_err(|e| {
                ValidatorError::Config(format!("LLM api_base is not a valid URL ({}): {}", e, base))
            })?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(ValidatorError::Config(format!(
                    "LLM api_base must use http or https, got {}",
                    parsed.scheme()
                )));
            }
        }

        if self.request.min_length > self.request.max_length {
            return Err(ValidatorError::Config(format!(
                "Request min_length ({}) must not exceed max_length ({})",
                self.request.min_length, self.request.max_length
            )));
        }

        if self.request.batch_concurrency == 0 {
            return Err(ValidatorError::Config(
                "Request batch_concurrency must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

// =============================================================================
// LLM Configuration
// =============================================================================

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name
    pub provider: String,

    /// Model name
    pub model: String,

    /// Override for the provider's API base URL
    pub api_base: Option<String>,

    /// Inline credential; prefer the environment variable
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Environment variable holding the credential
    pub api_key_env: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Low temperature keeps verdicts consistent between runs
    pub temperature: f32,

    /// Upper bound on generated tokens
    pub max_tokens: usize,

    /// Ask the service for a JSON object response
    pub json_response: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: llm::DEFAULT_PROVIDER.to_string(),
            model: llm::DEFAULT_MODEL.to_string(),
            api_base: None,
            api_key: None,
            api_key_env: llm::API_KEY_ENV.to_string(),
            timeout_secs: llm::DEFAULT_TIMEOUT_SECS,
            temperature: llm::DEFAULT_TEMPERATURE,
            max_tokens: llm::DEFAULT_MAX_TOKENS,
            json_response: true,
        }
    }
}

impl std::fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("api_key_env", &self.api_key_env)
            .field("timeout_secs", &self.timeout_secs)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("json_response", &self.json_response)
            .finish()
    }
}

impl LlmConfig {
    /// Inline key first, then the configured environment variable.
    /// Blank values count as absent.
    pub fn resolve_api_key(&self) -> Option<SecretString> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                std::env::var(&self.api_key_env)
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
            .map(SecretString::from)
    }
}

// =============================================================================
// Policy Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Policy document containing the listing placeholder
    pub template_path: PathBuf,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            template_path: PathBuf::from(policy::DEFAULT_TEMPLATE_PATH),
        }
    }
}

// =============================================================================
// Request Configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    /// Minimum listing length in characters
    pub min_length: usize,

    /// Maximum listing length in characters
    pub max_length: usize,

    /// Listings validated at once by `batch`
    pub batch_concurrency: usize,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            min_length: request::MIN_LISTING_CHARS,
            max_length: request::MAX_LISTING_CHARS,
            batch_concurrency: request::DEFAULT_BATCH_CONCURRENCY,
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
