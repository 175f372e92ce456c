//! Validation Client
//!
//! Sends one composed prompt to the generation service with fixed decoding
//! parameters and returns the raw text. No retries: a transport failure is
//! reported once and becomes a system-error verdict upstream.

use std::time::Duration;
use tracing::{debug, info};

use crate::ai::provider::{GenerationRequest, SharedProvider, create_provider};
use crate::ai::timeout::with_timeout;
use crate::config::LlmConfig;
use crate::constants::llm::SYSTEM_INSTRUCTION;
use crate::types::{PipelineFailure, Result};

/// Decoding parameters applied to every call
#[derive(Debug, Clone, PartialEq)]
pub struct DecodingParams {
    pub temperature: f32,
    pub max_tokens: usize,
    pub json_response: bool,
}

impl From<&LlmConfig> for DecodingParams {
    fn from(config: &LlmConfig) -> Self {
        Self {
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            json_response: config.json_response,
        }
    }
}

/// Thin wrapper over a shared provider; safe to call concurrently
#[derive(Clone)]
pub struct ValidationClient {
    provider: SharedProvider,
    params: DecodingParams,
    timeout: Duration,
}

impl std::fmt::Debug for ValidationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationClient")
            .field("provider", &self.provider.name())
            .field("model", &self.provider.model())
            .field("params", &self.params)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ValidationClient {
    /// Build the configured provider. Fails with `ServiceUnavailable` when
    /// no credential is available.
    pub fn from_config(config: &LlmConfig) -> Result<Self> {
        let provider = create_provider(config)?;
        Ok(Self::with_provider(
            provider,
            DecodingParams::from(config),
            Duration::from_secs(config.timeout_secs),
        ))
    }

    pub fn with_provider(
        provider: SharedProvider,
        params: DecodingParams,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            params,
            timeout,
        }
    }

    pub fn model(&self) -> &str {
        self.provider.model()
    }

    fn request(&self, prompt: &str) -> GenerationRequest {
        GenerationRequest {
            system: SYSTEM_INSTRUCTION.to_string(),
            prompt: prompt.to_string(),
            temperature: self.params.temperature,
            max_tokens: self.params.max_tokens,
            json_response: self.params.json_response,
        }
    }

    /// One outbound call; returns the untrusted payload text
    pub async fn invoke(&self, prompt: &str) -> std::result::Result<String, PipelineFailure> {
        let request = self.request(prompt);
        debug!("Prompt length: {} characters", prompt.len());

        let response = with_timeout(
            self.timeout,
            self.provider.generate(&request),
            "validation request",
        )
        .await
        .map_err(PipelineFailure::from)?;

        info!(
            "Received {} characters from {} in {}ms",
            response.content.len(),
            self.provider.name(),
            response.timing.total_ms
        );

        Ok(response.content)
    }
}
