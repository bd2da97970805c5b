//! Contract every generative backend implements, plus the errors it reports.

use crate::models::images::ImageGenerationRequest;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const HEALTH_CHECK_PROMPT: &str = "Respond with exactly: 'HEALTH_CHECK_OK'";
pub const HEALTH_CHECK_TOKEN: &str = "HEALTH_CHECK_OK";

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider} request failed: {source}")]
    Http {
        provider: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{provider} API error {status}: {body}")]
    Status {
        provider: &'static str,
        status: u16,
        body: String,
    },

    #[error("{provider} returned no content")]
    EmptyResponse { provider: &'static str },

    #[error("{provider} returned an unexpected payload: {reason}")]
    InvalidResponse { provider: &'static str, reason: String },

    #[error("Provider '{0}' is not configured")]
    NotConfigured(String),
}

impl ProviderError {
    /// Transport faults, throttling and server errors are worth another try.
    /// Everything else will fail the same way again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Http { source, .. } => !source.is_builder() && !source.is_decode(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            Self::EmptyResponse { .. } => true,
            Self::InvalidResponse { .. } | Self::NotConfigured(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    /// Base64 encoded image bytes.
    pub data: String,
    pub mime_type: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LlmProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn generate_content(&self, prompt: &str) -> Result<String, ProviderError>;

    async fn generate_image(&self, request: &ImageGenerationRequest) -> Result<GeneratedImage, ProviderError>;

    async fn health_check(&self) -> bool {
        match self.generate_content(HEALTH_CHECK_PROMPT).await {
            Ok(reply) => reply.contains(HEALTH_CHECK_TOKEN),
            Err(e) => {
                tracing::warn!(provider = self.name(), error = %e, "Provider health check failed");
                false
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Gemini,
    #[serde(alias = "open_ai")]
    OpenAi,
}

impl ProviderKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Gemini => "gemini",
            Self::OpenAi => "openai",
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" | "open_ai" => Ok(Self::OpenAi),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}
