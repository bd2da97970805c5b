use crate::models::images::{ImageGenerationRequest, ImageSize};
use crate::services::llm_provider::{GeneratedImage, LlmProvider, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;

const PROVIDER: &str = "openai";
const BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct OpenAiSettings {
    pub api_key: String,
    pub model: String,
    pub image_model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    settings: OpenAiSettings,
}

impl OpenAiProvider {
    pub fn new(settings: OpenAiSettings, client: Client) -> Self {
        Self { client, settings }
    }

    async fn post(&self, path: &str, payload: &JsonValue) -> Result<JsonValue, ProviderError> {
        let res = self
            .client
            .post(format!("{}{}", BASE_URL, path))
            .bearer_auth(&self.settings.api_key)
            .json(payload)
            .timeout(self.settings.timeout)
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: PROVIDER,
                source,
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            tracing::error!("OpenAI API Error {}: {}", status, text);
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body: text,
            });
        }

        res.json().await.map_err(|source| ProviderError::Http {
            provider: PROVIDER,
            source,
        })
    }
}

/// DALL-E 3 only accepts square or 1792-wide/tall sizes.
fn image_size(size: ImageSize) -> &'static str {
    match size {
        ImageSize::Wide => "1792x1024",
        ImageSize::Tall => "1024x1792",
        _ => "1024x1024",
    }
}

fn message_content(body: &JsonValue) -> Option<&str> {
    body.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, ProviderError> {
        let payload = json!({
            "model": self.settings.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": self.settings.temperature,
            "max_tokens": self.settings.max_output_tokens,
        });
        let body = self.post("/chat/completions", &payload).await?;

        if let Some(usage) = body.get("usage") {
            tracing::debug!(usage = %usage, "OpenAI token usage");
        }

        match message_content(&body) {
            Some(text) if !text.trim().is_empty() => Ok(text.to_string()),
            Some(_) => Err(ProviderError::EmptyResponse { provider: PROVIDER }),
            None => Err(ProviderError::InvalidResponse {
                provider: PROVIDER,
                reason: "missing choices[0].message.content".to_string(),
            }),
        }
    }

    async fn generate_image(&self, request: &ImageGenerationRequest) -> Result<GeneratedImage, ProviderError> {
        let quality = if request.quality == "high" { "hd" } else { "standard" };
        let payload = json!({
            "model": self.settings.image_model,
            "prompt": request.render_prompt(),
            "n": 1,
            "size": image_size(request.size),
            "quality": quality,
            "response_format": "b64_json",
        });
        let body = self.post("/images/generations", &payload).await?;

        body.get("data")
            .and_then(|d| d.get(0))
            .and_then(|d| d.get("b64_json"))
            .and_then(|d| d.as_str())
            .map(|data| GeneratedImage {
                data: data.to_string(),
                mime_type: "image/png".to_string(),
            })
            .ok_or_else(|| ProviderError::InvalidResponse {
                provider: PROVIDER,
                reason: "missing data[0].b64_json".to_string(),
            })
    }
}
