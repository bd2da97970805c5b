use crate::models::images::ImageGenerationRequest;
use crate::services::llm_provider::{GeneratedImage, LlmProvider, ProviderError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROVIDER: &str = "gemini";
const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: String,
    pub text_model: String,
    pub image_model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub timeout: Duration,
}

#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    settings: GeminiSettings,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(rename = "maxOutputTokens", skip_serializing_if = "Option::is_none")]
    max_output_tokens: Option<u32>,
    #[serde(rename = "responseModalities", skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<&'static str>>,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "usageMetadata")]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
    #[serde(rename = "inlineData")]
    inline_data: Option<InlineData>,
}

#[derive(Debug, Deserialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: Option<String>,
    data: String,
}

#[derive(Debug, Deserialize)]
struct UsageMetadata {
    #[serde(rename = "promptTokenCount")]
    prompt_token_count: Option<u64>,
    #[serde(rename = "candidatesTokenCount")]
    candidates_token_count: Option<u64>,
    #[serde(rename = "totalTokenCount")]
    total_token_count: Option<u64>,
}

impl GenerateResponse {
    fn parts(self) -> impl Iterator<Item = ResponsePart> {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts)
            .unwrap_or_default()
            .into_iter()
    }
}

impl GeminiProvider {
    pub fn new(settings: GeminiSettings, client: Client) -> Self {
        Self { client, settings }
    }

    async fn call(&self, model: &str, body: &GenerateRequest<'_>) -> Result<GenerateResponse, ProviderError> {
        let url = format!("{}/models/{}:generateContent", BASE_URL, model);
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.settings.api_key)
            .json(body)
            .timeout(self.settings.timeout)
            .send()
            .await
            .map_err(|source| ProviderError::Http {
                provider: PROVIDER,
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Gemini API Error {}: {}", status, body);
            return Err(ProviderError::Status {
                provider: PROVIDER,
                status: status.as_u16(),
                body,
            });
        }

        let parsed: GenerateResponse = response.json().await.map_err(|source| ProviderError::Http {
            provider: PROVIDER,
            source,
        })?;
        if let Some(usage) = &parsed.usage_metadata {
            tracing::debug!(
                model,
                prompt_tokens = usage.prompt_token_count,
                output_tokens = usage.candidates_token_count,
                total_tokens = usage.total_token_count,
                "Gemini token usage"
            );
        }
        Ok(parsed)
    }
}

#[async_trait]
impl LlmProvider for GeminiProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: Some(self.settings.temperature),
                max_output_tokens: Some(self.settings.max_output_tokens),
                response_modalities: None,
            },
        };

        let text: String = self
            .call(&self.settings.text_model, &body)
            .await?
            .parts()
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            return Err(ProviderError::EmptyResponse { provider: PROVIDER });
        }
        tracing::info!("Gemini returned {} characters", text.len());
        Ok(text)
    }

    async fn generate_image(&self, request: &ImageGenerationRequest) -> Result<GeneratedImage, ProviderError> {
        let prompt = request.render_prompt();
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![TextPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                temperature: None,
                max_output_tokens: None,
                response_modalities: Some(vec!["TEXT", "IMAGE"]),
            },
        };

        self.call(&self.settings.image_model, &body)
            .await?
            .parts()
            .find_map(|part| part.inline_data)
            .map(|inline| GeneratedImage {
                data: inline.data,
                mime_type: inline.mime_type.unwrap_or_else(|| "image/png".to_string()),
            })
            .ok_or_else(|| ProviderError::InvalidResponse {
                provider: PROVIDER,
                reason: "no image data in response".to_string(),
            })
    }
}
