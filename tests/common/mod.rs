#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use celpip_backend::config::{Config, LogFormat};
use celpip_backend::models::images::ImageGenerationRequest;
use celpip_backend::models::speaking::AudioSubmission;
use celpip_backend::services::llm_provider::{GeneratedImage, LlmProvider, ProviderError, ProviderKind};
use celpip_backend::services::provider_registry::ProviderRegistry;
use celpip_backend::services::retry::RetryPolicy;
use celpip_backend::services::speech_service::{SpeechError, Transcriber, TranscriptionResult};
use celpip_backend::AppState;
use serde_json::Value as JsonValue;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

/// Replays canned model replies in order.
pub struct ScriptedProvider {
    replies: Mutex<VecDeque<String>>,
    image: Option<GeneratedImage>,
}

impl ScriptedProvider {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            image: None,
        }
    }

    pub fn with_image(mut self, data: &str) -> Self {
        self.image = Some(GeneratedImage {
            data: data.to_string(),
            mime_type: "image/png".to_string(),
        });
        self
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn generate_content(&self, _prompt: &str) -> Result<String, ProviderError> {
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ProviderError::EmptyResponse { provider: "scripted" })
    }

    async fn generate_image(&self, _request: &ImageGenerationRequest) -> Result<GeneratedImage, ProviderError> {
        self.image.clone().ok_or_else(|| ProviderError::InvalidResponse {
            provider: "scripted",
            reason: "no image scripted".to_string(),
        })
    }
}

pub struct StubTranscriber {
    pub transcript: Option<String>,
}

#[async_trait]
impl Transcriber for StubTranscriber {
    async fn transcribe(&self, audio: &AudioSubmission) -> Result<TranscriptionResult, SpeechError> {
        let transcript = self.transcript.clone().ok_or(SpeechError::EmptyTranscript)?;
        Ok(TranscriptionResult {
            transcript,
            confidence: 0.9,
            audio_duration: audio.duration_seconds,
            detected_language: "en".to_string(),
            model_used: "stub".to_string(),
        })
    }

    async fn health_check(&self) -> bool {
        self.transcript.is_some()
    }
}

pub fn test_config() -> Config {
    Config {
        server_address: "127.0.0.1:0".to_string(),
        default_provider: ProviderKind::Gemini,
        gemini_api_key: Some("test-key".to_string()),
        gemini_text_model: "gemini-test".to_string(),
        gemini_image_model: "gemini-image-test".to_string(),
        openai_api_key: None,
        openai_model: "gpt-test".to_string(),
        openai_image_model: "dall-e-test".to_string(),
        stt_model: "whisper-1".to_string(),
        temperature: 0.7,
        max_output_tokens: 1024,
        http_timeout_secs: 5,
        retry_max_attempts: 1,
        retry_min_backoff_ms: 0,
        retry_max_backoff_ms: 0,
        max_body_bytes: 1024 * 1024,
        log_format: LogFormat::Text,
    }
}

pub fn app_with(provider: ScriptedProvider, transcript: Option<&str>) -> Router {
    let provider: Arc<dyn LlmProvider> = Arc::new(provider);
    let registry = ProviderRegistry::from_providers(ProviderKind::Gemini, [(ProviderKind::Gemini, provider)]);
    let transcriber = StubTranscriber {
        transcript: transcript.map(str::to_string),
    };
    let state = AppState::with_parts(test_config(), registry, RetryPolicy::none(), Arc::new(transcriber));
    celpip_backend::routes::router(state)
}

pub fn app(replies: &[&str]) -> Router {
    app_with(ScriptedProvider::new(replies), None)
}

pub async fn send(app: Router, method: &str, uri: &str, body: Option<JsonValue>) -> (StatusCode, JsonValue) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    let res = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, json)
}
