//! Speech-to-text for speaking submissions, backed by the OpenAI
//! transcription endpoint.

use crate::models::speaking::AudioSubmission;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::{multipart, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_CONFIDENCE: f64 = 0.8;
const WORDS_PER_MINUTE: f64 = 150.0;

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("Invalid audio data: {0}")]
    InvalidAudio(String),

    #[error("Speech-to-text is not configured")]
    NotConfigured,

    #[error("Transcription request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transcription API error {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No speech detected in audio")]
    EmptyTranscript,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptionResult {
    pub transcript: String,
    pub confidence: f64,
    pub audio_duration: f64,
    pub detected_language: String,
    pub model_used: String,
}

#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: &AudioSubmission) -> Result<TranscriptionResult, SpeechError>;

    async fn health_check(&self) -> bool;
}

#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    text: String,
    language: Option<String>,
    duration: Option<f64>,
    #[serde(default)]
    segments: Vec<Segment>,
}

#[derive(Debug, Deserialize)]
struct Segment {
    avg_logprob: Option<f64>,
    end: Option<f64>,
}

#[derive(Clone)]
pub struct WhisperTranscriber {
    client: Client,
    api_key: Option<String>,
    model: String,
    timeout: Duration,
}

impl WhisperTranscriber {
    pub fn new(api_key: Option<String>, model: String, client: Client, timeout: Duration) -> Self {
        Self {
            client,
            api_key,
            model,
            timeout,
        }
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio: &AudioSubmission) -> Result<TranscriptionResult, SpeechError> {
        let api_key = self.api_key.as_deref().ok_or(SpeechError::NotConfigured)?;
        let bytes = decode_audio(&audio.audio_data)?;
        let format = audio.audio_format.trim().to_ascii_lowercase();
        let mime = mime_for(&format).ok_or_else(|| {
            SpeechError::InvalidAudio(format!("unsupported audio format '{}'", audio.audio_format))
        })?;
        tracing::info!("Transcribing {} bytes of {} audio", bytes.len(), format);

        let file = multipart::Part::bytes(bytes)
            .file_name(format!("submission.{}", format))
            .mime_str(mime)?;
        let form = multipart::Form::new()
            .part("file", file)
            .text("model", self.model.clone())
            .text("language", "en")
            .text("response_format", "verbose_json");

        let res = self
            .client
            .post(format!("{}/audio/transcriptions", BASE_URL))
            .bearer_auth(api_key)
            .multipart(form)
            .timeout(self.timeout)
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            tracing::error!("Transcription API Error {}: {}", status, body);
            return Err(SpeechError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let verbose: VerboseTranscription = res.json().await?;
        let result = summarize(verbose, &self.model)?;
        tracing::info!(
            chars = result.transcript.len(),
            confidence = result.confidence,
            language = %result.detected_language,
            "Transcription completed"
        );
        Ok(result)
    }

    async fn health_check(&self) -> bool {
        self.api_key.is_some()
    }
}

/// Accepts plain base64 or a `data:<mime>;base64,` URL.
pub fn decode_audio(data: &str) -> Result<Vec<u8>, SpeechError> {
    let payload = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };
    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| SpeechError::InvalidAudio(e.to_string()))?;
    if bytes.is_empty() {
        return Err(SpeechError::InvalidAudio("audio payload is empty".to_string()));
    }
    Ok(bytes)
}

fn mime_for(format: &str) -> Option<&'static str> {
    match format {
        "webm" => Some("audio/webm"),
        "mp3" | "mpeg" => Some("audio/mpeg"),
        "wav" => Some("audio/wav"),
        "m4a" | "mp4" => Some("audio/mp4"),
        "ogg" => Some("audio/ogg"),
        _ => None,
    }
}

/// Mean of `clamp(avg_logprob + 1, 0, 1)` over segments that report it.
fn confidence(segments: &[Segment]) -> f64 {
    let scores: Vec<f64> = segments
        .iter()
        .filter_map(|s| s.avg_logprob)
        .map(|logprob| (logprob + 1.0).clamp(0.0, 1.0))
        .collect();
    if scores.is_empty() {
        DEFAULT_CONFIDENCE
    } else {
        scores.iter().sum::<f64>() / scores.len() as f64
    }
}

/// Reported duration, else end of the last segment, else a speaking-rate guess.
fn duration(verbose: &VerboseTranscription) -> f64 {
    verbose
        .duration
        .or_else(|| verbose.segments.last().and_then(|s| s.end))
        .unwrap_or_else(|| {
            let words = verbose.text.split_whitespace().count() as f64;
            (words / WORDS_PER_MINUTE * 60.0).clamp(1.0, 180.0)
        })
}

fn summarize(verbose: VerboseTranscription, model: &str) -> Result<TranscriptionResult, SpeechError> {
    let transcript = verbose.text.trim().to_string();
    if transcript.is_empty() {
        return Err(SpeechError::EmptyTranscript);
    }
    Ok(TranscriptionResult {
        confidence: confidence(&verbose.segments),
        audio_duration: duration(&verbose),
        detected_language: verbose.language.clone().unwrap_or_else(|| "en".to_string()),
        model_used: model.to_string(),
        transcript,
    })
}
