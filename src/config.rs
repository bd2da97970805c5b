use crate::error::{Error, Result};
use crate::services::llm_provider::ProviderKind;
use crate::services::retry::RetryPolicy;
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_address: String,
    pub default_provider: ProviderKind,
    pub gemini_api_key: Option<String>,
    pub gemini_text_model: String,
    pub gemini_image_model: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_image_model: String,
    pub stt_model: String,
    pub temperature: f32,
    pub max_output_tokens: u32,
    pub http_timeout_secs: u64,
    pub retry_max_attempts: u32,
    pub retry_min_backoff_ms: u64,
    pub retry_max_backoff_ms: u64,
    pub max_body_bytes: usize,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok();

        let log_format = match get_env_or("LOG_FORMAT", "text").to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let config = Self {
            server_address: get_env_or("SERVER_ADDRESS", "0.0.0.0:8000"),
            default_provider: get_env_parse_or("LLM_PROVIDER", ProviderKind::Gemini)?,
            gemini_api_key: get_optional("GEMINI_API_KEY"),
            gemini_text_model: get_env_or("GEMINI_TEXT_MODEL", "gemini-2.0-flash-lite"),
            gemini_image_model: get_env_or(
                "GEMINI_IMAGE_MODEL",
                "gemini-2.0-flash-preview-image-generation",
            ),
            openai_api_key: get_optional("OPENAI_API_KEY"),
            openai_model: get_env_or("OPENAI_MODEL", "gpt-4o-mini"),
            openai_image_model: get_env_or("OPENAI_IMAGE_MODEL", "dall-e-3"),
            stt_model: get_env_or("STT_MODEL", "whisper-1"),
            temperature: get_env_parse_or("LLM_TEMPERATURE", 0.7)?,
            max_output_tokens: get_env_parse_or("LLM_MAX_OUTPUT_TOKENS", 8192)?,
            http_timeout_secs: get_env_parse_or("HTTP_TIMEOUT_SECS", 120)?,
            retry_max_attempts: get_env_parse_or("RETRY_MAX_ATTEMPTS", 3)?,
            retry_min_backoff_ms: get_env_parse_or("RETRY_MIN_BACKOFF_MS", 4_000)?,
            retry_max_backoff_ms: get_env_parse_or("RETRY_MAX_BACKOFF_MS", 10_000)?,
            max_body_bytes: get_env_parse_or("MAX_BODY_BYTES", 50 * 1024 * 1024)?,
            log_format,
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.gemini_api_key.is_none() && self.openai_api_key.is_none() {
            return Err(Error::Config(
                "Set at least one of GEMINI_API_KEY or OPENAI_API_KEY".to_string(),
            ));
        }
        if self.api_key_for(self.default_provider).is_none() {
            return Err(Error::Config(format!(
                "LLM_PROVIDER is '{}' but its API key is missing",
                self.default_provider
            )));
        }
        Ok(())
    }

    pub fn api_key_for(&self, kind: ProviderKind) -> Option<&str> {
        match kind {
            ProviderKind::Gemini => self.gemini_api_key.as_deref(),
            ProviderKind::OpenAi => self.openai_api_key.as_deref(),
        }
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry_max_attempts,
            Duration::from_millis(self.retry_min_backoff_ms),
            Duration::from_millis(self.retry_max_backoff_ms),
        )
    }
}

fn get_optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn get_env_or(name: &str, default: &str) -> String {
    get_optional(name).unwrap_or_else(|| default.to_string())
}

fn get_env_parse_or<T>(name: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match get_optional(name) {
        Some(raw) => raw
            .parse()
            .map_err(|e| Error::Config(format!("Invalid value for {}: {}", name, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    fn base() -> Config {
        Config {
            server_address: "127.0.0.1:0".into(),
            default_provider: ProviderKind::Gemini,
            gemini_api_key: Some("g-key".into()),
            gemini_text_model: "m".into(),
            gemini_image_model: "i".into(),
            openai_api_key: None,
            openai_model: "m".into(),
            openai_image_model: "i".into(),
            stt_model: "whisper-1".into(),
            temperature: 0.7,
            max_output_tokens: 1024,
            http_timeout_secs: 5,
            retry_max_attempts: 3,
            retry_min_backoff_ms: 4_000,
            retry_max_backoff_ms: 10_000,
            max_body_bytes: 1024,
            log_format: LogFormat::Text,
        }
    }

    #[test]
    fn default_provider_needs_its_key() {
        assert_ok!(base().validate());

        let mut config = base();
        config.default_provider = ProviderKind::OpenAi;
        assert!(matches!(assert_err!(config.validate()), Error::Config(_)));

        config.openai_api_key = Some("o-key".into());
        assert_ok!(config.validate());
    }

    #[test]
    fn no_keys_is_a_config_error() {
        let mut config = base();
        config.gemini_api_key = None;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn retry_policy_uses_configured_backoff() {
        let policy = base().retry_policy();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.min_backoff, Duration::from_secs(4));
        assert_eq!(policy.max_backoff, Duration::from_secs(10));
    }
}
