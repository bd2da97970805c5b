pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use crate::config::Config;
use crate::error::Result;
use crate::services::llm_provider::ProviderKind;
use crate::services::provider_registry::ProviderRegistry;
use crate::services::retry::RetryPolicy;
use crate::services::scoring_service::ScoringService;
use crate::services::speech_service::{Transcriber, WhisperTranscriber};
use crate::services::task_generator::TaskGenerator;
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub registry: ProviderRegistry,
    pub retry: RetryPolicy,
    pub transcriber: Arc<dyn Transcriber>,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self> {
        let http_client = Client::builder().timeout(config.http_timeout()).build()?;

        let registry = ProviderRegistry::from_config(&config, http_client.clone());
        let transcriber = WhisperTranscriber::new(
            config.openai_api_key.clone(),
            config.stt_model.clone(),
            http_client,
            config.http_timeout(),
        );
        let retry = config.retry_policy();

        Ok(Self::with_parts(config, registry, retry, Arc::new(transcriber)))
    }

    pub fn with_parts(
        config: Config,
        registry: ProviderRegistry,
        retry: RetryPolicy,
        transcriber: Arc<dyn Transcriber>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            registry,
            retry,
            transcriber,
        }
    }

    /// Generator bound to the requested backend, or the configured default.
    pub fn generator(&self, provider: Option<ProviderKind>) -> Result<TaskGenerator> {
        let provider = self.registry.get(provider)?;
        Ok(TaskGenerator::new(provider, self.retry))
    }

    pub fn scoring(&self, provider: Option<ProviderKind>) -> Result<ScoringService> {
        Ok(ScoringService::new(self.generator(provider)?))
    }
}
