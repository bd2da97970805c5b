use crate::config::Config;
use crate::services::gemini_provider::{GeminiProvider, GeminiSettings};
use crate::services::llm_provider::{LlmProvider, ProviderError, ProviderKind};
use crate::services::openai_provider::{OpenAiProvider, OpenAiSettings};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;

/// One long-lived adapter per configured backend, built at startup.
#[derive(Clone)]
pub struct ProviderRegistry {
    providers: Arc<HashMap<ProviderKind, Arc<dyn LlmProvider>>>,
    default_kind: ProviderKind,
}

impl ProviderRegistry {
    pub fn from_config(config: &Config, client: Client) -> Self {
        let mut providers: HashMap<ProviderKind, Arc<dyn LlmProvider>> = HashMap::new();

        if let Some(api_key) = &config.gemini_api_key {
            let settings = GeminiSettings {
                api_key: api_key.clone(),
                text_model: config.gemini_text_model.clone(),
                image_model: config.gemini_image_model.clone(),
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
                timeout: config.http_timeout(),
            };
            providers.insert(
                ProviderKind::Gemini,
                Arc::new(GeminiProvider::new(settings, client.clone())),
            );
        }

        if let Some(api_key) = &config.openai_api_key {
            let settings = OpenAiSettings {
                api_key: api_key.clone(),
                model: config.openai_model.clone(),
                image_model: config.openai_image_model.clone(),
                temperature: config.temperature,
                max_output_tokens: config.max_output_tokens,
                timeout: config.http_timeout(),
            };
            providers.insert(
                ProviderKind::OpenAi,
                Arc::new(OpenAiProvider::new(settings, client)),
            );
        }

        tracing::info!(
            default = %config.default_provider,
            configured = ?providers.keys().collect::<Vec<_>>(),
            "LLM providers ready"
        );

        Self {
            providers: Arc::new(providers),
            default_kind: config.default_provider,
        }
    }

    pub fn from_providers(
        default_kind: ProviderKind,
        providers: impl IntoIterator<Item = (ProviderKind, Arc<dyn LlmProvider>)>,
    ) -> Self {
        Self {
            providers: Arc::new(providers.into_iter().collect()),
            default_kind,
        }
    }

    pub fn default_kind(&self) -> ProviderKind {
        self.default_kind
    }

    pub fn configured(&self) -> Vec<ProviderKind> {
        let mut kinds: Vec<_> = self.providers.keys().copied().collect();
        kinds.sort_by_key(|k| k.as_str());
        kinds
    }

    /// Returns the requested adapter, or the default one when `kind` is `None`.
    pub fn get(&self, kind: Option<ProviderKind>) -> Result<Arc<dyn LlmProvider>, ProviderError> {
        let kind = kind.unwrap_or(self.default_kind);
        self.providers
            .get(&kind)
            .cloned()
            .ok_or_else(|| ProviderError::NotConfigured(kind.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::llm_provider::MockLlmProvider;

    fn mock(name: &'static str) -> Arc<dyn LlmProvider> {
        let mut provider = MockLlmProvider::new();
        provider.expect_name().return_const(name);
        Arc::new(provider)
    }

    #[test]
    fn resolves_default_and_named_providers() {
        let registry = ProviderRegistry::from_providers(
            ProviderKind::Gemini,
            [(ProviderKind::Gemini, mock("gemini"))],
        );
        assert_eq!(registry.get(None).unwrap().name(), "gemini");
        assert_eq!(registry.get(Some(ProviderKind::Gemini)).unwrap().name(), "gemini");
        assert!(matches!(
            registry.get(Some(ProviderKind::OpenAi)),
            Err(ProviderError::NotConfigured(name)) if name == "openai"
        ));
    }

    #[test]
    fn lookups_share_one_instance() {
        let registry = ProviderRegistry::from_providers(
            ProviderKind::OpenAi,
            [(ProviderKind::OpenAi, mock("openai"))],
        );
        let first = registry.get(None).unwrap();
        let second = registry.clone().get(None).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
    }
}
