pub mod gemini_provider;
pub mod llm_provider;
pub mod normalizer;
pub mod openai_provider;
pub mod prompts;
pub mod provider_registry;
pub mod retry;
pub mod scoring_service;
pub mod speech_service;
pub mod task_generator;
