use crate::models::writing::{EmailScenario, Survey};
use crate::services::llm_provider::ProviderKind;
use serde::Deserialize;
use validator::Validate;

/// `?provider=gemini|openai` on any model-backed route.
#[derive(Debug, Default, Deserialize)]
pub struct ProviderQuery {
    pub provider: Option<ProviderKind>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct WritingTask1ReviewRequest {
    #[validate(length(min = 1))]
    pub task_id: String,
    #[validate(length(min = 1))]
    pub user_text: String,
    #[validate(nested)]
    pub scenario: EmailScenario,
}

#[derive(Debug, Deserialize, Validate)]
pub struct WritingTask2ReviewRequest {
    #[validate(length(min = 1))]
    pub task_id: String,
    #[validate(length(min = 1))]
    pub user_text: String,
    #[validate(nested)]
    pub survey: Survey,
    #[validate(length(min = 1))]
    pub chosen_option: String,
}
