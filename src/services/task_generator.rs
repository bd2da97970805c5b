//! Builds practice tasks: prompt, provider call (with retry), JSON repair,
//! identifier backfill, then typed construction.

use crate::models::images::{ImageGenerationRequest, ImageStyle};
use crate::models::listening::{
    ListeningPart1, ListeningPart2, ListeningPart3, ListeningPart4, ListeningPart5, ListeningPart6,
};
use crate::models::reading::{ReadingTask1, ReadingTask2, ReadingTask3, ReadingTask4};
use crate::models::speaking::{
    SpeakingScenario, SpeakingTask, SpeakingTask1, SpeakingTask2, SpeakingTask3, SpeakingTask4,
    SpeakingTask5, SpeakingTask6, SpeakingTask7, SpeakingTask8,
};
use crate::models::writing::{WritingTask1, WritingTask2};
use crate::services::llm_provider::{GeneratedImage, LlmProvider, ProviderError};
use crate::services::normalizer::{ensure_identifiers, extract_json, NormalizeError};
use crate::services::prompts::{listening, pick, reading, speaking, writing};
use crate::services::retry::RetryPolicy;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    #[error("response does not match the expected shape: {message}")]
    SchemaValidation { label: String, message: String },
}

impl GenerationError {
    pub(crate) fn schema(label: &str, message: impl ToString) -> Self {
        Self::SchemaValidation {
            label: label.to_string(),
            message: message.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct TaskGenerator {
    provider: Arc<dyn LlmProvider>,
    retry: RetryPolicy,
}

impl TaskGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, retry: RetryPolicy) -> Self {
        Self { provider, retry }
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    pub async fn health_check(&self) -> bool {
        self.provider.health_check().await
    }

    async fn complete(&self, prompt: &str, label: &str) -> Result<Map<String, Value>, GenerationError> {
        tracing::info!(label, provider = self.provider.name(), "Requesting model content");
        let raw = self
            .retry
            .run(label, || self.provider.generate_content(prompt))
            .await?;
        tracing::debug!(label, len = raw.len(), "Model content received");
        Ok(extract_json(&raw, label)?)
    }

    /// Generation path: repaired record, identifiers backfilled, `prepare`
    /// applied, then constructed as `T`.
    pub(crate) async fn generate_record<T: DeserializeOwned>(
        &self,
        prompt: &str,
        label: &str,
        prepare: impl FnOnce(&mut Map<String, Value>),
    ) -> Result<T, GenerationError> {
        let mut record = self.complete(prompt, label).await?;
        ensure_identifiers(&mut record);
        prepare(&mut record);
        construct(record, label)
    }

    /// Evaluation path: no identifiers to backfill.
    pub(crate) async fn evaluate_record<T: DeserializeOwned>(
        &self,
        prompt: &str,
        label: &str,
        prepare: impl FnOnce(&mut Map<String, Value>),
    ) -> Result<T, GenerationError> {
        let mut record = self.complete(prompt, label).await?;
        prepare(&mut record);
        construct(record, label)
    }

    // Reading

    pub async fn generate_reading_task1(&self) -> Result<ReadingTask1, GenerationError> {
        let prompt = reading::task1_prompt(pick(reading::TASK1_TOPICS), pick(reading::TASK1_CONTEXT_TYPES));
        self.generate_record(&prompt, "Reading Task 1", |_| {}).await
    }

    pub async fn generate_reading_task2(&self) -> Result<ReadingTask2, GenerationError> {
        let prompt = reading::task2_prompt(pick(reading::TASK2_TOPICS));
        self.generate_record(&prompt, "Reading Task 2", |_| {}).await
    }

    pub async fn generate_reading_task3(&self) -> Result<ReadingTask3, GenerationError> {
        let prompt = reading::task3_prompt(pick(reading::TASK3_TOPICS));
        self.generate_record(&prompt, "Reading Task 3", |_| {}).await
    }

    pub async fn generate_reading_task4(&self) -> Result<ReadingTask4, GenerationError> {
        let prompt = reading::task4_prompt(pick(reading::TASK4_TOPICS));
        self.generate_record(&prompt, "Reading Task 4", |_| {}).await
    }

    // Listening

    pub async fn generate_listening_part1(&self) -> Result<ListeningPart1, GenerationError> {
        let prompt = listening::part1_prompt(pick(listening::PART1_TOPICS));
        self.generate_record(&prompt, "Listening Part 1", |_| {}).await
    }

    pub async fn generate_listening_part2(&self) -> Result<ListeningPart2, GenerationError> {
        let prompt = listening::part2_prompt(pick(listening::PART2_TOPICS));
        self.generate_record(&prompt, "Listening Part 2", |_| {}).await
    }

    pub async fn generate_listening_part3(&self) -> Result<ListeningPart3, GenerationError> {
        let prompt = listening::part3_prompt(pick(listening::PART3_TOPICS));
        self.generate_record(&prompt, "Listening Part 3", |_| {}).await
    }

    pub async fn generate_listening_part4(&self) -> Result<ListeningPart4, GenerationError> {
        let prompt = listening::part4_prompt(pick(listening::PART4_TOPICS));
        self.generate_record(&prompt, "Listening Part 4", |_| {}).await
    }

    pub async fn generate_listening_part5(&self) -> Result<ListeningPart5, GenerationError> {
        let prompt = listening::part5_prompt(pick(listening::PART5_TOPICS));
        self.generate_record(&prompt, "Listening Part 5", |_| {}).await
    }

    pub async fn generate_listening_part6(&self) -> Result<ListeningPart6, GenerationError> {
        let prompt = listening::part6_prompt(pick(listening::PART6_TOPICS));
        self.generate_record(&prompt, "Listening Part 6", |_| {}).await
    }

    // Writing

    pub async fn generate_writing_task1(&self) -> Result<WritingTask1, GenerationError> {
        let (context, scenarios) = pick(writing::TASK1_SCENARIOS);
        let prompt = writing::task1_prompt(context, pick(scenarios), pick(writing::PURPOSES));
        self.generate_record(&prompt, "Writing Task 1", |_| {}).await
    }

    pub async fn generate_writing_task2(&self) -> Result<WritingTask2, GenerationError> {
        let prompt = writing::task2_prompt(&pick(writing::TASK2_SURVEYS));
        self.generate_record(&prompt, "Writing Task 2", |_| {}).await
    }

    // Speaking

    async fn generate_speaking<S: SpeakingScenario>(
        &self,
        prompt: String,
    ) -> Result<SpeakingTask<S>, GenerationError> {
        let label = S::TASK_TYPE.label();
        self.generate_record(&prompt, &label, SpeakingTask::<S>::apply_type_defaults)
            .await
    }

    pub async fn generate_speaking_task1(&self) -> Result<SpeakingTask1, GenerationError> {
        let prompt = speaking::task1_prompt(
            pick(speaking::TASK1_ADVICE_SCENARIOS),
            pick(speaking::PERSON_DESCRIPTIONS),
            pick(speaking::ADVICE_CONTEXTS),
        );
        self.generate_speaking(prompt).await
    }

    pub async fn generate_speaking_task2(&self) -> Result<SpeakingTask2, GenerationError> {
        let prompt = speaking::task2_prompt(
            pick(speaking::TASK2_EXPERIENCE_TOPICS),
            pick(speaking::EXPERIENCE_TYPES),
        );
        self.generate_speaking(prompt).await
    }

    pub async fn generate_speaking_task3(&self) -> Result<SpeakingTask3, GenerationError> {
        let prompt = speaking::task3_prompt(
            pick(speaking::TASK3_SCENE_TYPES),
            pick(speaking::TASK3_SCENE_SETTINGS),
        );
        let mut task: SpeakingTask3 = self.generate_speaking(prompt).await?;
        let scenario = &task.scenario;
        let description = scenario
            .image_description
            .as_deref()
            .unwrap_or(&scenario.scene_description);
        task.scene_image = self.speaking_image(description, &scenario.context).await;
        Ok(task)
    }

    pub async fn generate_speaking_task4(&self) -> Result<SpeakingTask4, GenerationError> {
        let prompt = speaking::task4_prompt(
            pick(speaking::TASK4_PREDICTION_SCENARIOS),
            pick(speaking::TASK4_PREDICTION_ELEMENTS),
        );
        let mut task: SpeakingTask4 = self.generate_speaking(prompt).await?;
        let scenario = &task.scenario;
        let description = scenario
            .image_description
            .as_deref()
            .unwrap_or(&scenario.scene_description);
        task.scene_image = self.speaking_image(description, &scenario.context).await;
        Ok(task)
    }

    pub async fn generate_speaking_task5(&self) -> Result<SpeakingTask5, GenerationError> {
        let prompt = speaking::task5_prompt(
            pick(speaking::TASK5_COMPARISON_SCENARIOS),
            pick(speaking::TASK5_DECISION_MAKERS),
            pick(speaking::TASK5_CATEGORIES),
        );
        let mut task: SpeakingTask5 = self.generate_speaking(prompt).await?;
        let scenario = &task.scenario;
        if let Some(description) = &scenario.option_a.image_description {
            task.option_a_image = self.speaking_image(description, &scenario.context).await;
        }
        if let Some(description) = &scenario.option_b.image_description {
            task.option_b_image = self.speaking_image(description, &scenario.context).await;
        }
        Ok(task)
    }

    pub async fn generate_speaking_task6(&self) -> Result<SpeakingTask6, GenerationError> {
        let prompt = speaking::task6_prompt(
            pick(speaking::TASK6_DIFFICULT_SITUATIONS),
            pick(speaking::TASK6_RELATIONSHIP_CONTEXTS),
        );
        self.generate_speaking(prompt).await
    }

    pub async fn generate_speaking_task7(&self) -> Result<SpeakingTask7, GenerationError> {
        let prompt = speaking::task7_prompt(
            pick(speaking::TASK7_OPINION_TOPICS),
            pick(speaking::TASK7_CONTEXT_TYPES),
        );
        self.generate_speaking(prompt).await
    }

    pub async fn generate_speaking_task8(&self) -> Result<SpeakingTask8, GenerationError> {
        let prompt = speaking::task8_prompt(
            pick(speaking::TASK8_UNUSUAL_SITUATIONS),
            pick(speaking::TASK8_UNUSUAL_CONTEXTS),
        );
        let mut task: SpeakingTask8 = self.generate_speaking(prompt).await?;
        let scenario = &task.scenario;
        let description = scenario
            .image_description
            .as_deref()
            .unwrap_or(&scenario.situation_description);
        task.situation_image = self.speaking_image(description, &scenario.context).await;
        Ok(task)
    }

    // Images

    pub async fn generate_image(
        &self,
        request: &ImageGenerationRequest,
    ) -> Result<GeneratedImage, GenerationError> {
        tracing::info!(
            provider = self.provider.name(),
            style = request.style.as_str(),
            size = request.size.as_str(),
            "Generating image"
        );
        let image = self
            .retry
            .run("image generation", || self.provider.generate_image(request))
            .await?;
        Ok(image)
    }

    /// Picture for a speaking task. Failures are logged and leave the task
    /// without an image.
    async fn speaking_image(&self, description: &str, context: &str) -> Option<String> {
        let mut request = ImageGenerationRequest::new(description);
        request.style = ImageStyle::Cartoon;
        request.context = Some(context.to_string());
        request.task_type = Some("speaking".to_string());

        match self.generate_image(&request).await {
            Ok(image) => Some(data_url(&image)),
            Err(e) => {
                tracing::warn!(error = %e, "Speaking image generation failed, continuing without image");
                None
            }
        }
    }
}

pub fn data_url(image: &GeneratedImage) -> String {
    format!("data:{};base64,{}", image.mime_type, image.data)
}

fn construct<T: DeserializeOwned>(record: Map<String, Value>, label: &str) -> Result<T, GenerationError> {
    serde_json::from_value(Value::Object(record)).map_err(|e| {
        tracing::error!(label, error = %e, "Repaired record failed typed construction");
        GenerationError::schema(label, e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::llm_provider::MockLlmProvider;
    use std::time::Duration;

    fn generator(mock: MockLlmProvider) -> TaskGenerator {
        TaskGenerator::new(Arc::new(mock), RetryPolicy::new(3, Duration::ZERO, Duration::ZERO))
    }

    fn named_mock() -> MockLlmProvider {
        let mut mock = MockLlmProvider::new();
        mock.expect_name().return_const("mock");
        mock
    }

    const READING_TASK1: &str = r#"Here is your task:
```json
{
  "passage": {"title": "Reunion", "content": "Dear family...", "context": "Family event"},
  "reply_passage": {"content": "Thanks!"},
  "questions": [
    {"question_text": "Who wrote it?", "options": ["A", "B", "C", "D"], "correct_answer": "A"},
    {"question_id": "", "question_text": "When?", "options": ["A", "B", "C", "D"], "correct_answer": "B"}
  ]
}
```"#;

    #[tokio::test]
    async fn reading_task_is_repaired_and_typed() {
        let mut mock = named_mock();
        mock.expect_generate_content()
            .times(1)
            .returning(|_| Ok(READING_TASK1.to_string()));

        let task = generator(mock).generate_reading_task1().await.unwrap();

        assert!(!task.task_id.is_empty());
        assert!(!task.passage.passage_id.is_empty());
        assert_eq!(task.passage.passage_type, "email");
        assert_eq!(task.questions[0].question_id, "q1");
        assert_eq!(task.questions[1].question_id, "q2");
        assert_eq!(task.time_limit_minutes, 11);
    }

    #[tokio::test]
    async fn invalid_json_is_not_reprompted() {
        let mut mock = named_mock();
        mock.expect_generate_content()
            .times(1)
            .returning(|_| Ok(r#"{"passage": {"title": }"#.to_string()));

        let err = generator(mock).generate_reading_task2().await.unwrap_err();
        assert!(matches!(err, GenerationError::Normalize(NormalizeError::JsonDecode { .. })));
    }

    #[tokio::test]
    async fn retryable_provider_errors_are_retried() {
        let mut mock = named_mock();
        let mut calls = 0;
        mock.expect_generate_content().times(2).returning(move |_| {
            calls += 1;
            if calls == 1 {
                Err(ProviderError::EmptyResponse { provider: "mock" })
            } else {
                Ok(r#"{"survey": {"title": "Parks", "description": "d", "question": "q",
                    "options": ["a", "b"], "additional_considerations": []}}"#
                    .to_string())
            }
        });

        let task = generator(mock).generate_writing_task2().await.unwrap();
        assert_eq!(task.survey.options.len(), 2);
        assert!(!task.survey.survey_id.is_empty());
        assert_eq!(task.time_limit_minutes, 26);
    }

    #[tokio::test]
    async fn missing_required_field_is_schema_error() {
        let mut mock = named_mock();
        mock.expect_generate_content()
            .returning(|_| Ok(r#"{"questions": []}"#.to_string()));

        let err = generator(mock).generate_listening_part4().await.unwrap_err();
        match err {
            GenerationError::SchemaValidation { label, message } => {
                assert_eq!(label, "Listening Part 4");
                assert!(message.contains("news_item"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    const SCENE_TASK: &str = r#"{
      "scenario": {
        "title": "Market",
        "scene_description": "A busy market",
        "context": "Saturday morning",
        "scene_type": "Community event",
        "key_elements": ["stalls"],
        "spatial_layout": "stalls on the left",
        "image_description": "Cartoon market with stalls"
      },
      "instructions": {"task_description": "Describe", "evaluation_criteria": ["Vocabulary"]}
    }"#;

    #[tokio::test]
    async fn scene_task_gets_image_and_timing_defaults() {
        let mut mock = named_mock();
        mock.expect_generate_content()
            .returning(|_| Ok(SCENE_TASK.to_string()));
        mock.expect_generate_image()
            .withf(|request| request.style == ImageStyle::Cartoon && request.prompt == "Cartoon market with stalls")
            .times(1)
            .returning(|_| {
                Ok(GeneratedImage {
                    data: "aGk=".into(),
                    mime_type: "image/png".into(),
                })
            });

        let task = generator(mock).generate_speaking_task3().await.unwrap();
        assert_eq!(task.scene_image.as_deref(), Some("data:image/png;base64,aGk="));
        assert_eq!(task.instructions.preparation_time_seconds, 30);
        assert_eq!(task.instructions.speaking_time_seconds, 60);
        assert_eq!(task.estimated_duration_minutes, 2);
    }

    #[tokio::test]
    async fn failed_image_leaves_task_without_picture() {
        let mut mock = named_mock();
        mock.expect_generate_content()
            .returning(|_| Ok(SCENE_TASK.to_string()));
        mock.expect_generate_image().returning(|_| {
            Err(ProviderError::InvalidResponse {
                provider: "mock",
                reason: "no image part".into(),
            })
        });

        let task = generator(mock).generate_speaking_task3().await.unwrap();
        assert!(task.scene_image.is_none());
        assert!(!task.scenario.scenario_id.is_empty());
    }

    #[tokio::test]
    async fn comparison_options_get_fixed_ids() {
        let body = r#"{
          "scenario": {
            "title": "Houses", "context": "Buying", "decision_maker": "sibling",
            "category": "Home & Garden", "persuasion_context": "Prefers a condo",
            "option_a": {"title": "A", "description": "d", "specifications": [], "pros": [], "cons": []},
            "option_b": {"title": "B", "description": "d", "specifications": [], "pros": [], "cons": []}
          },
          "instructions": {"task_description": "Choose", "evaluation_criteria": []}
        }"#;
        let mut mock = named_mock();
        mock.expect_generate_content()
            .returning(move |_| Ok(body.to_string()));
        mock.expect_generate_image().never();

        let task = generator(mock).generate_speaking_task5().await.unwrap();
        assert_eq!(task.scenario.option_a.option_id, "option_a");
        assert_eq!(task.scenario.option_b.option_id, "option_b");
        assert_eq!(task.instructions.selection_time_seconds, Some(60));
        assert!(task.option_a_image.is_none());
    }
}
