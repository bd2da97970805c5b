use crate::models::speaking::{SpeakingScenario, SpeakingScore, SpeakingSubmission, SpeechEvaluation};
use crate::models::writing::{EmailScenario, Survey, SurveyReview, WritingReview, WORD_COUNT_MAX, WORD_COUNT_MIN};
use crate::services::prompts::{speaking, writing};
use crate::services::speech_service::TranscriptionResult;
use crate::services::task_generator::{GenerationError, TaskGenerator};
use serde_json::{json, Map, Value};
use std::time::Instant;
use uuid::Uuid;
use validator::Validate;

/// Whitespace-separated tokens.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

pub fn is_word_count_appropriate(count: u32) -> bool {
    (WORD_COUNT_MIN..=WORD_COUNT_MAX).contains(&count)
}

/// Scores writing and speaking submissions with the same model pipeline the
/// generator uses.
#[derive(Clone)]
pub struct ScoringService {
    generator: TaskGenerator,
}

impl ScoringService {
    pub fn new(generator: TaskGenerator) -> Self {
        Self { generator }
    }

    pub async fn review_writing_task1(
        &self,
        user_text: &str,
        scenario: &EmailScenario,
    ) -> Result<WritingReview, GenerationError> {
        let label = "Writing Task 1 review";
        let count = word_count(user_text);
        tracing::info!(label, word_count = count, "Reviewing writing submission");

        let prompt = writing::task1_review_prompt(user_text, scenario);
        let review: WritingReview = self
            .generator
            .evaluate_record(&prompt, label, |record| stamp_word_count(record, count))
            .await?;
        review.validate().map_err(|e| GenerationError::schema(label, e))?;
        Ok(review)
    }

    pub async fn review_writing_task2(
        &self,
        user_text: &str,
        survey: &Survey,
        chosen_option: &str,
    ) -> Result<SurveyReview, GenerationError> {
        let label = "Writing Task 2 review";
        let count = word_count(user_text);
        tracing::info!(label, word_count = count, chosen_option, "Reviewing writing submission");

        let prompt = writing::task2_review_prompt(user_text, survey, chosen_option);
        let review: SurveyReview = self
            .generator
            .evaluate_record(&prompt, label, |record| {
                stamp_word_count(record, count);
                record.insert("chosen_option".to_string(), json!(chosen_option));
            })
            .await?;
        review.validate().map_err(|e| GenerationError::schema(label, e))?;
        Ok(review)
    }

    pub async fn score_speaking<S: SpeakingScenario>(
        &self,
        submission: &SpeakingSubmission<S>,
        transcription: &TranscriptionResult,
    ) -> Result<SpeakingScore, GenerationError> {
        let started = Instant::now();
        let kind = S::TASK_TYPE;
        let label = format!("{} evaluation", kind.label());
        let task = &submission.task_context;

        let prompt = speaking::evaluation_prompt(
            kind,
            &transcription.transcript,
            &task.scenario.summary(),
            &task.instructions.summary(),
            &submission.timing_summary(),
            submission.selected_option.as_deref(),
        );
        let evaluation: SpeechEvaluation = self.generator.evaluate_record(&prompt, &label, |_| {}).await?;

        let score = SpeakingScore {
            task_id: submission.task_id.clone(),
            submission_id: Uuid::new_v4().to_string(),
            task_type: kind,
            scores: evaluation.scores,
            feedback: evaluation.feedback,
            transcript: Some(transcription.transcript.clone()),
            confidence_level: evaluation.confidence_level.or(Some(transcription.confidence)),
            processing_time_seconds: Some(started.elapsed().as_secs_f64()),
            selected_option_analysis: evaluation.selected_option_analysis,
            persuasion_effectiveness: evaluation.persuasion_effectiveness,
        };
        tracing::info!(
            label = %label,
            task_id = %score.task_id,
            overall = score.scores.overall_score,
            "Speaking submission scored"
        );
        Ok(score)
    }
}

fn stamp_word_count(record: &mut Map<String, Value>, count: u32) {
    record.insert("word_count".to_string(), json!(count));
    record.insert(
        "is_word_count_appropriate".to_string(),
        json!(is_word_count_appropriate(count)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::speaking::{AudioSubmission, SpeakingTask5};
    use crate::services::llm_provider::MockLlmProvider;
    use crate::services::retry::RetryPolicy;
    use std::sync::Arc;

    fn scoring(reply: impl Into<String>) -> ScoringService {
        let reply = reply.into();
        let mut mock = MockLlmProvider::new();
        mock.expect_name().return_const("mock");
        mock.expect_generate_content()
            .times(1)
            .returning(move |_| Ok(reply.clone()));
        ScoringService::new(TaskGenerator::new(Arc::new(mock), RetryPolicy::none()))
    }

    fn criterion(score: u8) -> Value {
        json!({"score": score, "feedback": "f", "strengths": [], "areas_for_improvement": []})
    }

    fn review_reply(vocabulary: u8) -> String {
        json!({
            "overall_score": 8,
            "content_coherence": criterion(8),
            "vocabulary": criterion(vocabulary),
            "readability": criterion(8),
            "task_fulfillment": criterion(8),
            "overall_feedback": "good",
            "improvement_strategies": [],
            "word_count": 999,
            "is_word_count_appropriate": true,
            "key_achievements": [],
            "priority_improvements": [],
            "chosen_option": "model guess",
            "option_support_quality": "clear"
        })
        .to_string()
    }

    fn scenario() -> EmailScenario {
        EmailScenario {
            scenario_id: "s".into(),
            title: "t".into(),
            context: "c".into(),
            recipient: "r".into(),
            purpose: "p".into(),
            key_points: vec![],
            tone: "formal".into(),
            relationship: "tenant".into(),
        }
    }

    #[test]
    fn counts_whitespace_tokens() {
        assert_eq!(word_count("  Dear  manager,\nthe heater\tis broken. "), 6);
        assert_eq!(word_count(""), 0);
        assert!(is_word_count_appropriate(150));
        assert!(is_word_count_appropriate(200));
        assert!(!is_word_count_appropriate(149));
        assert!(!is_word_count_appropriate(201));
    }

    #[tokio::test]
    async fn review_overwrites_model_word_count() {
        let review = scoring(review_reply(7))
            .review_writing_task1("one two three", &scenario())
            .await
            .unwrap();
        assert_eq!(review.word_count, 3);
        assert!(!review.is_word_count_appropriate);
    }

    #[tokio::test]
    async fn out_of_range_review_is_schema_error() {
        let err = scoring(review_reply(13))
            .review_writing_task1("text", &scenario())
            .await
            .unwrap_err();
        assert!(matches!(err, GenerationError::SchemaValidation { .. }));
    }

    #[tokio::test]
    async fn survey_review_keeps_submitted_option() {
        let survey = Survey {
            survey_id: "s".into(),
            title: "Parks".into(),
            description: "d".into(),
            question: "q".into(),
            options: vec!["Pool".into(), "Rink".into()],
            additional_considerations: vec![],
        };
        let review = scoring(review_reply(9))
            .review_writing_task2("word ".repeat(160).trim(), &survey, "Pool")
            .await
            .unwrap();
        assert_eq!(review.chosen_option, "Pool");
        assert_eq!(review.review.word_count, 160);
        assert!(review.review.is_word_count_appropriate);
    }

    #[tokio::test]
    async fn speaking_score_carries_submission_context() {
        let reply = r#"{
          "scores": {"content_score": 8, "vocabulary_score": 7, "language_use_score": 7,
                     "task_fulfillment_score": 8, "overall_score": 7.5},
          "feedback": {"strengths": ["clear"], "improvements": [], "specific_suggestions": []},
          "persuasion_effectiveness": "convincing"
        }"#;
        let option = json!({"option_id": "option_a", "title": "A", "description": "d",
                            "specifications": [], "pros": [], "cons": []});
        let task: SpeakingTask5 = serde_json::from_value(json!({
            "task_id": "task-5",
            "task_type": "comparing_and_persuading",
            "scenario": {
                "scenario_id": "sc", "title": "Houses", "context": "c", "decision_maker": "sibling",
                "category": "Home", "option_a": option, "option_b": option, "persuasion_context": "p"
            },
            "instructions": {"task_description": "Choose", "evaluation_criteria": []},
            "estimated_duration_minutes": 3
        }))
        .unwrap();
        let submission = SpeakingSubmission {
            task_id: "task-5".into(),
            user_id: None,
            audio: AudioSubmission {
                audio_data: "aGk=".into(),
                audio_format: "webm".into(),
                duration_seconds: 58.0,
                recording_quality: None,
            },
            task_context: task,
            selection_time_used: Some(40.0),
            preparation_time_used: None,
            speaking_time_used: Some(58.0),
            selected_option: Some("option_a".into()),
            chosen_option: None,
            chosen_position: None,
            submission_timestamp: None,
        };
        let transcription = TranscriptionResult {
            transcript: "I think option A is better".into(),
            confidence: 0.9,
            audio_duration: 58.0,
            detected_language: "en".into(),
            model_used: "whisper-1".into(),
        };

        let score = scoring(reply)
            .score_speaking(&submission, &transcription)
            .await
            .unwrap();
        assert_eq!(score.task_id, "task-5");
        assert_eq!(score.transcript.as_deref(), Some("I think option A is better"));
        assert_eq!(score.confidence_level, Some(0.9));
        assert_eq!(score.persuasion_effectiveness.as_deref(), Some("convincing"));
        assert!(score.processing_time_seconds.is_some());
        assert!(!score.submission_id.is_empty());
    }
}
