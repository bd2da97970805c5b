use super::default_difficulty;
use serde::{Deserialize, Serialize};
use validator::Validate;

pub const WORD_COUNT_MIN: u32 = 150;
pub const WORD_COUNT_MAX: u32 = 200;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WritingTaskType {
    #[default]
    Email,
    SurveyResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EmailScenario {
    pub scenario_id: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub context: String,
    pub recipient: String,
    pub purpose: String,
    pub key_points: Vec<String>,
    pub tone: String,
    pub relationship: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritingTask1 {
    pub task_id: String,
    pub scenario: EmailScenario,
    #[serde(default = "task1_minutes")]
    pub time_limit_minutes: u32,
    #[serde(default = "word_count_min")]
    pub word_count_min: u32,
    #[serde(default = "word_count_max")]
    pub word_count_max: u32,
    #[serde(default)]
    pub task_type: WritingTaskType,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default = "task1_instructions")]
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Survey {
    pub survey_id: String,
    #[validate(length(min = 1))]
    pub title: String,
    pub description: String,
    pub question: String,
    #[validate(length(min = 2))]
    pub options: Vec<String>,
    pub additional_considerations: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WritingTask2 {
    pub task_id: String,
    pub survey: Survey,
    #[serde(default = "task2_minutes")]
    pub time_limit_minutes: u32,
    #[serde(default = "word_count_min")]
    pub word_count_min: u32,
    #[serde(default = "word_count_max")]
    pub word_count_max: u32,
    #[serde(default = "survey_task_type")]
    pub task_type: WritingTaskType,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default = "task2_instructions")]
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CriterionScore {
    #[validate(range(min = 1, max = 12))]
    pub score: u8,
    pub feedback: String,
    pub strengths: Vec<String>,
    pub areas_for_improvement: Vec<String>,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Scored review of an email (Task 1). Also the common part of a survey review.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WritingReview {
    #[validate(range(min = 1, max = 12))]
    pub overall_score: u8,
    #[validate(nested)]
    pub content_coherence: CriterionScore,
    #[validate(nested)]
    pub vocabulary: CriterionScore,
    #[validate(nested)]
    pub readability: CriterionScore,
    #[validate(nested)]
    pub task_fulfillment: CriterionScore,
    pub overall_feedback: String,
    pub improvement_strategies: Vec<String>,
    pub word_count: u32,
    pub is_word_count_appropriate: bool,
    pub key_achievements: Vec<String>,
    pub priority_improvements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SurveyReview {
    #[serde(flatten)]
    #[validate(nested)]
    pub review: WritingReview,
    pub chosen_option: String,
    pub option_support_quality: String,
}

fn task1_minutes() -> u32 {
    27
}

fn task2_minutes() -> u32 {
    26
}

fn word_count_min() -> u32 {
    WORD_COUNT_MIN
}

fn word_count_max() -> u32 {
    WORD_COUNT_MAX
}

fn survey_task_type() -> WritingTaskType {
    WritingTaskType::SurveyResponse
}

fn task1_instructions() -> String {
    "Write an email responding to the situation described above. Your email should be between 150-200 words."
        .to_string()
}

fn task2_instructions() -> String {
    "Choose ONE option that you prefer. Explain the reasons for your choice. Write about 150-200 words."
        .to_string()
}
