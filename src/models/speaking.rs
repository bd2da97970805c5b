//! Speaking tasks share one envelope, [`SpeakingTask`], parameterised by the
//! scenario shape. Each scenario type fixes its [`SpeakingTaskType`], and the
//! task type owns the timing table used to fill instruction defaults.

use super::default_difficulty;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeakingTaskType {
    GivingAdvice,
    TalkingAboutPersonalExperience,
    DescribingScene,
    MakingPredictions,
    #[serde(alias = "comparing_opinions")]
    ComparingAndPersuading,
    DealingWithDifficultSituation,
    ExpressingOpinions,
    DescribingUnusualSituation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTiming {
    pub selection_seconds: Option<u32>,
    pub preparation_seconds: u32,
    pub speaking_seconds: u32,
}

impl SpeakingTaskType {
    pub fn number(self) -> u8 {
        match self {
            Self::GivingAdvice => 1,
            Self::TalkingAboutPersonalExperience => 2,
            Self::DescribingScene => 3,
            Self::MakingPredictions => 4,
            Self::ComparingAndPersuading => 5,
            Self::DealingWithDifficultSituation => 6,
            Self::ExpressingOpinions => 7,
            Self::DescribingUnusualSituation => 8,
        }
    }

    pub fn label(self) -> String {
        format!("Speaking Task {}", self.number())
    }

    pub fn timing(self) -> TaskTiming {
        let (selection_seconds, preparation_seconds, speaking_seconds) = match self {
            Self::GivingAdvice | Self::ExpressingOpinions => (None, 30, 90),
            Self::ComparingAndPersuading => (Some(60), 60, 60),
            Self::DealingWithDifficultSituation => (None, 60, 60),
            Self::TalkingAboutPersonalExperience
            | Self::DescribingScene
            | Self::MakingPredictions
            | Self::DescribingUnusualSituation => (None, 30, 60),
        };
        TaskTiming {
            selection_seconds,
            preparation_seconds,
            speaking_seconds,
        }
    }

    pub fn estimated_minutes(self) -> u32 {
        match self {
            Self::GivingAdvice | Self::ComparingAndPersuading => 3,
            _ => 2,
        }
    }
}

/// A scenario shape for one speaking task.
pub trait SpeakingScenario: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const TASK_TYPE: SpeakingTaskType;

    /// Plain-text description handed to the evaluation prompt.
    fn summary(&self) -> String;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakingInstructions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selection_time_seconds: Option<u32>,
    #[serde(default = "default_preparation")]
    pub preparation_time_seconds: u32,
    #[serde(default = "default_speaking")]
    pub speaking_time_seconds: u32,
    pub task_description: String,
    pub evaluation_criteria: Vec<String>,
    #[serde(default)]
    pub tips: Vec<String>,
}

impl SpeakingInstructions {
    pub fn summary(&self) -> String {
        let mut lines = vec![format!("Task Description: {}", self.task_description)];
        if let Some(selection) = self.selection_time_seconds {
            lines.push(format!("Selection Time: {selection} seconds"));
        }
        lines.push(format!("Preparation Time: {} seconds", self.preparation_time_seconds));
        lines.push(format!("Speaking Time: {} seconds", self.speaking_time_seconds));
        lines.push(format!("Evaluation Criteria: {}", self.evaluation_criteria.join(", ")));
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "S: SpeakingScenario")]
pub struct SpeakingTask<S> {
    pub task_id: String,
    pub task_type: SpeakingTaskType,
    pub scenario: S,
    pub instructions: SpeakingInstructions,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    pub estimated_duration_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_a_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_b_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub situation_image: Option<String>,
}

impl<S: SpeakingScenario> SpeakingTask<S> {
    /// Writes the type-dependent defaults into a repaired record before it is
    /// constructed: the task type itself, the estimated duration and any
    /// missing instruction timings.
    pub fn apply_type_defaults(record: &mut Map<String, Value>) {
        let kind = S::TASK_TYPE;
        record.insert("task_type".to_string(), json!(kind));
        fill_missing(record, "estimated_duration_minutes", kind.estimated_minutes());

        if let Some(Value::Object(instructions)) = record.get_mut("instructions") {
            let timing = kind.timing();
            fill_missing(instructions, "preparation_time_seconds", timing.preparation_seconds);
            fill_missing(instructions, "speaking_time_seconds", timing.speaking_seconds);
            if let Some(selection) = timing.selection_seconds {
                fill_missing(instructions, "selection_time_seconds", selection);
            }
        }
    }
}

fn fill_missing(map: &mut Map<String, Value>, key: &str, value: u32) {
    if map.get(key).map_or(true, Value::is_null) {
        map.insert(key.to_string(), json!(value));
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceScenario {
    pub scenario_id: String,
    pub title: String,
    pub situation: String,
    pub context: String,
    pub person_description: String,
    pub advice_topic: String,
    pub image_description: Option<String>,
}

impl SpeakingScenario for AdviceScenario {
    const TASK_TYPE: SpeakingTaskType = SpeakingTaskType::GivingAdvice;

    fn summary(&self) -> String {
        format!(
            "Title: {}\nSituation: {}\nContext: {}\nPerson Description: {}\nAdvice Topic: {}",
            self.title, self.situation, self.context, self.person_description, self.advice_topic
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceScenario {
    pub scenario_id: String,
    pub title: String,
    pub topic: String,
    pub context: String,
    pub experience_type: String,
    pub guiding_questions: Vec<String>,
    pub image_description: Option<String>,
}

impl SpeakingScenario for ExperienceScenario {
    const TASK_TYPE: SpeakingTaskType = SpeakingTaskType::TalkingAboutPersonalExperience;

    fn summary(&self) -> String {
        format!(
            "Title: {}\nTopic: {}\nContext: {}\nExperience Type: {}\nGuiding Questions: {}",
            self.title,
            self.topic,
            self.context,
            self.experience_type,
            self.guiding_questions.join(", ")
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneScenario {
    pub scenario_id: String,
    pub title: String,
    pub scene_description: String,
    pub context: String,
    pub scene_type: String,
    pub key_elements: Vec<String>,
    pub spatial_layout: String,
    pub image_description: Option<String>,
}

impl SpeakingScenario for SceneScenario {
    const TASK_TYPE: SpeakingTaskType = SpeakingTaskType::DescribingScene;

    fn summary(&self) -> String {
        format!(
            "Title: {}\nScene Description: {}\nContext: {}\nScene Type: {}\nKey Elements: {}\nSpatial Layout: {}",
            self.title,
            self.scene_description,
            self.context,
            self.scene_type,
            self.key_elements.join(", "),
            self.spatial_layout
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionScenario {
    pub scenario_id: String,
    pub title: String,
    pub scene_description: String,
    pub context: String,
    pub scene_type: String,
    pub current_situation: String,
    pub key_characters: Vec<String>,
    pub prediction_elements: Vec<String>,
    pub possible_outcomes: Vec<String>,
    pub image_description: Option<String>,
}

impl SpeakingScenario for PredictionScenario {
    const TASK_TYPE: SpeakingTaskType = SpeakingTaskType::MakingPredictions;

    fn summary(&self) -> String {
        format!(
            "Title: {}\nScene Description: {}\nContext: {}\nCurrent Situation: {}\nKey Characters: {}\nPrediction Elements: {}",
            self.title,
            self.scene_description,
            self.context,
            self.current_situation,
            self.key_characters.join(", "),
            self.prediction_elements.join(", ")
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonOption {
    pub option_id: String,
    pub title: String,
    pub description: String,
    pub specifications: Vec<String>,
    pub price: Option<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub image_description: Option<String>,
}

impl ComparisonOption {
    fn summary(&self, label: &str) -> String {
        let price = self.price.as_deref().unwrap_or("not listed");
        format!(
            "{label}: {} - {} (price: {}; specifications: {})",
            self.title,
            self.description,
            price,
            self.specifications.join(", ")
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComparisonScenario {
    pub scenario_id: String,
    pub title: String,
    pub context: String,
    pub decision_maker: String,
    pub category: String,
    pub option_a: ComparisonOption,
    pub option_b: ComparisonOption,
    pub persuasion_context: String,
}

impl SpeakingScenario for ComparisonScenario {
    const TASK_TYPE: SpeakingTaskType = SpeakingTaskType::ComparingAndPersuading;

    fn summary(&self) -> String {
        format!(
            "Title: {}\nContext: {}\nDecision Maker: {}\nCategory: {}\n{}\n{}\nPersuasion Context: {}",
            self.title,
            self.context,
            self.decision_maker,
            self.category,
            self.option_a.summary("Option A"),
            self.option_b.summary("Option B"),
            self.persuasion_context
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DifficultSituationScenario {
    pub scenario_id: String,
    pub title: String,
    pub situation_description: String,
    pub context: String,
    pub involved_parties: Vec<String>,
    pub dilemma_explanation: String,
    pub communication_options: Vec<String>,
    pub relationship_context: String,
    pub image_description: Option<String>,
}

impl SpeakingScenario for DifficultSituationScenario {
    const TASK_TYPE: SpeakingTaskType = SpeakingTaskType::DealingWithDifficultSituation;

    fn summary(&self) -> String {
        format!(
            "Title: {}\nSituation: {}\nContext: {}\nInvolved Parties: {}\nDilemma: {}\nCommunication Options: {}\nRelationship Context: {}",
            self.title,
            self.situation_description,
            self.context,
            self.involved_parties.join(", "),
            self.dilemma_explanation,
            self.communication_options.join(" | "),
            self.relationship_context
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpinionScenario {
    pub scenario_id: String,
    pub title: String,
    pub topic_statement: String,
    pub context: String,
    pub position_options: Vec<String>,
    pub supporting_points: Vec<String>,
    pub considerations: Vec<String>,
    pub image_description: Option<String>,
}

impl SpeakingScenario for OpinionScenario {
    const TASK_TYPE: SpeakingTaskType = SpeakingTaskType::ExpressingOpinions;

    fn summary(&self) -> String {
        format!(
            "Title: {}\nTopic Statement: {}\nContext: {}\nPosition Options: {}\nConsiderations: {}",
            self.title,
            self.topic_statement,
            self.context,
            self.position_options.join(" | "),
            self.considerations.join(", ")
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnusualSituationScenario {
    pub scenario_id: String,
    pub title: String,
    pub situation_description: String,
    pub context: String,
    pub unusual_elements: Vec<String>,
    pub possible_explanations: Vec<String>,
    pub descriptive_focus: String,
    pub image_description: Option<String>,
}

impl SpeakingScenario for UnusualSituationScenario {
    const TASK_TYPE: SpeakingTaskType = SpeakingTaskType::DescribingUnusualSituation;

    fn summary(&self) -> String {
        format!(
            "Title: {}\nSituation: {}\nContext: {}\nUnusual Elements: {}\nDescriptive Focus: {}",
            self.title,
            self.situation_description,
            self.context,
            self.unusual_elements.join(", "),
            self.descriptive_focus
        )
    }
}

pub type SpeakingTask1 = SpeakingTask<AdviceScenario>;
pub type SpeakingTask2 = SpeakingTask<ExperienceScenario>;
pub type SpeakingTask3 = SpeakingTask<SceneScenario>;
pub type SpeakingTask4 = SpeakingTask<PredictionScenario>;
pub type SpeakingTask5 = SpeakingTask<ComparisonScenario>;
pub type SpeakingTask6 = SpeakingTask<DifficultSituationScenario>;
pub type SpeakingTask7 = SpeakingTask<OpinionScenario>;
pub type SpeakingTask8 = SpeakingTask<UnusualSituationScenario>;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AudioSubmission {
    /// Base64 audio, optionally as a `data:` URL.
    #[validate(length(min = 1))]
    pub audio_data: String,
    #[serde(default = "default_audio_format")]
    pub audio_format: String,
    #[validate(range(min = 0.0))]
    pub duration_seconds: f64,
    pub recording_quality: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(bound = "S: SpeakingScenario")]
pub struct SpeakingSubmission<S> {
    pub task_id: String,
    pub user_id: Option<String>,
    pub audio: AudioSubmission,
    pub task_context: SpeakingTask<S>,
    pub selection_time_used: Option<f64>,
    pub preparation_time_used: Option<f64>,
    pub speaking_time_used: Option<f64>,
    /// Task 5 only: the option the speaker argues for.
    pub selected_option: Option<String>,
    /// Task 6 only.
    pub chosen_option: Option<String>,
    /// Task 7 only.
    pub chosen_position: Option<String>,
    pub submission_timestamp: Option<String>,
}

impl<S> SpeakingSubmission<S> {
    pub fn timing_summary(&self) -> String {
        fn seconds(value: Option<f64>) -> String {
            value.map_or_else(|| "Unknown".to_string(), |v| v.to_string())
        }

        let mut lines = Vec::new();
        if self.selection_time_used.is_some() {
            lines.push(format!("Selection Time Used: {} seconds", seconds(self.selection_time_used)));
        }
        lines.push(format!("Preparation Time Used: {} seconds", seconds(self.preparation_time_used)));
        lines.push(format!("Speaking Time Used: {} seconds", seconds(self.speaking_time_used)));
        lines.push(format!("Audio Duration: {} seconds", self.audio.duration_seconds));
        if let Some(option) = &self.selected_option {
            lines.push(format!("Selected Option: {option}"));
        }
        if let Some(option) = &self.chosen_option {
            lines.push(format!("Chosen Communication Option: {option}"));
        }
        if let Some(position) = &self.chosen_position {
            lines.push(format!("Chosen Position: {position}"));
        }
        lines.join("\n")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub content_score: f64,
    pub vocabulary_score: f64,
    pub language_use_score: f64,
    pub task_fulfillment_score: f64,
    pub overall_score: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakingFeedback {
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub specific_suggestions: Vec<String>,
    pub pronunciation_notes: Option<String>,
    pub fluency_notes: Option<String>,
}

/// What the model returns for an evaluation prompt.
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechEvaluation {
    pub scores: ScoreBreakdown,
    pub feedback: SpeakingFeedback,
    pub confidence_level: Option<f64>,
    pub selected_option_analysis: Option<String>,
    pub persuasion_effectiveness: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakingScore {
    pub task_id: String,
    pub submission_id: String,
    pub task_type: SpeakingTaskType,
    pub scores: ScoreBreakdown,
    pub feedback: SpeakingFeedback,
    pub transcript: Option<String>,
    pub confidence_level: Option<f64>,
    pub processing_time_seconds: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_option_analysis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persuasion_effectiveness: Option<String>,
}

fn default_preparation() -> u32 {
    30
}

fn default_speaking() -> u32 {
    60
}

fn default_audio_format() -> String {
    "webm".to_string()
}
