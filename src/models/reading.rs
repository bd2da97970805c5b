use super::default_difficulty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    #[default]
    MultipleChoice,
    FillInBlank,
    TrueFalse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingQuestion {
    pub question_id: String,
    pub question_text: String,
    #[serde(default)]
    pub question_type: QuestionType,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingPassage {
    pub passage_id: String,
    pub title: String,
    pub content: String,
    #[serde(default = "default_correspondence_type")]
    pub passage_type: String,
    pub context: String,
}

/// The reply to the Task 1 correspondence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyPassage {
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingTask1 {
    pub task_id: String,
    pub passage: ReadingPassage,
    pub reply_passage: ReplyPassage,
    pub questions: Vec<ReadingQuestion>,
    #[serde(default = "task1_minutes")]
    pub time_limit_minutes: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagramPassage {
    pub passage_id: String,
    pub title: String,
    pub content: String,
    #[serde(default = "default_informational_type")]
    pub passage_type: String,
    pub topic: String,
    pub word_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingTask2 {
    pub task_id: String,
    pub passage: DiagramPassage,
    pub questions: Vec<ReadingQuestion>,
    #[serde(default = "task2_minutes")]
    pub time_limit_minutes: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default = "task2_question_count")]
    pub question_count: u32,
    pub diagram_description: Option<String>,
}

/// Informational article split into labelled paragraphs A to D.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParagraphPassage {
    pub passage_id: String,
    pub title: String,
    pub paragraph_a: String,
    pub paragraph_b: String,
    pub paragraph_c: String,
    pub paragraph_d: String,
    #[serde(default = "default_informational_type")]
    pub passage_type: String,
    pub topic: String,
    pub word_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParagraphMatchQuestion {
    pub question_id: String,
    pub statement: String,
    /// One of A-D, or E when no paragraph matches.
    pub correct_answer: String,
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingTask3 {
    pub task_id: String,
    pub passage: ParagraphPassage,
    pub questions: Vec<ParagraphMatchQuestion>,
    #[serde(default = "task3_minutes")]
    pub time_limit_minutes: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default = "task3_question_count")]
    pub question_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewpointsPassage {
    pub passage_id: String,
    pub title: String,
    pub article_content: String,
    pub comment_content: String,
    #[serde(default = "default_viewpoints_type")]
    pub passage_type: String,
    pub topic: String,
    pub word_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewpointsQuestion {
    pub question_id: String,
    pub question_text: String,
    /// `article` or `comment`.
    pub question_type: String,
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub blank_position: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadingTask4 {
    pub task_id: String,
    pub passage: ViewpointsPassage,
    pub questions: Vec<ViewpointsQuestion>,
    #[serde(default = "task4_minutes")]
    pub time_limit_minutes: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default = "task4_question_count")]
    pub question_count: u32,
}

fn default_correspondence_type() -> String {
    "email".to_string()
}

fn default_informational_type() -> String {
    "informational".to_string()
}

fn default_viewpoints_type() -> String {
    "news_viewpoints".to_string()
}

fn task1_minutes() -> u32 {
    11
}

fn task2_minutes() -> u32 {
    9
}

fn task3_minutes() -> u32 {
    10
}

fn task4_minutes() -> u32 {
    13
}

fn task2_question_count() -> u32 {
    8
}

fn task3_question_count() -> u32 {
    9
}

fn task4_question_count() -> u32 {
    10
}
