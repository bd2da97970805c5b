use super::default_difficulty;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListeningQuestionType {
    #[default]
    MultipleChoice,
    PictureSelection,
    TrueFalse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListeningQuestion {
    pub question_id: String,
    pub question_text: String,
    #[serde(default)]
    pub question_type: ListeningQuestionType,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub explanation: Option<String>,
    /// Image descriptions, only for picture selection questions.
    pub picture_options: Option<Vec<String>>,
    pub conversation_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub conversation_id: String,
    pub title: String,
    pub transcript: String,
    pub audio_description: String,
    pub duration_seconds: u32,
    pub speakers: Vec<String>,
    pub scenario: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsItem {
    pub news_id: String,
    pub title: String,
    pub content: String,
    pub audio_description: String,
    pub duration_seconds: u32,
    pub topic: String,
    pub location: String,
    pub date: String,
    pub reporter: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discussion {
    pub discussion_id: String,
    pub title: String,
    pub transcript: String,
    pub video_description: String,
    pub duration_seconds: u32,
    pub speakers: Vec<String>,
    pub setting: String,
    pub topic: String,
    pub key_points: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Viewpoint {
    pub viewpoint_id: String,
    pub title: String,
    pub content: String,
    pub audio_description: String,
    pub duration_seconds: u32,
    pub speaker: String,
    pub topic: String,
    pub position: String,
    pub key_arguments: Vec<String>,
    pub supporting_evidence: Vec<String>,
}

/// Part 1: problem solving across several short conversations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListeningPart1 {
    pub task_id: String,
    pub conversations: Vec<Conversation>,
    pub questions: Vec<ListeningQuestion>,
    #[serde(default = "part1_minutes")]
    pub time_limit_minutes: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default = "part1_instructions")]
    pub instructions: String,
}

/// Part 2: a daily life conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListeningPart2 {
    pub task_id: String,
    pub conversation: Conversation,
    pub questions: Vec<ListeningQuestion>,
    #[serde(default = "part2_minutes")]
    pub time_limit_minutes: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default = "conversation_instructions")]
    pub instructions: String,
}

/// Part 3: an informational conversation or interview.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListeningPart3 {
    pub task_id: String,
    pub conversation: Conversation,
    pub questions: Vec<ListeningQuestion>,
    #[serde(default = "part3_minutes")]
    pub time_limit_minutes: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default = "conversation_instructions")]
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListeningPart4 {
    pub task_id: String,
    pub news_item: NewsItem,
    pub questions: Vec<ListeningQuestion>,
    #[serde(default = "part4_minutes")]
    pub time_limit_minutes: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default = "part4_instructions")]
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListeningPart5 {
    pub task_id: String,
    pub discussion: Discussion,
    pub questions: Vec<ListeningQuestion>,
    #[serde(default = "part5_minutes")]
    pub time_limit_minutes: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default = "part5_instructions")]
    pub instructions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListeningPart6 {
    pub task_id: String,
    pub viewpoint: Viewpoint,
    pub questions: Vec<ListeningQuestion>,
    #[serde(default = "part6_minutes")]
    pub time_limit_minutes: u32,
    #[serde(default = "default_difficulty")]
    pub difficulty_level: String,
    #[serde(default = "part6_instructions")]
    pub instructions: String,
}

fn part1_minutes() -> u32 {
    12
}

fn part2_minutes() -> u32 {
    8
}

fn part3_minutes() -> u32 {
    10
}

fn part4_minutes() -> u32 {
    5
}

fn part5_minutes() -> u32 {
    4
}

fn part6_minutes() -> u32 {
    8
}

fn part1_instructions() -> String {
    "Listen to each conversation and answer the questions that follow.".to_string()
}

fn conversation_instructions() -> String {
    "Listen to the conversation and answer the questions that follow. You will hear the conversation only once."
        .to_string()
}

fn part4_instructions() -> String {
    "Listen to the news item and answer the questions that follow. You will hear the news item only once."
        .to_string()
}

fn part5_instructions() -> String {
    "Watch the video discussion and answer the questions that follow. You will see the video only once."
        .to_string()
}

fn part6_instructions() -> String {
    "Listen to the viewpoint presentation and answer the questions that follow. You will hear the presentation only once."
        .to_string()
}
