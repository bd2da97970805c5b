//! Envelopes returned by the generation, review and scoring handlers. A
//! failed model call is reported inside the envelope, never as an HTTP error.

use serde::Serialize;
use std::fmt::Display;
use std::time::Instant;

#[derive(Debug, Serialize)]
pub struct GenerationResponse<T> {
    pub success: bool,
    pub task: Option<T>,
    pub error_message: Option<String>,
    pub generation_time_seconds: f64,
}

impl<T> GenerationResponse<T> {
    pub fn from_result<E: Display>(label: &str, result: Result<T, E>, started: Instant) -> Self {
        let generation_time_seconds = started.elapsed().as_secs_f64();
        match result {
            Ok(task) => {
                tracing::info!(label, seconds = generation_time_seconds, "Task generated");
                Self {
                    success: true,
                    task: Some(task),
                    error_message: None,
                    generation_time_seconds,
                }
            }
            Err(e) => {
                tracing::error!(label, error = %e, "Task generation failed");
                Self {
                    success: false,
                    task: None,
                    error_message: Some(format!("Failed to generate {}: {}", label, e)),
                    generation_time_seconds,
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReviewResponse<T> {
    pub success: bool,
    pub review: Option<T>,
    pub error_message: Option<String>,
    pub review_time_seconds: f64,
}

impl<T> ReviewResponse<T> {
    pub fn from_result<E: Display>(label: &str, result: Result<T, E>, started: Instant) -> Self {
        let review_time_seconds = started.elapsed().as_secs_f64();
        match result {
            Ok(review) => Self {
                success: true,
                review: Some(review),
                error_message: None,
                review_time_seconds,
            },
            Err(e) => {
                tracing::error!(label, error = %e, "Review failed");
                Self {
                    success: false,
                    review: None,
                    error_message: Some(format!("Failed to review {}: {}", label, e)),
                    review_time_seconds,
                }
            }
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse<T> {
    pub success: bool,
    pub score: Option<T>,
    pub error_message: Option<String>,
}

impl<T> ScoreResponse<T> {
    pub fn from_result<E: Display>(label: &str, result: Result<T, E>) -> Self {
        match result {
            Ok(score) => Self {
                success: true,
                score: Some(score),
                error_message: None,
            },
            Err(e) => {
                tracing::error!(label, error = %e, "Scoring failed");
                Self {
                    success: false,
                    score: None,
                    error_message: Some(format!("Failed to score {}: {}", label, e)),
                }
            }
        }
    }
}
