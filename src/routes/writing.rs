use crate::dto::request_dto::{ProviderQuery, WritingTask1ReviewRequest, WritingTask2ReviewRequest};
use crate::dto::response_dto::{GenerationResponse, ReviewResponse};
use crate::error::Result;
use crate::models::writing::{SurveyReview, WritingReview, WritingTask1, WritingTask2};
use crate::AppState;
use axum::extract::{rejection::JsonRejection, Query, State};
use axum::Json;
use std::time::Instant;
use validator::Validate;

#[axum::debug_handler]
pub async fn generate_task1(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<WritingTask1>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_writing_task1().await;
    Ok(Json(GenerationResponse::from_result("Writing Task 1", result, started)))
}

#[axum::debug_handler]
pub async fn generate_task2(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<WritingTask2>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_writing_task2().await;
    Ok(Json(GenerationResponse::from_result("Writing Task 2", result, started)))
}

#[axum::debug_handler]
pub async fn review_task1(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
    payload: std::result::Result<Json<WritingTask1ReviewRequest>, JsonRejection>,
) -> Result<Json<ReviewResponse<WritingReview>>> {
    let Json(payload) = payload?;
    payload.validate()?;
    tracing::info!(task_id = %payload.task_id, "Reviewing Writing Task 1 submission");

    let scoring = state.scoring(query.provider)?;
    let started = Instant::now();
    let result = scoring
        .review_writing_task1(&payload.user_text, &payload.scenario)
        .await;
    Ok(Json(ReviewResponse::from_result("Writing Task 1", result, started)))
}

#[axum::debug_handler]
pub async fn review_task2(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
    payload: std::result::Result<Json<WritingTask2ReviewRequest>, JsonRejection>,
) -> Result<Json<ReviewResponse<SurveyReview>>> {
    let Json(payload) = payload?;
    payload.validate()?;
    tracing::info!(task_id = %payload.task_id, "Reviewing Writing Task 2 submission");

    let scoring = state.scoring(query.provider)?;
    let started = Instant::now();
    let result = scoring
        .review_writing_task2(&payload.user_text, &payload.survey, &payload.chosen_option)
        .await;
    Ok(Json(ReviewResponse::from_result("Writing Task 2", result, started)))
}
