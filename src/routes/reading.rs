use crate::dto::request_dto::ProviderQuery;
use crate::dto::response_dto::GenerationResponse;
use crate::error::Result;
use crate::models::reading::{ReadingTask1, ReadingTask2, ReadingTask3, ReadingTask4};
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use std::time::Instant;

#[axum::debug_handler]
pub async fn generate_task1(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<ReadingTask1>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_reading_task1().await;
    Ok(Json(GenerationResponse::from_result("Reading Task 1", result, started)))
}

#[axum::debug_handler]
pub async fn generate_task2(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<ReadingTask2>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_reading_task2().await;
    Ok(Json(GenerationResponse::from_result("Reading Task 2", result, started)))
}

#[axum::debug_handler]
pub async fn generate_task3(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<ReadingTask3>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_reading_task3().await;
    Ok(Json(GenerationResponse::from_result("Reading Task 3", result, started)))
}

#[axum::debug_handler]
pub async fn generate_task4(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<ReadingTask4>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_reading_task4().await;
    Ok(Json(GenerationResponse::from_result("Reading Task 4", result, started)))
}
