use crate::dto::request_dto::ProviderQuery;
use crate::dto::response_dto::GenerationResponse;
use crate::error::Result;
use crate::models::listening::{
    ListeningPart1, ListeningPart2, ListeningPart3, ListeningPart4, ListeningPart5, ListeningPart6,
};
use crate::AppState;
use axum::extract::{Query, State};
use axum::Json;
use std::time::Instant;

#[axum::debug_handler]
pub async fn generate_part1(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<ListeningPart1>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_listening_part1().await;
    Ok(Json(GenerationResponse::from_result("Listening Part 1", result, started)))
}

#[axum::debug_handler]
pub async fn generate_part2(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<ListeningPart2>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_listening_part2().await;
    Ok(Json(GenerationResponse::from_result("Listening Part 2", result, started)))
}

#[axum::debug_handler]
pub async fn generate_part3(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<ListeningPart3>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_listening_part3().await;
    Ok(Json(GenerationResponse::from_result("Listening Part 3", result, started)))
}

#[axum::debug_handler]
pub async fn generate_part4(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<ListeningPart4>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_listening_part4().await;
    Ok(Json(GenerationResponse::from_result("Listening Part 4", result, started)))
}

#[axum::debug_handler]
pub async fn generate_part5(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<ListeningPart5>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_listening_part5().await;
    Ok(Json(GenerationResponse::from_result("Listening Part 5", result, started)))
}

#[axum::debug_handler]
pub async fn generate_part6(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<ListeningPart6>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_listening_part6().await;
    Ok(Json(GenerationResponse::from_result("Listening Part 6", result, started)))
}
