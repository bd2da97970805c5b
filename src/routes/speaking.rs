use crate::dto::request_dto::ProviderQuery;
use crate::dto::response_dto::{GenerationResponse, ScoreResponse};
use crate::error::{Error, Result};
use crate::models::images::{ImageGenerationRequest, ImageGenerationResponse};
use crate::models::speaking::{
    SpeakingScenario, SpeakingScore, SpeakingSubmission, SpeakingTask1, SpeakingTask2,
    SpeakingTask3, SpeakingTask4, SpeakingTask5, SpeakingTask6, SpeakingTask7, SpeakingTask8,
    SpeakingTaskType,
};
use crate::routes::images::render_image;
use crate::AppState;
use axum::extract::{rejection::JsonRejection, Query, State};
use axum::Json;
use std::time::Instant;
use validator::Validate;

#[axum::debug_handler]
pub async fn generate_task1(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<SpeakingTask1>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_speaking_task1().await;
    Ok(Json(GenerationResponse::from_result("Speaking Task 1", result, started)))
}

#[axum::debug_handler]
pub async fn generate_task2(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<SpeakingTask2>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_speaking_task2().await;
    Ok(Json(GenerationResponse::from_result("Speaking Task 2", result, started)))
}

#[axum::debug_handler]
pub async fn generate_task3(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<SpeakingTask3>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_speaking_task3().await;
    Ok(Json(GenerationResponse::from_result("Speaking Task 3", result, started)))
}

#[axum::debug_handler]
pub async fn generate_task4(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<SpeakingTask4>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_speaking_task4().await;
    Ok(Json(GenerationResponse::from_result("Speaking Task 4", result, started)))
}

#[axum::debug_handler]
pub async fn generate_task5(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<SpeakingTask5>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_speaking_task5().await;
    Ok(Json(GenerationResponse::from_result("Speaking Task 5", result, started)))
}

#[axum::debug_handler]
pub async fn generate_task6(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<SpeakingTask6>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_speaking_task6().await;
    Ok(Json(GenerationResponse::from_result("Speaking Task 6", result, started)))
}

#[axum::debug_handler]
pub async fn generate_task7(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<SpeakingTask7>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_speaking_task7().await;
    Ok(Json(GenerationResponse::from_result("Speaking Task 7", result, started)))
}

#[axum::debug_handler]
pub async fn generate_task8(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<Json<GenerationResponse<SpeakingTask8>>> {
    let generator = state.generator(query.provider)?;
    let started = Instant::now();
    let result = generator.generate_speaking_task8().await;
    Ok(Json(GenerationResponse::from_result("Speaking Task 8", result, started)))
}

/// Scores one recorded answer. Mounted once per task with the task's
/// scenario type, e.g. `score_task::<AdviceScenario>`.
pub async fn score_task<S: SpeakingScenario>(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
    payload: std::result::Result<Json<SpeakingSubmission<S>>, JsonRejection>,
) -> Result<Json<ScoreResponse<SpeakingScore>>> {
    let Json(submission) = payload?;
    let kind = S::TASK_TYPE;
    submission.audio.validate()?;

    let missing_option = submission
        .selected_option
        .as_deref()
        .map_or(true, |option| option.trim().is_empty());
    if kind == SpeakingTaskType::ComparingAndPersuading && missing_option {
        return Err(Error::BadRequest(
            "selected_option is required for Speaking Task 5".to_string(),
        ));
    }

    let scoring = state.scoring(query.provider)?;
    tracing::info!(task_id = %submission.task_id, task = %kind.label(), "Scoring speaking submission");

    let transcription = state.transcriber.transcribe(&submission.audio).await?;
    tracing::info!(
        task_id = %submission.task_id,
        chars = transcription.transcript.len(),
        "Audio transcribed"
    );

    let result = scoring.score_speaking(&submission, &transcription).await;
    Ok(Json(ScoreResponse::from_result(&kind.label(), result)))
}

/// Image generation with speaking-task hints unless the caller set a task type.
#[axum::debug_handler]
pub async fn generate_image(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
    payload: std::result::Result<Json<ImageGenerationRequest>, JsonRejection>,
) -> Result<Json<ImageGenerationResponse>> {
    let Json(mut request) = payload?;
    request.task_type.get_or_insert_with(|| "speaking".to_string());
    render_image(&state, query.provider, request).await
}
