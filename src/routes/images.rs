use crate::dto::request_dto::ProviderQuery;
use crate::error::{Error, Result};
use crate::models::images::{ImageGenerationRequest, ImageGenerationResponse};
use crate::services::llm_provider::ProviderKind;
use crate::services::task_generator::data_url;
use crate::AppState;
use axum::extract::{rejection::JsonRejection, Query, State};
use axum::Json;
use std::time::Instant;
use validator::Validate;

const MIN_PROMPT_CHARS: usize = 10;

#[axum::debug_handler]
pub async fn generate_image(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
    payload: std::result::Result<Json<ImageGenerationRequest>, JsonRejection>,
) -> Result<Json<ImageGenerationResponse>> {
    let Json(request) = payload?;
    render_image(&state, query.provider, request).await
}

pub(crate) async fn render_image(
    state: &AppState,
    provider: Option<ProviderKind>,
    request: ImageGenerationRequest,
) -> Result<Json<ImageGenerationResponse>> {
    request.validate()?;
    if request.prompt.trim().chars().count() < MIN_PROMPT_CHARS {
        return Err(Error::BadRequest(format!(
            "Prompt must be at least {} characters long",
            MIN_PROMPT_CHARS
        )));
    }

    let generator = state.generator(provider)?;
    let started = Instant::now();
    let result = generator.generate_image(&request).await;
    let generation_time_seconds = Some(started.elapsed().as_secs_f64());
    let style_applied = Some(request.style.as_str().to_string());
    let size_generated = Some(request.size.as_str().to_string());

    let response = match result {
        Ok(image) => {
            tracing::info!(
                provider = generator.provider_name(),
                bytes_b64 = image.data.len(),
                "Image generated"
            );
            ImageGenerationResponse {
                success: true,
                image_url: Some(data_url(&image)),
                image_data: Some(image.data),
                error_message: None,
                generation_time_seconds,
                prompt_used: Some(request.render_prompt()),
                style_applied,
                size_generated,
            }
        }
        Err(e) => {
            tracing::error!(error = %e, "Image generation failed");
            ImageGenerationResponse {
                success: false,
                error_message: Some(format!("Failed to generate image: {}", e)),
                generation_time_seconds,
                prompt_used: Some(request.prompt.clone()),
                style_applied,
                size_generated,
                ..Default::default()
            }
        }
    };
    Ok(Json(response))
}
