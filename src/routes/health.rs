use crate::dto::request_dto::ProviderQuery;
use crate::error::Result;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

#[axum::debug_handler]
pub async fn health() -> impl IntoResponse {
    let body = json!({
        "status": "ok",
    });
    (StatusCode::OK, Json(body))
}

#[axum::debug_handler]
pub async fn root(State(state): State<AppState>) -> impl IntoResponse {
    let body = json!({
        "message": "CELPIP practice exam API",
        "version": env!("CARGO_PKG_VERSION"),
        "default_provider": state.registry.default_kind(),
        "providers": state.registry.configured(),
        "sections": ["reading", "listening", "writing", "speaking", "images"],
    });
    (StatusCode::OK, Json(body))
}

/// 200 when the selected backend answers the health prompt, 503 otherwise.
async fn provider_health(
    state: &AppState,
    query: ProviderQuery,
    section: &str,
    extra: Value,
) -> Result<(StatusCode, Json<Value>)> {
    let generator = state.generator(query.provider)?;
    let healthy = generator.health_check().await;
    if !healthy {
        tracing::warn!(section, provider = generator.provider_name(), "Section health check failed");
    }

    let (status, label) = if healthy {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };
    let mut body = json!({
        "status": label,
        "section": section,
        "provider": generator.provider_name(),
        "provider_connected": healthy,
        "timestamp": chrono::Utc::now().timestamp(),
    });
    if let (Value::Object(body), Value::Object(extra)) = (&mut body, extra) {
        body.extend(extra);
    }
    Ok((status, Json(body)))
}

#[axum::debug_handler]
pub async fn reading_health(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<impl IntoResponse> {
    provider_health(&state, query, "reading", json!({"tasks": [1, 2, 3, 4]})).await
}

#[axum::debug_handler]
pub async fn listening_health(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<impl IntoResponse> {
    provider_health(&state, query, "listening", json!({"parts": [1, 2, 3, 4, 5, 6]})).await
}

#[axum::debug_handler]
pub async fn writing_health(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<impl IntoResponse> {
    provider_health(&state, query, "writing", json!({"tasks": [1, 2]})).await
}

#[axum::debug_handler]
pub async fn speaking_health(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<impl IntoResponse> {
    let speech_to_text = state.transcriber.health_check().await;
    let (status, Json(mut body)) = provider_health(
        &state,
        query,
        "speaking",
        json!({"tasks": [1, 2, 3, 4, 5, 6, 7, 8], "speech_to_text": speech_to_text}),
    )
    .await?;

    if status == StatusCode::OK && !speech_to_text {
        body["status"] = json!("unhealthy");
        return Ok((StatusCode::SERVICE_UNAVAILABLE, Json(body)));
    }
    Ok((status, Json(body)))
}

#[axum::debug_handler]
pub async fn images_health(
    State(state): State<AppState>,
    Query(query): Query<ProviderQuery>,
) -> Result<impl IntoResponse> {
    provider_health(&state, query, "images", json!({})).await
}
