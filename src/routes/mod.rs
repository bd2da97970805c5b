pub mod health;
pub mod images;
pub mod listening;
pub mod reading;
pub mod speaking;
pub mod writing;

use crate::models::speaking::{
    AdviceScenario, ComparisonScenario, DifficultSituationScenario, ExperienceScenario,
    OpinionScenario, PredictionScenario, SceneScenario, UnusualSituationScenario,
};
use crate::AppState;
use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub fn router(state: AppState) -> Router {
    let max_body_bytes = state.config.max_body_bytes;

    let base_routes = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health));

    let reading_api = Router::new()
        .route("/reading/task1/generate", post(reading::generate_task1))
        .route("/reading/task2/generate", post(reading::generate_task2))
        .route("/reading/task3/generate", post(reading::generate_task3))
        .route("/reading/task4/generate", post(reading::generate_task4))
        .route("/reading/health", get(health::reading_health));

    let listening_api = Router::new()
        .route("/listening/part1/generate", post(listening::generate_part1))
        .route("/listening/part2/generate", post(listening::generate_part2))
        .route("/listening/part3/generate", post(listening::generate_part3))
        .route("/listening/part4/generate", post(listening::generate_part4))
        .route("/listening/part5/generate", post(listening::generate_part5))
        .route("/listening/part6/generate", post(listening::generate_part6))
        .route("/listening/health", get(health::listening_health));

    let writing_api = Router::new()
        .route("/writing/task1/generate", post(writing::generate_task1))
        .route("/writing/task1/review", post(writing::review_task1))
        .route("/writing/task2/generate", post(writing::generate_task2))
        .route("/writing/task2/review", post(writing::review_task2))
        .route("/writing/health", get(health::writing_health));

    let speaking_api = Router::new()
        .route("/speaking/task1/generate", post(speaking::generate_task1))
        .route("/speaking/task1/score", post(speaking::score_task::<AdviceScenario>))
        .route("/speaking/task2/generate", post(speaking::generate_task2))
        .route("/speaking/task2/score", post(speaking::score_task::<ExperienceScenario>))
        .route("/speaking/task3/generate", post(speaking::generate_task3))
        .route("/speaking/task3/score", post(speaking::score_task::<SceneScenario>))
        .route("/speaking/task4/generate", post(speaking::generate_task4))
        .route("/speaking/task4/score", post(speaking::score_task::<PredictionScenario>))
        .route("/speaking/task5/generate", post(speaking::generate_task5))
        .route("/speaking/task5/score", post(speaking::score_task::<ComparisonScenario>))
        .route("/speaking/task6/generate", post(speaking::generate_task6))
        .route(
            "/speaking/task6/score",
            post(speaking::score_task::<DifficultSituationScenario>),
        )
        .route("/speaking/task7/generate", post(speaking::generate_task7))
        .route("/speaking/task7/score", post(speaking::score_task::<OpinionScenario>))
        .route("/speaking/task8/generate", post(speaking::generate_task8))
        .route(
            "/speaking/task8/score",
            post(speaking::score_task::<UnusualSituationScenario>),
        )
        .route("/speaking/images/generate", post(speaking::generate_image))
        .route("/speaking/health", get(health::speaking_health));

    let images_api = Router::new()
        .route("/images/generate", post(images::generate_image))
        .route("/images/health", get(health::images_health));

    base_routes
        .merge(reading_api)
        .merge(listening_api)
        .merge(writing_api)
        .merge(speaking_api)
        .merge(images_api)
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(max_body_bytes))
}
