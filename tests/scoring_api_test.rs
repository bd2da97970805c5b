mod common;

use axum::http::StatusCode;
use common::{app, app_with, send, ScriptedProvider};
use serde_json::{json, Value as JsonValue};

fn criterion(score: u8) -> JsonValue {
    json!({"score": score, "feedback": "ok", "strengths": ["clear"], "areas_for_improvement": []})
}

fn review_reply(overall: u8) -> String {
    json!({
        "overall_score": overall,
        "content_coherence": criterion(8),
        "vocabulary": criterion(7),
        "readability": criterion(8),
        "task_fulfillment": criterion(9),
        "overall_feedback": "Well organized email.",
        "improvement_strategies": ["Vary sentence openings"],
        "word_count": 12,
        "is_word_count_appropriate": false,
        "key_achievements": [],
        "priority_improvements": [],
        "option_support_quality": "strong"
    })
    .to_string()
}

fn email_review_request(user_text: &str) -> JsonValue {
    json!({
        "task_id": "writing-1",
        "user_text": user_text,
        "scenario": {
            "scenario_id": "sc-1",
            "title": "Broken heater",
            "context": "Your apartment heater stopped working in January.",
            "recipient": "Building manager",
            "purpose": "complaint",
            "key_points": ["Describe the problem", "Explain the impact", "Request a repair date"],
            "tone": "formal",
            "relationship": "tenant"
        }
    })
}

fn audio() -> JsonValue {
    json!({"audio_data": "data:audio/webm;base64,aGVsbG8=", "audio_format": "webm", "duration_seconds": 55.0})
}

fn evaluation_reply() -> String {
    json!({
        "scores": {
            "content_score": 8.0, "vocabulary_score": 7.0, "language_use_score": 7.5,
            "task_fulfillment_score": 8.0, "overall_score": 7.5
        },
        "feedback": {
            "strengths": ["Clear advice"], "improvements": ["More examples"],
            "specific_suggestions": ["Use linking words"], "fluency_notes": "Steady pace"
        },
        "confidence_level": 0.8
    })
    .to_string()
}

fn advice_submission() -> JsonValue {
    json!({
        "task_id": "speaking-1",
        "audio": audio(),
        "preparation_time_used": 28.0,
        "speaking_time_used": 85.0,
        "task_context": {
            "task_id": "speaking-1",
            "task_type": "giving_advice",
            "scenario": {
                "scenario_id": "sc", "title": "New city", "situation": "Friend is moving",
                "context": "Relocation", "person_description": "A close friend",
                "advice_topic": "lifestyle changes"
            },
            "instructions": {"task_description": "Give advice", "evaluation_criteria": ["Content"]},
            "estimated_duration_minutes": 3
        }
    })
}

#[tokio::test]
async fn email_review_recounts_words() {
    let reply = review_reply(8);
    let text = "word ".repeat(170);
    let (status, body) = send(
        app(&[&reply]),
        "POST",
        "/writing/task1/review",
        Some(email_review_request(text.trim())),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true, "{body}");
    assert_eq!(body["review"]["word_count"], 170);
    assert_eq!(body["review"]["is_word_count_appropriate"], true);
    assert_eq!(body["review"]["overall_score"], 8);
    assert!(body["review_time_seconds"].is_number());
}

#[tokio::test]
async fn out_of_range_review_is_reported_in_envelope() {
    let reply = review_reply(14);
    let (status, body) = send(
        app(&[&reply]),
        "POST",
        "/writing/task1/review",
        Some(email_review_request("Dear manager, the heater is broken.")),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert!(body["error_message"]
        .as_str()
        .unwrap()
        .starts_with("Failed to review Writing Task 1:"));
}

#[tokio::test]
async fn review_request_validation_is_bad_request() {
    let (status, body) = send(app(&[]), "POST", "/writing/task1/review", Some(email_review_request(""))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = send(app(&[]), "POST", "/writing/task1/review", Some(json!({"task_id": "x"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn survey_review_uses_submitted_option() {
    let reply = review_reply(9);
    let request = json!({
        "task_id": "writing-2",
        "user_text": "I prefer the pool because it is open all year.",
        "chosen_option": "An indoor swimming pool",
        "survey": {
            "survey_id": "sv",
            "title": "Community Recreation",
            "description": "Your city has funding for one facility.",
            "question": "Which facility should the city build?",
            "options": ["An indoor swimming pool", "An outdoor skating park"],
            "additional_considerations": []
        }
    });
    let (status, body) = send(app(&[&reply]), "POST", "/writing/task2/review", Some(request)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true, "{body}");
    assert_eq!(body["review"]["chosen_option"], "An indoor swimming pool");
    assert_eq!(body["review"]["option_support_quality"], "strong");
    assert_eq!(body["review"]["word_count"], 10);
}

#[tokio::test]
async fn speaking_submission_is_scored() {
    let reply = evaluation_reply();
    let app = app_with(ScriptedProvider::new(&[&reply]), Some("You should join a local club."));
    let (status, body) = send(app, "POST", "/speaking/task1/score", Some(advice_submission())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true, "{body}");

    let score = &body["score"];
    assert_eq!(score["task_id"], "speaking-1");
    assert_eq!(score["task_type"], "giving_advice");
    assert_eq!(score["transcript"], "You should join a local club.");
    assert_eq!(score["scores"]["overall_score"], 7.5);
    assert!(score["submission_id"].as_str().is_some_and(|id| !id.is_empty()));
}

#[tokio::test]
async fn failed_transcription_is_bad_request() {
    let app = app_with(ScriptedProvider::new(&[]), None);
    let (status, body) = send(app, "POST", "/speaking/task1/score", Some(advice_submission())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("No speech detected"));
}

#[tokio::test]
async fn comparison_score_requires_selected_option() {
    let option = json!({"option_id": "option_a", "title": "Condo", "description": "d",
                        "specifications": [], "pros": [], "cons": []});
    let submission = json!({
        "task_id": "speaking-5",
        "audio": audio(),
        "task_context": {
            "task_id": "speaking-5",
            "task_type": "comparing_and_persuading",
            "scenario": {
                "scenario_id": "sc", "title": "Homes", "context": "Buying", "decision_maker": "sibling",
                "category": "Home & Garden", "option_a": option, "option_b": option,
                "persuasion_context": "Prefers a house"
            },
            "instructions": {"task_description": "Choose", "evaluation_criteria": []},
            "estimated_duration_minutes": 3
        }
    });
    let app = app_with(ScriptedProvider::new(&[]), Some("I pick the condo."));
    let (status, body) = send(app, "POST", "/speaking/task5/score", Some(submission)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("selected_option"));
}

#[tokio::test]
async fn speaking_health_requires_speech_to_text() {
    let app = app_with(ScriptedProvider::new(&["HEALTH_CHECK_OK"]), None);
    let (status, body) = send(app, "GET", "/speaking/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["speech_to_text"], false);
    assert_eq!(body["provider_connected"], true);
}
