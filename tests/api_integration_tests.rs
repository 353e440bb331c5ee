//! Integration Tests for API Endpoints
//!
//! Tests the full request/response cycle for each endpoint against a
//! scripted upstream source, so no network is involved.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use trivia_dash::api::create_router;
use trivia_dash::cache::ResponseCache;
use trivia_dash::leaderboard::Leaderboard;
use trivia_dash::upstream::{ApiErrorCode, FetchOutcome, QueryParams, QuestionSource, RawQuestion};
use trivia_dash::AppState;

// == Helper Functions ==

/// Upstream stand-in that always returns the same entity-encoded batch.
struct FixedSource;

#[async_trait]
impl QuestionSource for FixedSource {
    async fn fetch(&self, _params: &QueryParams) -> (FetchOutcome, f64) {
        let batch = vec![RawQuestion {
            category: "Science &amp; Nature".to_string(),
            question_type: "multiple".to_string(),
            difficulty: "easy".to_string(),
            question: "Who wrote &quot;1984&quot;?".to_string(),
            correct_answer: "George Orwell".to_string(),
            incorrect_answers: vec![
                "Aldous Huxley".to_string(),
                "Ray Bradbury".to_string(),
                "Arthur C. Clarke".to_string(),
            ],
        }];
        (FetchOutcome::Success(batch), 7.5)
    }
}

/// Upstream stand-in that always reports an error code.
struct ErrorSource(ApiErrorCode);

#[async_trait]
impl QuestionSource for ErrorSource {
    async fn fetch(&self, _params: &QueryParams) -> (FetchOutcome, f64) {
        (FetchOutcome::ApiError(self.0), 3.0)
    }
}

fn create_test_app() -> Router {
    create_app_with(Arc::new(FixedSource))
}

fn create_app_with(source: Arc<dyn QuestionSource>) -> Router {
    let state = AppState::new(
        source,
        ResponseCache::new(64, 60),
        Leaderboard::in_memory().unwrap(),
    );
    create_router(state)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_to_json(response.into_body()).await)
}

/// Starts a game and returns its session id.
async fn start_game(app: &Router) -> String {
    let (status, json) = post_json(app, "/api/game", json!({"amount": "1"})).await;
    assert_eq!(status, StatusCode::OK);
    json["session_id"].as_str().unwrap().to_string()
}

// == Preview Endpoint Tests ==

#[tokio::test]
async fn test_preview_success() {
    let app = create_test_app();

    let (status, json) = get_json(&app, "/api/preview?amount=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["cached"], false);
    assert_eq!(json["questions"].as_array().unwrap().len(), 1);
    // Preview returns the raw batch, still entity-encoded
    assert!(json["questions"][0]["question"]
        .as_str()
        .unwrap()
        .contains("&quot;"));
}

#[tokio::test]
async fn test_preview_second_call_is_cached() {
    let app = create_test_app();

    let (_, first) = get_json(&app, "/api/preview?amount=5&difficulty=easy").await;
    assert_eq!(first["cached"], false);

    let (_, second) = get_json(&app, "/api/preview?amount=5&difficulty=easy").await;
    assert_eq!(second["cached"], true);
    assert_eq!(second["latency_ms"], 0.0);
}

#[tokio::test]
async fn test_preview_invalid_amount_rejected() {
    let app = create_test_app();

    let (status, json) = get_json(&app, "/api/preview?amount=99").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("between 1 and 50"));
}

#[tokio::test]
async fn test_preview_upstream_error_reported() {
    let app = create_app_with(Arc::new(ErrorSource(ApiErrorCode::NoResults)));

    let (status, json) = get_json(&app, "/api/preview?amount=50").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], false);
    assert!(json["error"].as_str().unwrap().contains("No results"));

    // The error code is cached like a success
    let (_, second) = get_json(&app, "/api/preview?amount=50").await;
    assert_eq!(second["cached"], true);
}

// == Game Flow Tests ==

#[tokio::test]
async fn test_game_start_returns_session() {
    let app = create_test_app();

    let (status, json) = post_json(&app, "/api/game", json!({"amount": "1"})).await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["session_id"].as_str().is_some());
    assert_eq!(json["total"], 1);
}

#[tokio::test]
async fn test_game_start_upstream_error_is_bad_gateway() {
    let app = create_app_with(Arc::new(ErrorSource(ApiErrorCode::TokenEmpty)));

    let (status, json) = post_json(&app, "/api/game", json!({})).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("Token empty"));
}

#[tokio::test]
async fn test_question_is_decoded_and_shuffled() {
    let app = create_test_app();
    let session_id = start_game(&app).await;

    let (status, json) = get_json(&app, &format!("/api/game/{}/question", session_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["question"], "Who wrote \"1984\"?");
    assert_eq!(json["category"], "Science & Nature");
    assert_eq!(json["answers"].as_array().unwrap().len(), 4);
    assert_eq!(json["index"], 0);
    assert_eq!(json["total"], 1);
    // The correct index must not leak to the player
    assert!(json.get("correct_index").is_none());
}

#[tokio::test]
async fn test_answer_flow_and_results() {
    let app = create_test_app();
    let session_id = start_game(&app).await;

    let (_, question) = get_json(&app, &format!("/api/game/{}/question", session_id)).await;
    let correct_index = question["answers"]
        .as_array()
        .unwrap()
        .iter()
        .position(|a| a == "George Orwell")
        .unwrap();

    let (status, verdict) = post_json(
        &app,
        &format!("/api/game/{}/answer", session_id),
        json!({ "answer_index": correct_index }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(verdict["correct"], true);
    assert_eq!(verdict["finished"], true);

    let (status, results) = get_json(&app, &format!("/api/game/{}/results", session_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results["score"], 1);
    assert_eq!(results["total"], 1);
    assert_eq!(results["grade"], "A");
}

#[tokio::test]
async fn test_wrong_answer_reveals_correct() {
    let app = create_test_app();
    let session_id = start_game(&app).await;

    let (_, question) = get_json(&app, &format!("/api/game/{}/question", session_id)).await;
    let wrong_index = question["answers"]
        .as_array()
        .unwrap()
        .iter()
        .position(|a| a != "George Orwell")
        .unwrap();

    let (_, verdict) = post_json(
        &app,
        &format!("/api/game/{}/answer", session_id),
        json!({ "answer_index": wrong_index }),
    )
    .await;
    assert_eq!(verdict["correct"], false);
    assert_eq!(verdict["correct_answer"], "George Orwell");
}

#[tokio::test]
async fn test_out_of_range_answer_rejected() {
    let app = create_test_app();
    let session_id = start_game(&app).await;

    let (status, json) = post_json(
        &app,
        &format!("/api/game/{}/answer", session_id),
        json!({ "answer_index": 10 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("Invalid answer"));
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let app = create_test_app();

    let (status, _) = get_json(
        &app,
        "/api/game/00000000-0000-0000-0000-000000000000/question",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_session() {
    let app = create_test_app();
    let session_id = start_game(&app).await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/game/{}", session_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (status, _) = get_json(&app, &format!("/api/game/{}/question", session_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// == Leaderboard Tests ==

#[tokio::test]
async fn test_save_score_and_leaderboard() {
    let app = create_test_app();
    let session_id = start_game(&app).await;

    let (_, question) = get_json(&app, &format!("/api/game/{}/question", session_id)).await;
    let correct_index = question["answers"]
        .as_array()
        .unwrap()
        .iter()
        .position(|a| a == "George Orwell")
        .unwrap();
    post_json(
        &app,
        &format!("/api/game/{}/answer", session_id),
        json!({ "answer_index": correct_index }),
    )
    .await;

    let (status, saved) = post_json(
        &app,
        &format!("/api/game/{}/score", session_id),
        json!({ "name": "alice" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(saved["id"].as_i64().is_some());

    let (status, board) = get_json(&app, "/api/leaderboard").await;
    assert_eq!(status, StatusCode::OK);
    let scores = board["scores"].as_array().unwrap();
    assert_eq!(scores.len(), 1);
    assert_eq!(scores[0]["name"], "alice");
    assert_eq!(scores[0]["score"], 1);
}

#[tokio::test]
async fn test_leaderboard_difficulty_filter() {
    let app = create_test_app();
    let session_id = start_game(&app).await;

    post_json(
        &app,
        &format!("/api/game/{}/score", session_id),
        json!({ "name": "bob" }),
    )
    .await;

    // FixedSource games carry no difficulty filter, so they save as "any"
    let (_, filtered) = get_json(&app, "/api/leaderboard?difficulty=hard").await;
    assert!(filtered["scores"].as_array().unwrap().is_empty());

    let (_, any) = get_json(&app, "/api/leaderboard?difficulty=any").await;
    assert_eq!(any["scores"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_save_score_blank_name_rejected() {
    let app = create_test_app();
    let session_id = start_game(&app).await;

    let (status, json) = post_json(
        &app,
        &format!("/api/game/{}/score", session_id),
        json!({ "name": "   " }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(json["error"].as_str().unwrap().contains("name"));
}

// == Service Endpoint Tests ==

#[tokio::test]
async fn test_categories_endpoint() {
    let app = create_test_app();

    let (status, json) = get_json(&app, "/api/categories").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["categories"].as_array().unwrap().len(), 24);
    assert_eq!(json["categories"][0]["name"], "General Knowledge");
}

#[tokio::test]
async fn test_stats_endpoint_tracks_hits() {
    let app = create_test_app();

    get_json(&app, "/api/preview?amount=3").await; // miss
    get_json(&app, "/api/preview?amount=3").await; // hit

    let (status, json) = get_json(&app, "/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["hits"], 1);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["hit_rate"], 0.5);
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let (status, json) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "healthy");
    assert!(json["timestamp"].as_str().is_some());
}
