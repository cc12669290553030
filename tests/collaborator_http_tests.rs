//! Integration Tests for the HTTP Collaborator Clients
//!
//! Spins up throwaway axum servers that mimic the answer generator and the
//! scorer, then drives the real clients against them.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::Query,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use qa_cache::{
    error::CacheError,
    services::{AnswerGenerator, HttpAnswerGenerator, HttpScorer, ScoreMethod, Scorer},
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio_test::{assert_err, assert_ok};

// == Stub Servers ==

#[derive(Deserialize)]
struct AskParams {
    query: String,
}

async fn ask(Query(params): Query<AskParams>) -> Json<Value> {
    if params.query == "explode" {
        return Json(json!({ "error": "model overloaded" }));
    }
    Json(json!({ "answer": format!("You asked: {}", params.query) }))
}

async fn slow_ask() -> Json<Value> {
    tokio::time::sleep(Duration::from_secs(5)).await;
    Json(json!({ "answer": "too late" }))
}

async fn score(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let method = body["method"].as_str().unwrap_or_default().to_string();
    match method.as_str() {
        "combined" => (
            StatusCode::OK,
            Json(json!({
                "scores": { "tfidf": 0.5, "jaccard": 0.25, "levenshtein": 0.75 },
                "method": "combined",
                "recommended_score": 0.5
            })),
        ),
        "tfidf" | "jaccard" | "levenshtein" => {
            let same = body["llm_answer"] == body["best_answer"];
            let value = if same { 1.0 } else { 0.3 };
            (StatusCode::OK, Json(json!({ "score": value, "method": method })))
        }
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "detail": "unknown method" })),
        ),
    }
}

async fn spawn_stub() -> SocketAddr {
    let app = Router::new()
        .route("/ask", get(ask))
        .route("/slow", get(slow_ask))
        .route("/score", post(score));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

// == Generator Client Tests ==

#[tokio::test]
async fn test_generator_returns_answer() {
    let addr = spawn_stub().await;
    let generator = HttpAnswerGenerator::new(format!("http://{}/ask", addr)).unwrap();

    let answer = assert_ok!(generator.generate("why is the sky blue?").await);
    assert_eq!(answer, "You asked: why is the sky blue?");
}

#[tokio::test]
async fn test_generator_error_body_is_upstream_error() {
    let addr = spawn_stub().await;
    let generator = HttpAnswerGenerator::new(format!("http://{}/ask", addr)).unwrap();

    let err = assert_err!(generator.generate("explode").await);
    assert!(matches!(err, CacheError::Upstream(msg) if msg.contains("overloaded")));
}

#[tokio::test]
async fn test_generator_timeout() {
    let addr = spawn_stub().await;
    let generator =
        HttpAnswerGenerator::with_timeout(format!("http://{}/slow", addr), Duration::from_millis(200))
            .unwrap();

    let err = assert_err!(generator.generate("anything").await);
    assert!(matches!(err, CacheError::Upstream(_)));
}

#[tokio::test]
async fn test_generator_http_error_status() {
    let addr = spawn_stub().await;
    let generator = HttpAnswerGenerator::new(format!("http://{}/missing", addr)).unwrap();

    let err = assert_err!(generator.generate("anything").await);
    assert!(matches!(err, CacheError::Upstream(_)));
}

// == Scorer Client Tests ==

#[tokio::test]
async fn test_scorer_single_method() {
    let addr = spawn_stub().await;
    let scorer = HttpScorer::new(format!("http://{}/score", addr)).unwrap();

    let same = assert_ok!(scorer.score("abc", "abc", ScoreMethod::Tfidf).await);
    let different = assert_ok!(scorer.score("abc", "xyz", ScoreMethod::Jaccard).await);

    assert_eq!(same, 1.0);
    assert!((different - 0.3).abs() < 1e-9);
}

#[tokio::test]
async fn test_scorer_combined_method() {
    let addr = spawn_stub().await;
    let scorer = HttpScorer::new(format!("http://{}/score", addr)).unwrap();

    let value = assert_ok!(scorer.score("a", "b", ScoreMethod::Combined).await);
    assert!((value - 0.5).abs() < 1e-9);
}

#[tokio::test]
async fn test_scorer_unreachable() {
    let scorer =
        HttpScorer::with_timeout("http://127.0.0.1:1/score", Duration::from_secs(2)).unwrap();

    let err = assert_err!(scorer.score("a", "b", ScoreMethod::Tfidf).await);
    assert!(matches!(err, CacheError::Upstream(_)));
}
