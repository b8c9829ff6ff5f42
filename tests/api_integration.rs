//! Integration tests for the HTTP API

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use solace::core::{create_router, WellnessPipeline};
use tower::ServiceExt;

fn create_test_router() -> axum::Router {
    create_router(Arc::new(WellnessPipeline::in_memory()))
}

async fn post_json(path: &str, body: Value) -> (StatusCode, Value) {
    let response = create_test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let response = create_test_router()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], solace::VERSION);
}

#[tokio::test]
async fn test_analyze_text_safe() {
    let (status, json) = post_json(
        "/analyze/text",
        json!({ "text": "I am feeling so overwhelmed and I can't sleep at all" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["safety"]["status"], "SAFE");
    assert_eq!(json["analysis"]["score"], -0.4);
    let tags: Vec<&str> = json["analysis"]["tags"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(tags, vec!["stress", "insomnia"]);
    assert_eq!(json["stress"]["stressLevel"], "MODERATE");

    let suggestions = json["suggestions"].as_array().unwrap();
    assert!(!suggestions.is_empty() && suggestions.len() <= 3);
    assert_eq!(json["source"]["kind"], "local");
}

#[tokio::test]
async fn test_analyze_text_crisis_is_ok_status() {
    let (status, json) = post_json("/analyze/text", json!({ "text": "I want to kill myself", "remote": true })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["safety"]["status"], "CRISIS");
    assert_eq!(json["safety"]["code"], "S101_CRISIS_KEYWORD");
    assert_eq!(json["safety"]["actions"].as_array().unwrap().len(), 3);
    assert_eq!(json["suggestions"], json!([]));
    assert!(json.get("source").is_none());
}

#[tokio::test]
async fn test_analyze_text_with_voice_metrics() {
    let (status, json) = post_json(
        "/analyze/text",
        json!({
            "text": "Big deadline tomorrow",
            "voiceMetrics": {
                "pitchVariance": 90.0,
                "energyVariance": 0.4,
                "speakingRate": 4.0,
                "duration": 6.0
            }
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["safety"]["code"], "S103_CRISIS_VOICE_STRESS");
    assert_eq!(json["stress"]["stressLevel"], "HIGH");
}

#[tokio::test]
async fn test_analyze_voice() {
    let (status, json) = post_json(
        "/analyze/voice",
        json!({ "samples": vec![0.0f32; 16_000], "sampleRate": 16_000, "tag": "insomnia" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["metrics"]["pitchVariance"], 0.0);
    assert_eq!(json["metrics"]["speakingRate"], 0.0);
    assert_eq!(json["metrics"]["duration"], 1.0);
    assert_eq!(json["stress"]["stressLevel"], "MODERATE");
}

#[tokio::test]
async fn test_analyze_voice_empty_samples() {
    let (status, json) = post_json("/analyze/voice", json!({ "samples": [], "sampleRate": 0 })).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["metrics"]["duration"], 0.0);
    assert_eq!(json["stress"]["stressLevel"], "LOW");
}

#[tokio::test]
async fn test_safety_endpoint() {
    let (status, json) = post_json("/safety", json!({ "text": "sad, lonely and worthless" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "CRISIS");
    assert_eq!(json["code"], "S102_CRISIS_NEGATIVE_SENTIMENT");

    let (_, json) = post_json("/safety", json!({ "text": "Lovely calm afternoon" })).await;
    assert_eq!(json["status"], "SAFE");
    assert_eq!(json["actions"], json!([]));
}

#[tokio::test]
async fn test_malformed_body_rejected() {
    let response = create_test_router()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/analyze/text")
                .header("content-type", "application/json")
                .body(Body::from("{ \"text\": "))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_unknown_route() {
    let response = create_test_router()
        .oneshot(Request::builder().uri("/analyze/unknown").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
