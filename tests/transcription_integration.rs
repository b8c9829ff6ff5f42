//! Integration tests for the transcription client
//!
//! A mock HTTP server stands in for the speech-to-text service.

use std::time::Duration;

use serde_json::json;
use solace::config::TranscriptionConfig;
use solace::core::{Transcript, TranscriptionClient};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> TranscriptionClient {
    TranscriptionClient::new(server.uri(), Duration::from_secs(2), 1000).unwrap()
}

fn fake_wav(len: usize) -> Vec<u8> {
    let mut bytes = b"RIFF".to_vec();
    bytes.resize(len, 0);
    bytes
}

#[tokio::test]
async fn test_transcribe_success_trims_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "  rough day at work  " })))
        .expect(1)
        .mount(&server)
        .await;

    let text = client_for(&server).transcribe(fake_wav(4096), "entry.wav").await;
    assert_eq!(text, "rough day at work");

    let requests = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(body.contains("filename=\"entry.wav\""));
}

#[tokio::test]
async fn test_small_upload_is_silence_without_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "text": "ghost" })))
        .expect(0)
        .mount(&server)
        .await;

    let transcript = client_for(&server).transcribe_raw(fake_wav(999), "tiny.wav").await.unwrap();
    assert_eq!(transcript, Transcript::default());
}

#[tokio::test]
async fn test_service_error_field_is_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "text": "", "error": "model not loaded" })),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.transcribe_raw(fake_wav(2048), "entry.wav").await.is_err());
    assert_eq!(client.transcribe(fake_wav(2048), "entry.wav").await, "");
}

#[tokio::test]
async fn test_http_error_gives_empty_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/transcribe"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    assert_eq!(client_for(&server).transcribe(fake_wav(2048), "entry.wav").await, "");
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "ok", "message": "ready" })),
        )
        .mount(&server)
        .await;

    assert!(client_for(&server).health().await);

    let empty = MockServer::start().await;
    assert!(!client_for(&empty).health().await);
}

#[test]
fn test_from_config_requires_endpoint() {
    assert!(TranscriptionClient::from_config(&TranscriptionConfig::default()).is_none());

    let config = TranscriptionConfig {
        endpoint: Some("http://127.0.0.1:5000/".to_string()),
        ..TranscriptionConfig::default()
    };
    assert!(TranscriptionClient::from_config(&config).is_some());
}
