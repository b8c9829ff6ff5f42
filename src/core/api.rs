//! HTTP API for Solace
//!
//! Endpoints:
//! - GET  /health         - Health check
//! - POST /analyze/text   - Tag, firewall, suggestions
//! - POST /analyze/voice  - Voice metrics + stress
//! - POST /safety         - Firewall decision only
//!
//! CRISIS is a normal 200 payload, never an error status.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::core::WellnessPipeline;
use crate::error::Result;
use crate::types::{JournalReport, SafetyDecision, SentimentTag, VoiceMetrics, VoiceReport};

/// App state
pub struct AppState {
    pub pipeline: Arc<WellnessPipeline>,
}

/// Analyze text request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeTextRequest {
    pub text: String,
    /// Caller's last known voice metrics
    #[serde(default)]
    pub voice_metrics: Option<VoiceMetrics>,
    /// Opt in to remote suggestions
    #[serde(default)]
    pub remote: bool,
}

/// Analyze voice request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeVoiceRequest {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
    /// Dominant tag of the most recent journal entry
    #[serde(default)]
    pub tag: Option<String>,
}

/// Safety-only request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafetyRequest {
    pub text: String,
    #[serde(default)]
    pub voice_metrics: Option<VoiceMetrics>,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub message: String,
}

/// Create the API router
pub fn create_router(pipeline: Arc<WellnessPipeline>) -> Router {
    let state = Arc::new(AppState { pipeline });

    Router::new()
        .route("/health", get(health))
        .route("/analyze/text", post(analyze_text))
        .route("/analyze/voice", post(analyze_voice))
        .route("/safety", post(safety))
        .with_state(state)
}

/// Health check endpoint
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        message: "Solace analysis service is running".to_string(),
    })
}

/// Full text path
async fn analyze_text(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeTextRequest>,
) -> Json<JournalReport> {
    let report = state
        .pipeline
        .analyze_text(&req.text, req.voice_metrics.as_ref(), req.remote)
        .await;
    Json(report)
}

/// Voice metrics + stress. Extraction and the store append run on a
/// blocking thread.
async fn analyze_voice(
    State(state): State<Arc<AppState>>,
    Json(req): Json<AnalyzeVoiceRequest>,
) -> std::result::Result<Json<VoiceReport>, StatusCode> {
    let tag = req.tag.as_deref().and_then(SentimentTag::from_name);
    let pipeline = Arc::clone(&state.pipeline);
    tokio::task::spawn_blocking(move || pipeline.analyze_voice(&req.samples, req.sample_rate, tag))
        .await
        .map(Json)
        .map_err(|e| {
            warn!(error = %e, "voice analysis task failed");
            StatusCode::INTERNAL_SERVER_ERROR
        })
}

/// Firewall decision only
async fn safety(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SafetyRequest>,
) -> Json<SafetyDecision> {
    Json(state.pipeline.evaluate_safety(&req.text, req.voice_metrics.as_ref()))
}

/// Run the API server
pub async fn run_server(addr: &str, pipeline: Arc<WellnessPipeline>) -> Result<()> {
    let router = create_router(pipeline);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Solace API listening");
    println!("🌿 Solace API running on {}", addr);
    println!("  GET  /health        - Health check");
    println!("  POST /analyze/text  - Journal text analysis");
    println!("  POST /analyze/voice - Voice sample analysis");
    println!("  POST /safety        - Safety decision only");
    axum::serve(listener, router).await?;
    Ok(())
}
