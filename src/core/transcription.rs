//! Client for the remote speech-to-text service
//!
//! POST `{endpoint}/transcribe` (multipart field `file`) → `{"text": "..."}`.
//! Tiny uploads are treated as silence and never sent. Failures resolve to
//! an empty transcript at the `transcribe` level; `transcribe_raw` keeps
//! the error for callers that want it.

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::TranscriptionConfig;
use crate::error::{Result, SolaceError};

/// Transcription service reply
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Transcript {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct HealthReply {
    status: String,
}

#[derive(Debug, Clone)]
pub struct TranscriptionClient {
    base_url: String,
    min_upload_bytes: usize,
    client: reqwest::Client,
}

impl TranscriptionClient {
    /// `None` when no endpoint is configured or the client cannot be built
    pub fn from_config(config: &TranscriptionConfig) -> Option<Self> {
        let endpoint = config.endpoint.as_ref()?;
        match Self::new(
            endpoint.clone(),
            Duration::from_secs(config.timeout_secs),
            config.min_upload_bytes,
        ) {
            Ok(client) => Some(client),
            Err(e) => {
                warn!(error = %e, "transcription disabled");
                None
            }
        }
    }

    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built with the timeout.
    pub fn new(
        base_url: impl Into<String>,
        timeout: Duration,
        min_upload_bytes: usize,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SolaceError::Remote(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            min_upload_bytes,
            client,
        })
    }

    /// Transcribe WAV bytes. Empty string on silence or any failure.
    pub async fn transcribe(&self, wav: Vec<u8>, file_name: &str) -> String {
        match self.transcribe_raw(wav, file_name).await {
            Ok(t) => t.text,
            Err(e) => {
                warn!(error = %e, "transcription failed, continuing with empty text");
                String::new()
            }
        }
    }

    /// Transcribe WAV bytes, surfacing failures.
    pub async fn transcribe_raw(&self, wav: Vec<u8>, file_name: &str) -> Result<Transcript> {
        if wav.len() < self.min_upload_bytes {
            debug!(bytes = wav.len(), "upload below minimum size, treating as silence");
            return Ok(Transcript::default());
        }

        let file_name = if file_name.is_empty() { "recording.wav" } else { file_name };
        let part = Part::bytes(wav)
            .file_name(file_name.to_string())
            .mime_str("audio/wav")
            .map_err(|e| SolaceError::Remote(e.to_string()))?;
        let form = Form::new().part("file", part);

        let resp = self
            .client
            .post(format!("{}/transcribe", self.base_url))
            .multipart(form)
            .send()
            .await
            .map_err(|e| SolaceError::Remote(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SolaceError::Remote(format!("HTTP {}", status.as_u16())));
        }

        let transcript: Transcript = resp
            .json()
            .await
            .map_err(|e| SolaceError::Remote(format!("malformed payload: {e}")))?;

        // The service reports its own failures as 200 + "error"
        if let Some(err) = transcript.error.as_deref().filter(|e| !e.is_empty()) {
            return Err(SolaceError::Remote(format!("service error: {err}")));
        }

        Ok(Transcript {
            text: transcript.text.trim().to_string(),
            error: None,
        })
    }

    /// True when `{endpoint}/health` answers 2xx with status "ok"
    pub async fn health(&self) -> bool {
        let resp = match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) if resp.status().is_success() => resp,
            _ => return false,
        };
        resp.json::<HealthReply>()
            .await
            .map(|h| h.status == "ok")
            .unwrap_or(false)
    }
}
