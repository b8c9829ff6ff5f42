//! Timestamped records handed to the persistence collaborator

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::types::VoiceMetrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RecordPayload {
    Voice { metrics: VoiceMetrics },
    Journal { text: String },
}

/// One appended record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub payload: RecordPayload,
}

impl Record {
    pub fn voice(metrics: VoiceMetrics) -> Self {
        Self::at(Utc::now(), RecordPayload::Voice { metrics })
    }

    pub fn journal(text: impl Into<String>) -> Self {
        Self::at(Utc::now(), RecordPayload::Journal { text: text.into() })
    }

    /// Build a record with an explicit timestamp
    pub fn at(timestamp: DateTime<Utc>, payload: RecordPayload) -> Self {
        let id = record_id(&timestamp, &payload);
        Self { id, timestamp, payload }
    }
}

/// `<kind>_<yyyymmdd_hhmmss>_<first 4 bytes of sha256>`
fn record_id(timestamp: &DateTime<Utc>, payload: &RecordPayload) -> String {
    let (kind, body) = match payload {
        RecordPayload::Voice { metrics } => (
            "voice",
            format!(
                "{}|{}|{}|{}",
                metrics.pitch_variance, metrics.energy_variance, metrics.speaking_rate, metrics.duration
            ),
        ),
        RecordPayload::Journal { text } => ("journal", text.clone()),
    };

    let mut hasher = Sha256::new();
    hasher.update(kind.as_bytes());
    hasher.update(timestamp.to_rfc3339().as_bytes());
    hasher.update(body.as_bytes());
    let digest: [u8; 32] = hasher.finalize().into();

    format!(
        "{}_{}_{:02x}{:02x}{:02x}{:02x}",
        kind,
        timestamp.format("%Y%m%d_%H%M%S"),
        digest[0],
        digest[1],
        digest[2],
        digest[3]
    )
}
