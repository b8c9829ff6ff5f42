//! TOML configuration
//!
//! Every section has defaults taken from the constants in `lib.rs`, so an
//! empty file (or no file) is a valid configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, SolaceError};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub voice: VoiceConfig,
    pub safety: SafetyConfig,
    pub suggestions: SuggestionConfig,
    pub transcription: TranscriptionConfig,
    pub store: StoreConfig,
    pub server: ServerConfig,
}

/// Signal feature extraction parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceConfig {
    pub window_len: usize,
    pub hop_len: usize,
    pub voicing_threshold: f64,
    pub min_pitch_hz: f64,
    pub max_pitch_hz: f64,
    pub smoothing_radius: usize,
    pub peak_threshold_ratio: f64,
    pub hysteresis_ratio: f64,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            window_len: crate::WINDOW_LEN,
            hop_len: crate::HOP_LEN,
            voicing_threshold: crate::VOICING_THRESHOLD,
            min_pitch_hz: crate::MIN_PITCH_HZ,
            max_pitch_hz: crate::MAX_PITCH_HZ,
            smoothing_radius: crate::SMOOTHING_RADIUS,
            peak_threshold_ratio: crate::PEAK_THRESHOLD_RATIO,
            hysteresis_ratio: crate::HYSTERESIS_RATIO,
        }
    }
}

/// Safety firewall rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetyConfig {
    /// Lower-case phrases that force CRISIS on a substring match
    pub crisis_phrases: Vec<String>,
    pub negative_score_threshold: f64,
    pub pitch_norm_max: f64,
    pub energy_norm_max: f64,
}

/// Default high-risk phrases.
pub const DEFAULT_CRISIS_PHRASES: &[&str] = &[
    "kill myself",
    "killing myself",
    "end my life",
    "ending my life",
    "want to die",
    "wanna die",
    "suicide",
    "suicidal",
    "hurt myself",
    "harm myself",
    "self harm",
    "self-harm",
    "cut myself",
    "better off dead",
    "no reason to live",
    "don't want to be alive",
    "dont want to be alive",
];

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            crisis_phrases: DEFAULT_CRISIS_PHRASES.iter().map(|p| p.to_string()).collect(),
            negative_score_threshold: crate::NEGATIVE_SCORE_THRESHOLD,
            pitch_norm_max: crate::PITCH_NORM_MAX,
            energy_norm_max: crate::ENERGY_NORM_MAX,
        }
    }
}

/// Suggestion composer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestionConfig {
    /// Remote suggestion URL. `None` disables the remote tier.
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    pub max_suggestions: usize,
    pub elevated_pitch_threshold: f64,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 10,
            max_suggestions: crate::MAX_SUGGESTIONS,
            elevated_pitch_threshold: crate::ELEVATED_PITCH_THRESHOLD,
        }
    }
}

/// Remote transcription service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// Base URL of the transcription service, e.g. `http://127.0.0.1:5000`
    pub endpoint: Option<String>,
    pub timeout_secs: u64,
    /// Uploads below this size are treated as silence
    pub min_upload_bytes: usize,
}

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            timeout_secs: 30,
            min_upload_bytes: 1000,
        }
    }
}

/// Record store settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSONL file. `None` keeps records in memory.
    pub path: Option<PathBuf>,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:3000".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| SolaceError::Config(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SolaceError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
