//! Voice feature structures

use serde::{Deserialize, Serialize};

/// Stress-correlated features extracted from one recorded sample.
///
/// All fields are finite and non-negative. `duration` is zero only for
/// degenerate input (no samples or no sample rate).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceMetrics {
    /// Standard deviation of per-window pitch estimates (Hz)
    pub pitch_variance: f64,
    /// Standard deviation of per-window RMS energy
    pub energy_variance: f64,
    /// Envelope peaks per second
    pub speaking_rate: f64,
    /// Sample length in seconds
    pub duration: f64,
}

impl VoiceMetrics {
    /// All-zero metrics for silent or malformed input
    pub fn zero() -> Self {
        Self::default()
    }

    /// Map pitch and energy variance onto `[0,1]` against the given scale maxima.
    pub fn normalize(&self, pitch_max: f64, energy_max: f64) -> NormalizedVoice {
        NormalizedVoice {
            pitch: unit_ratio(self.pitch_variance, pitch_max),
            energy: unit_ratio(self.energy_variance, energy_max),
        }
    }
}

/// Voice features on the `[0,1]` scale the stress scorer expects.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct NormalizedVoice {
    pub pitch: f64,
    pub energy: f64,
}

fn unit_ratio(value: f64, max: f64) -> f64 {
    if !value.is_finite() || !max.is_finite() || max <= 0.0 {
        return 0.0;
    }
    (value / max).clamp(0.0, 1.0)
}
