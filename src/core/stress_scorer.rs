//! Stress Scorer: normalized voice features + one tag → LOW / MODERATE / HIGH
//!
//! base  = 0.6 × pitch + 0.4 × energy
//! final = clamp(max(floor, base + delta), 0, 1)
//!
//! | tag                               | delta | floor |
//! |-----------------------------------|-------|-------|
//! | stress, anxiety, insomnia, concern| +0.3  | 0.45  |
//! | depression, hopeless              | +0.4  | 0.50  |
//! | positivity, happy                 | -0.2  | -     |
//! | neutral / anything else           |  0    | -     |

use crate::types::{NormalizedVoice, SentimentTag, StressLevel, StressResult};
use crate::{
    STRESS_THRESHOLD_HIGH, STRESS_THRESHOLD_MODERATE, STRESS_WEIGHT_ENERGY, STRESS_WEIGHT_PITCH,
};

/// Pure stress scorer
#[derive(Debug, Default, Clone, Copy)]
pub struct StressScorer;

impl StressScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score with the tag given by name (case-insensitive). Total: every
    /// input yields exactly one level.
    pub fn score(&self, pitch: f64, energy: f64, tag: Option<&str>) -> StressResult {
        let base = STRESS_WEIGHT_PITCH * unit(pitch) + STRESS_WEIGHT_ENERGY * unit(energy);
        let (delta, floor) = tag.map(tag_adjustment).unwrap_or((0.0, 0.0));
        let score = (base + delta).max(floor).clamp(0.0, 1.0);
        StressResult::new(categorize(score), score)
    }

    /// Typed variant
    pub fn score_tag(&self, pitch: f64, energy: f64, tag: Option<SentimentTag>) -> StressResult {
        self.score(pitch, energy, tag.as_ref().map(SentimentTag::as_str))
    }

    pub fn score_voice(&self, voice: NormalizedVoice, tag: Option<SentimentTag>) -> StressResult {
        self.score_tag(voice.pitch, voice.energy, tag)
    }
}

/// (delta, floor) for a tag name
fn tag_adjustment(tag: &str) -> (f64, f64) {
    match tag.trim().to_lowercase().as_str() {
        "stress" | "anxiety" | "insomnia" | "concern" => (0.3, 0.45),
        "depression" | "hopeless" => (0.4, 0.5),
        "positivity" | "happy" => (-0.2, 0.0),
        _ => (0.0, 0.0),
    }
}

fn categorize(score: f64) -> StressLevel {
    if score >= STRESS_THRESHOLD_HIGH {
        StressLevel::High
    } else if score >= STRESS_THRESHOLD_MODERATE {
        StressLevel::Moderate
    } else {
        StressLevel::Low
    }
}

/// Clamp to [0,1], NaN → 0
fn unit(v: f64) -> f64 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

// =============================================================================
// TESTS
// =============================================================================
