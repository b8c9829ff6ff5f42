//! Solace: local analysis and safety pipeline for a wellness journal
//!
//! audio → VoiceFeatureExtractor → metrics
//! text  → TextTagger → tags / score
//! (text, metrics) → SafetyFirewall → SAFE / CRISIS → SuggestionComposer

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use error::{Result, SolaceError};

// =============================================================================
// VOICE FEATURES
// =============================================================================

/// Analysis window length in samples
pub const WINDOW_LEN: usize = 2048;

/// Hop between windows in samples (50% overlap)
pub const HOP_LEN: usize = 1024;

/// RMS above which a window counts as voiced
pub const VOICING_THRESHOLD: f64 = 0.01;

/// Human pitch search range (Hz)
pub const MIN_PITCH_HZ: f64 = 80.0;
pub const MAX_PITCH_HZ: f64 = 400.0;

/// Moving-average radius (in windows) for the energy envelope
pub const SMOOTHING_RADIUS: usize = 3;

/// Peak threshold as a fraction of mean smoothed energy
pub const PEAK_THRESHOLD_RATIO: f64 = 0.8;

/// Envelope must fall below this fraction of the peak threshold to re-arm
pub const HYSTERESIS_RATIO: f64 = 0.5;

// =============================================================================
// TEXT TAGGER
// =============================================================================

/// Linear squashing of the raw keyword score. Arbitrary, not calibrated.
pub const SENTIMENT_SCALE: f64 = 0.2;

// =============================================================================
// STRESS SCORER [weights sum = 1.0]
// =============================================================================

pub const STRESS_WEIGHT_PITCH: f64 = 0.6;
pub const STRESS_WEIGHT_ENERGY: f64 = 0.4;

pub const STRESS_THRESHOLD_HIGH: f64 = 0.7;
pub const STRESS_THRESHOLD_MODERATE: f64 = 0.4;

// =============================================================================
// SAFETY FIREWALL
// =============================================================================

/// Text score at or below this forces CRISIS
pub const NEGATIVE_SCORE_THRESHOLD: f64 = -0.6;

/// Pitch standard deviation (Hz) that maps to 1.0
pub const PITCH_NORM_MAX: f64 = 100.0;

/// Energy standard deviation that maps to 1.0
pub const ENERGY_NORM_MAX: f64 = 0.5;

// =============================================================================
// SUGGESTIONS
// =============================================================================

pub const MAX_SUGGESTIONS: usize = 3;

/// Normalized pitch variance at which the "elevated pitch" pool is used
pub const ELEVATED_PITCH_THRESHOLD: f64 = 0.5;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "0.3.0";
