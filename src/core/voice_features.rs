//! Voice feature extractor: pitch variance, energy variance, speaking rate
//!
//! Windowed analysis (2048 / 1024 hop by default). Per window:
//! - RMS energy
//! - autocorrelation pitch over 80-400 Hz lags, voiced windows only
//!
//! Speaking rate counts rising edges of the smoothed energy envelope with
//! hysteresis, divided by duration. Degenerate input yields zero metrics.

use tracing::debug;

use crate::config::VoiceConfig;
use crate::types::VoiceMetrics;

/// Deterministic feature extractor
#[derive(Debug, Clone, Default)]
pub struct VoiceFeatureExtractor {
    config: VoiceConfig,
}

impl VoiceFeatureExtractor {
    /// Create extractor with default parameters
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: VoiceConfig) -> Self {
        Self { config }
    }

    /// Extract metrics from a mono buffer. Never fails.
    pub fn extract(&self, samples: &[f32], sample_rate: u32) -> VoiceMetrics {
        if samples.is_empty() || sample_rate == 0 {
            return VoiceMetrics::zero();
        }

        let duration = samples.len() as f64 / sample_rate as f64;
        let mut energies = Vec::new();
        let mut pitches = Vec::new();

        for window in self.windows(samples) {
            let rms = rms(window);
            energies.push(rms);

            if rms > self.config.voicing_threshold {
                if let Some(hz) = self.estimate_pitch(window, sample_rate) {
                    pitches.push(hz);
                }
            }
        }

        let peaks = self.count_envelope_peaks(&energies);
        let metrics = VoiceMetrics {
            pitch_variance: std_dev(&pitches),
            energy_variance: std_dev(&energies),
            speaking_rate: finite_or_zero(peaks as f64 / duration),
            duration,
        };

        debug!(
            windows = energies.len(),
            voiced = pitches.len(),
            peaks,
            "extracted voice metrics"
        );
        metrics
    }

    /// Overlapping analysis windows. A buffer shorter than one window is
    /// analysed as a single short window.
    fn windows<'a>(&self, samples: &'a [f32]) -> Vec<&'a [f32]> {
        let len = self.config.window_len.max(1);
        let hop = self.config.hop_len.max(1);

        if samples.len() <= len {
            return vec![samples];
        }

        let mut out = Vec::with_capacity(samples.len() / hop);
        let mut start = 0;
        while start + len <= samples.len() {
            out.push(&samples[start..start + len]);
            start += hop;
        }
        out
    }

    /// Autocorrelation pitch estimate. Picks the lag in the configured
    /// pitch range with the largest correlation sum.
    fn estimate_pitch(&self, window: &[f32], sample_rate: u32) -> Option<f64> {
        let sr = sample_rate as f64;
        if self.config.max_pitch_hz <= 0.0 || self.config.min_pitch_hz <= 0.0 {
            return None;
        }

        let min_lag = ((sr / self.config.max_pitch_hz).floor() as usize).max(1);
        let max_lag = ((sr / self.config.min_pitch_hz).ceil() as usize).min(window.len().saturating_sub(1));
        if min_lag > max_lag {
            return None;
        }

        let mut best_lag = 0;
        let mut best_sum = 0.0f64;
        for lag in min_lag..=max_lag {
            let sum: f64 = window[..window.len() - lag]
                .iter()
                .zip(&window[lag..])
                .map(|(a, b)| *a as f64 * *b as f64)
                .sum();
            if sum > best_sum {
                best_sum = sum;
                best_lag = lag;
            }
        }

        if best_lag == 0 {
            None
        } else {
            Some(sr / best_lag as f64)
        }
    }

    /// Rising-edge count over the smoothed envelope.
    fn count_envelope_peaks(&self, energies: &[f64]) -> usize {
        let smoothed = moving_average(energies, self.config.smoothing_radius);
        let mean = mean(&smoothed);
        let threshold = mean * self.config.peak_threshold_ratio;
        let rearm = threshold * self.config.hysteresis_ratio;

        if threshold <= 0.0 {
            return 0;
        }

        let mut peaks = 0;
        let mut above = false;
        for &e in &smoothed {
            if !above && e > threshold {
                peaks += 1;
                above = true;
            } else if above && e < rearm {
                above = false;
            }
        }
        peaks
    }
}

fn rms(window: &[f32]) -> f64 {
    if window.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = window.iter().map(|s| (*s as f64) * (*s as f64)).sum();
    finite_or_zero((sum_sq / window.len() as f64).sqrt())
}

fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    finite_or_zero(values.iter().sum::<f64>() / values.len() as f64)
}

/// Population standard deviation; 0 for empty input
fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    finite_or_zero(var.sqrt())
}

fn moving_average(values: &[f64], radius: usize) -> Vec<f64> {
    (0..values.len())
        .map(|i| {
            let lo = i.saturating_sub(radius);
            let hi = (i + radius).min(values.len() - 1);
            mean(&values[lo..=hi])
        })
        .collect()
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() {
        v
    } else {
        0.0
    }
}

// =============================================================================
// TESTS
// =============================================================================
