//! Safety Firewall: runs before any generative step
//!
//! Rules, first match wins:
//! 1. high-risk phrase in text        → CRISIS (S101)
//! 2. text score ≤ negative threshold → CRISIS (S102)
//! 3. voice present and stress HIGH   → CRISIS (S103)
//! 4. otherwise                       → SAFE
//!
//! Stateless. Every call sees only its own text and voice arguments, so
//! "last known" voice metrics must be passed in explicitly by the caller.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, warn};

use crate::config::SafetyConfig;
use crate::core::text_tagger::fold_apostrophes;
use crate::core::{StressScorer, TextTagger};
use crate::types::{
    ReasonCode, SafetyDecision, SentimentTag, StressLevel, TextAnalysisResult, VoiceMetrics,
};

lazy_static! {
    static ref RE_WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Tag priority used to pick the single tag handed to the stress scorer
const REPRESENTATIVE_PRIORITY: [SentimentTag; 4] = [
    SentimentTag::Stress,
    SentimentTag::Anxiety,
    SentimentTag::Depression,
    SentimentTag::Positivity,
];

/// Pick the scorer tag: first of stress, anxiety, depression, positivity; else neutral
pub fn representative_tag(analysis: &TextAnalysisResult) -> SentimentTag {
    REPRESENTATIVE_PRIORITY
        .into_iter()
        .find(|t| analysis.has_tag(*t))
        .unwrap_or(SentimentTag::Neutral)
}

/// Deterministic crisis gate
#[derive(Debug)]
pub struct SafetyFirewall {
    /// Lower-cased, whitespace-collapsed phrases
    phrases: Vec<String>,
    negative_threshold: f64,
    pitch_norm_max: f64,
    energy_norm_max: f64,
    tagger: TextTagger,
    scorer: StressScorer,
}

impl Default for SafetyFirewall {
    fn default() -> Self {
        Self::new(&SafetyConfig::default())
    }
}

impl SafetyFirewall {
    pub fn new(config: &SafetyConfig) -> Self {
        let phrases = config
            .crisis_phrases
            .iter()
            .map(|p| normalize(p))
            .filter(|p| !p.is_empty())
            .collect();

        Self {
            phrases,
            negative_threshold: config.negative_score_threshold,
            pitch_norm_max: config.pitch_norm_max,
            energy_norm_max: config.energy_norm_max,
            tagger: TextTagger::new(),
            scorer: StressScorer::new(),
        }
    }

    /// Tag the text and evaluate
    pub fn evaluate(&self, text: &str, voice: Option<&VoiceMetrics>) -> SafetyDecision {
        let analysis = self.tagger.analyze(text);
        self.evaluate_with_analysis(text, &analysis, voice)
    }

    /// Evaluate using an already computed tagger result for `text`
    pub fn evaluate_with_analysis(
        &self,
        text: &str,
        analysis: &TextAnalysisResult,
        voice: Option<&VoiceMetrics>,
    ) -> SafetyDecision {
        let decision = self.compute(text, analysis, voice);
        if decision.is_safe() {
            debug!(code = decision.code.code(), "firewall decision");
        } else {
            warn!(code = decision.code.code(), "firewall forced crisis");
        }
        decision
    }

    fn compute(
        &self,
        text: &str,
        analysis: &TextAnalysisResult,
        voice: Option<&VoiceMetrics>,
    ) -> SafetyDecision {
        // Rule 1: literal phrase match, unconditional
        if let Some(phrase) = self.matched_phrase(text) {
            return SafetyDecision::crisis(
                ReasonCode::S101_CRISIS_KEYWORD,
                format!("Detected high-risk phrase: \"{}\"", phrase),
                None,
            );
        }

        // Rule 2: sentiment magnitude
        if analysis.score <= self.negative_threshold {
            return SafetyDecision::crisis(
                ReasonCode::S102_CRISIS_NEGATIVE_SENTIMENT,
                format!(
                    "Very negative sentiment score ({:.2}) at or below {:.2}",
                    analysis.score, self.negative_threshold
                ),
                None,
            );
        }

        // Rule 3: voice-integrated stress
        if let Some(metrics) = voice {
            let normalized = metrics.normalize(self.pitch_norm_max, self.energy_norm_max);
            let tag = representative_tag(analysis);
            let stress = self.scorer.score_voice(normalized, Some(tag));
            if stress.stress_level == StressLevel::High {
                return SafetyDecision::crisis(
                    ReasonCode::S103_CRISIS_VOICE_STRESS,
                    format!(
                        "High stress detected from voice and text (score {:.2}, tag {})",
                        stress.score, tag
                    ),
                    Some(stress.suggestions),
                );
            }
        }

        SafetyDecision::safe()
    }

    /// First configured phrase contained in the text
    pub fn matched_phrase(&self, text: &str) -> Option<&str> {
        let normalized = normalize(text);
        self.phrases
            .iter()
            .find(|p| normalized.contains(p.as_str()))
            .map(String::as_str)
    }
}

/// Lower-case, collapse whitespace runs and fold curly apostrophes so
/// "kill   myself" and "don’t" still match
fn normalize(text: &str) -> String {
    fold_apostrophes(&RE_WHITESPACE.replace_all(text.trim(), " ").to_lowercase())
}

// =============================================================================
// TESTS
// =============================================================================
