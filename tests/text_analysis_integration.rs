//! Integration tests for text tagging and stress scoring
//!
//! Tests the path: text → TextTagger → representative tag → StressScorer

use pretty_assertions::assert_eq;
use solace::core::{representative_tag, StressScorer, TextTagger};
use solace::types::{SentimentTag, StressLevel};

/// Overwhelm plus sleeplessness tags both themes with a negative score
#[test]
fn test_overwhelmed_and_sleepless() {
    let tagger = TextTagger::new();
    let result = tagger.analyze("I am feeling so overwhelmed and I can't sleep at all");

    assert!(result.has_tag(SentimentTag::Stress));
    assert!(result.has_tag(SentimentTag::Insomnia));
    assert!(!result.has_tag(SentimentTag::Neutral));
    assert!(result.score < 0.0);
    assert_eq!(result.score, -0.4);
    assert_eq!(result.stress_signals, vec!["overwhelmed".to_string(), "can't sleep".to_string()]);
}

/// Positive entries score above zero
#[test]
fn test_positive_entry() {
    let result = TextTagger::new().analyze("Feeling grateful and calm today");
    assert_eq!(result.tags.iter().copied().collect::<Vec<_>>(), vec![SentimentTag::Positivity]);
    assert_eq!(result.score, 0.4);
    assert!(result.stress_signals.is_empty());
}

/// No keyword hits means neutral with score 0
#[test]
fn test_plain_entry_is_neutral() {
    let result = TextTagger::new().analyze("Went to the shop and bought bread");
    assert_eq!(result.tags.iter().copied().collect::<Vec<_>>(), vec![SentimentTag::Neutral]);
    assert_eq!(result.score, 0.0);
    assert!(result.triggers.is_empty());
}

/// Score saturates at -1
#[test]
fn test_score_clamped() {
    let result = TextTagger::new()
        .analyze("stress, overwhelmed, pressure, deadline, burnout, exhausted");
    assert_eq!(result.score, -1.0);
}

/// Matching ignores case
#[test]
fn test_case_insensitive() {
    let tagger = TextTagger::new();
    assert_eq!(tagger.analyze("ANXIOUS"), tagger.analyze("anxious"));
}

/// Re-running the tagger and scorer gives byte-identical output
#[test]
fn test_idempotence() {
    let tagger = TextTagger::new();
    let scorer = StressScorer::new();
    let text = "Worried about the deadline, but grateful for friends";

    let a = serde_json::to_string(&tagger.analyze(text)).unwrap();
    let b = serde_json::to_string(&tagger.analyze(text)).unwrap();
    assert_eq!(a, b);

    let x = serde_json::to_string(&scorer.score(0.37, 0.81, Some("anxiety"))).unwrap();
    let y = serde_json::to_string(&scorer.score(0.37, 0.81, Some("anxiety"))).unwrap();
    assert_eq!(x, y);
}

/// pitch 0.2, energy 0.1, neutral → 0.16 LOW
#[test]
fn test_scorer_neutral_low() {
    let result = StressScorer::new().score(0.2, 0.1, Some("neutral"));
    assert!((result.score - 0.16).abs() < 1e-9);
    assert_eq!(result.stress_level, StressLevel::Low);
    assert_eq!(result.message, StressLevel::Low.message());
}

/// pitch 0.6, energy 0.5, stress → 0.86 HIGH, floor not binding
#[test]
fn test_scorer_stress_high() {
    let result = StressScorer::new().score(0.6, 0.5, Some("stress"));
    assert!((result.score - 0.86).abs() < 1e-9);
    assert_eq!(result.stress_level, StressLevel::High);
    assert_eq!(result.suggestions.len(), 2);
}

/// Tagger output drives the scorer through the representative tag
#[test]
fn test_tagged_text_into_scorer() {
    let tagger = TextTagger::new();
    let scorer = StressScorer::new();

    let analysis = tagger.analyze("Deadline pressure at work today");
    let tag = representative_tag(&analysis);
    assert_eq!(tag, SentimentTag::Stress);

    // No voice: the stress floor alone decides the level
    let result = scorer.score_tag(0.0, 0.0, Some(tag));
    assert_eq!(result.stress_level, StressLevel::Moderate);
    assert!((result.score - 0.45).abs() < 1e-9);
}
