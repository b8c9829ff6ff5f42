//! Text Tagger: keyword dictionaries → sentiment tags, score, evidence
//!
//! Matching is plain substring containment on the lower-cased text. No
//! tokenization, so "sadly" matches "sad". That keeps every tag explainable
//! by the trigger list at the cost of false positives.

use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

use crate::types::{SentimentTag, TextAnalysisResult};
use crate::SENTIMENT_SCALE;

/// (tag, keywords) in dictionary order
const DICTIONARY: &[(SentimentTag, &[&str])] = &[
    (
        SentimentTag::Stress,
        &[
            "stress",
            "overwhelmed",
            "pressure",
            "deadline",
            "too much",
            "burnout",
            "burned out",
            "exhausted",
            "tense",
            "frustrated",
        ],
    ),
    (
        SentimentTag::Anxiety,
        &[
            "anxious",
            "anxiety",
            "worried",
            "nervous",
            "panic",
            "afraid",
            "scared",
            "on edge",
            "restless",
            "dread",
        ],
    ),
    (
        SentimentTag::Depression,
        &[
            "depressed",
            "hopeless",
            "sad",
            "empty",
            "worthless",
            "lonely",
            "numb",
            "miserable",
            "no point",
            "give up",
        ],
    ),
    (
        SentimentTag::Insomnia,
        &[
            "can't sleep",
            "cannot sleep",
            "couldn't sleep",
            "insomnia",
            "sleepless",
            "awake all night",
            "no sleep",
            "tossing and turning",
        ],
    ),
    (
        SentimentTag::Positivity,
        &[
            "happy",
            "grateful",
            "calm",
            "relaxed",
            "good",
            "great",
            "peaceful",
            "excited",
            "proud",
            "hopeful",
        ],
    ),
    (
        SentimentTag::Concern,
        &[
            "concerned",
            "uneasy",
            "unsure",
            "doubt",
            "confused",
            "struggling",
            "upset",
            "bothering me",
        ],
    ),
];

/// Keyword tagger
#[derive(Debug, Default)]
pub struct TextTagger;

impl TextTagger {
    /// Create new tagger
    pub fn new() -> Self {
        Self
    }

    /// Tag text and return score with full trigger evidence
    pub fn analyze(&self, text: &str) -> TextAnalysisResult {
        let lowered = fold_apostrophes(&text.to_lowercase());
        if lowered.trim().is_empty() {
            return TextAnalysisResult::neutral();
        }

        let mut tags = BTreeSet::new();
        let mut triggers: BTreeMap<SentimentTag, Vec<String>> = BTreeMap::new();
        let mut stress_signals: Vec<String> = Vec::new();
        let mut raw_score = 0i32;

        for (tag, keywords) in DICTIONARY {
            for keyword in keywords.iter().filter(|k| lowered.contains(*k)) {
                tags.insert(*tag);

                let hits = triggers.entry(*tag).or_default();
                if !hits.iter().any(|h| h == keyword) {
                    hits.push(keyword.to_string());
                }

                raw_score += if *tag == SentimentTag::Positivity { 1 } else { -1 };

                if SentimentTag::STRESS_FAMILY.contains(tag)
                    && !stress_signals.iter().any(|s| s == keyword)
                {
                    stress_signals.push(keyword.to_string());
                }
            }
        }

        if tags.is_empty() {
            tags.insert(SentimentTag::Neutral);
        }

        let score = round2((raw_score as f64 * SENTIMENT_SCALE).clamp(-1.0, 1.0));
        debug!(raw_score, score, tags = tags.len(), "tagged text");

        TextAnalysisResult {
            tags,
            score,
            triggers,
            stress_signals,
        }
    }

    /// Just the score
    pub fn quick_score(&self, text: &str) -> f64 {
        self.analyze(text).score
    }

    /// Keywords for one tag, in dictionary order
    pub fn keywords(tag: SentimentTag) -> &'static [&'static str] {
        DICTIONARY
            .iter()
            .find(|(t, _)| *t == tag)
            .map(|(_, k)| *k)
            .unwrap_or(&[])
    }
}

/// Map typographic apostrophes (U+2018, U+2019, U+02BC) to `'`
pub(crate) fn fold_apostrophes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2018}' | '\u{2019}' | '\u{02BC}' => '\'',
            c => c,
        })
        .collect()
}

fn round2(v: f64) -> f64 {
    let r = (v * 100.0).round() / 100.0;
    // avoid "-0.00"
    if r == 0.0 {
        0.0
    } else {
        r
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input_is_neutral() {
        let tagger = TextTagger::new();
        assert_eq!(tagger.analyze(""), TextAnalysisResult::neutral());
        assert_eq!(tagger.analyze("   \n"), TextAnalysisResult::neutral());
    }

    #[test]
    fn test_no_match_defaults_to_neutral() {
        let result = TextTagger::new().analyze("The bus was on time this morning.");
        assert_eq!(result.tags, BTreeSet::from([SentimentTag::Neutral]));
        assert_eq!(result.score, 0.0);
        assert!(result.triggers.is_empty());
    }

    #[test]
    fn test_overwhelmed_and_sleepless() {
        let result = TextTagger::new().analyze("I am feeling so overwhelmed and I can't sleep at all");
        assert!(result.has_tag(SentimentTag::Stress));
        assert!(result.has_tag(SentimentTag::Insomnia));
        assert!(!result.has_tag(SentimentTag::Neutral));
        assert_eq!(result.score, -0.4);
        assert_eq!(result.stress_signals, vec!["overwhelmed", "can't sleep"]);
    }

    #[test]
    fn test_case_insensitive() {
        let result = TextTagger::new().analyze("Feeling GRATEFUL and Calm");
        assert_eq!(result.tags, BTreeSet::from([SentimentTag::Positivity]));
        assert_eq!(result.score, 0.4);
        assert_eq!(result.triggers[&SentimentTag::Positivity], vec!["grateful", "calm"]);
        assert!(result.stress_signals.is_empty());
    }

    #[test]
    fn test_substring_semantics_kept() {
        // "sadly" contains "sad", "stressed" contains "stress"
        let result = TextTagger::new().analyze("Sadly I got stressed");
        assert!(result.has_tag(SentimentTag::Depression));
        assert!(result.has_tag(SentimentTag::Stress));
    }

    #[test]
    fn test_repeated_keyword_counted_once() {
        let result = TextTagger::new().analyze("panic, panic, panic");
        assert_eq!(result.triggers[&SentimentTag::Anxiety], vec!["panic"]);
        assert_eq!(result.score, -0.2);
    }

    #[test]
    fn test_score_clamped() {
        let text = "stress overwhelmed pressure deadline burnout exhausted tense";
        let result = TextTagger::new().analyze(text);
        assert_eq!(result.score, -1.0);
    }

    #[test]
    fn test_mixed_polarity_cancels() {
        let result = TextTagger::new().analyze("worried but hopeful");
        assert!(result.has_tag(SentimentTag::Anxiety));
        assert!(result.has_tag(SentimentTag::Positivity));
        assert_eq!(result.score, 0.0);
        assert_eq!(result.dominant_tag(), SentimentTag::Anxiety);
    }

    #[test]
    fn test_determinism() {
        let tagger = TextTagger::new();
        let text = "Deadline pressure and I'm anxious, but grateful for friends.";
        let a = serde_json::to_string(&tagger.analyze(text)).unwrap();
        let b = serde_json::to_string(&tagger.analyze(text)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_every_tag_has_keywords() {
        for tag in SentimentTag::STRESS_FAMILY {
            assert!(!TextTagger::keywords(tag).is_empty(), "{} has no keywords", tag);
        }
        assert!(TextTagger::keywords(SentimentTag::Neutral).is_empty());
    }

    #[test]
    fn test_curly_apostrophes_match() {
        let tagger = TextTagger::new();
        for text in ["I can\u{2019}t sleep", "I can\u{2018}t sleep", "I can\u{02BC}t sleep"] {
            let result = tagger.analyze(text);
            assert!(result.has_tag(SentimentTag::Insomnia), "no insomnia tag for {:?}", text);
            assert_eq!(result.stress_signals, vec!["can't sleep".to_string()]);
        }
        assert_eq!(tagger.analyze("I can\u{2019}t sleep"), tagger.analyze("I can't sleep"));
    }
}
