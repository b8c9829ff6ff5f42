//! Sentiment tags and text analysis results

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Keyword-derived sentiment tag.
///
/// Declaration order is dictionary order; consumers that want a single
/// "dominant" tag take the first one in a sorted set. Neutral sorts last.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentTag {
    Stress,
    Anxiety,
    Depression,
    Insomnia,
    Positivity,
    Concern,
    Neutral,
}

impl SentimentTag {
    /// Tags whose keywords feed `stress_signals`
    pub const STRESS_FAMILY: [SentimentTag; 5] = [
        SentimentTag::Stress,
        SentimentTag::Anxiety,
        SentimentTag::Concern,
        SentimentTag::Depression,
        SentimentTag::Insomnia,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentTag::Stress => "stress",
            SentimentTag::Anxiety => "anxiety",
            SentimentTag::Depression => "depression",
            SentimentTag::Insomnia => "insomnia",
            SentimentTag::Positivity => "positivity",
            SentimentTag::Concern => "concern",
            SentimentTag::Neutral => "neutral",
        }
    }

    /// Case-insensitive lookup by name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "stress" => Some(SentimentTag::Stress),
            "anxiety" => Some(SentimentTag::Anxiety),
            "depression" => Some(SentimentTag::Depression),
            "insomnia" => Some(SentimentTag::Insomnia),
            "positivity" => Some(SentimentTag::Positivity),
            "concern" => Some(SentimentTag::Concern),
            "neutral" => Some(SentimentTag::Neutral),
            _ => None,
        }
    }

    pub fn is_negative(&self) -> bool {
        !matches!(self, SentimentTag::Positivity | SentimentTag::Neutral)
    }
}

impl std::fmt::Display for SentimentTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of one text tagging call. Carries no timestamp, so identical
/// input serializes to identical output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextAnalysisResult {
    /// Never empty; `{neutral}` when nothing matched
    pub tags: BTreeSet<SentimentTag>,
    /// Squashed score in [-1, 1], two decimals
    pub score: f64,
    /// Distinct matched keywords per tag, in dictionary order
    pub triggers: BTreeMap<SentimentTag, Vec<String>>,
    /// Distinct keywords from the stress-family dictionaries
    pub stress_signals: Vec<String>,
}

impl TextAnalysisResult {
    /// Result for text with no keyword matches
    pub fn neutral() -> Self {
        Self {
            tags: BTreeSet::from([SentimentTag::Neutral]),
            score: 0.0,
            triggers: BTreeMap::new(),
            stress_signals: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: SentimentTag) -> bool {
        self.tags.contains(&tag)
    }

    /// First tag in dictionary order
    pub fn dominant_tag(&self) -> SentimentTag {
        self.tags.iter().next().copied().unwrap_or(SentimentTag::Neutral)
    }

    /// Tag names, for remote request themes
    pub fn theme_names(&self) -> Vec<String> {
        self.tags.iter().map(|t| t.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_is_dictionary_order() {
        let tags = BTreeSet::from([
            SentimentTag::Neutral,
            SentimentTag::Concern,
            SentimentTag::Insomnia,
            SentimentTag::Stress,
        ]);
        let ordered: Vec<_> = tags.into_iter().collect();
        assert_eq!(
            ordered,
            vec![SentimentTag::Stress, SentimentTag::Insomnia, SentimentTag::Concern, SentimentTag::Neutral]
        );
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(SentimentTag::from_name("ANXIETY"), Some(SentimentTag::Anxiety));
        assert_eq!(SentimentTag::from_name(" Stress "), Some(SentimentTag::Stress));
        assert_eq!(SentimentTag::from_name("hopeless"), None);
    }

    #[test]
    fn test_triggers_serialize_with_tag_keys() {
        let mut result = TextAnalysisResult::neutral();
        result.triggers.insert(SentimentTag::Insomnia, vec!["can't sleep".to_string()]);
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains("\"insomnia\":[\"can't sleep\"]"));
        assert!(json.contains("\"stressSignals\""));
    }
}
