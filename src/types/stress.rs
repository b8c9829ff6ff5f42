//! Stress level definitions

use colored::Color;
use serde::{Deserialize, Serialize};

/// The three stress categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StressLevel {
    Low,
    Moderate,
    High,
}

impl StressLevel {
    /// Fixed message shown with this level
    pub fn message(&self) -> &'static str {
        match self {
            StressLevel::Low => "You seem relatively calm right now.",
            StressLevel::Moderate => "Some signs of stress detected. A short break could help.",
            StressLevel::High => "High stress detected. Please prioritise looking after yourself.",
        }
    }

    /// Fixed pair of suggestions for this level
    pub fn suggestions(&self) -> [&'static str; 2] {
        match self {
            StressLevel::Low => [
                "Keep up your current routine",
                "Take a moment to notice what is going well",
            ],
            StressLevel::Moderate => [
                "Try a 4-7-8 breathing exercise",
                "Take a five-minute walk",
            ],
            StressLevel::High => [
                "Practice box breathing for two minutes",
                "Reach out to someone you trust",
            ],
        }
    }

    /// Terminal color
    pub fn color(&self) -> Color {
        match self {
            StressLevel::Low => Color::Green,
            StressLevel::Moderate => Color::Yellow,
            StressLevel::High => Color::Red,
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            StressLevel::Low => "🟢",
            StressLevel::Moderate => "🟡",
            StressLevel::High => "🔴",
        }
    }
}

impl std::fmt::Display for StressLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StressLevel::Low => "LOW",
            StressLevel::Moderate => "MODERATE",
            StressLevel::High => "HIGH",
        };
        write!(f, "{}", name)
    }
}

/// Stress scorer output. A projection of current inputs; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StressResult {
    pub stress_level: StressLevel,
    /// Final score in [0, 1] the level was derived from
    pub score: f64,
    pub message: String,
    pub suggestions: Vec<String>,
}

impl StressResult {
    pub fn new(stress_level: StressLevel, score: f64) -> Self {
        Self {
            stress_level,
            score,
            message: stress_level.message().to_string(),
            suggestions: stress_level.suggestions().iter().map(|s| s.to_string()).collect(),
        }
    }
}
