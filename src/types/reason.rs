//! Reason codes for firewall decisions

use serde::{Deserialize, Serialize};

/// Why the firewall reached its decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // S000: Safe
    // =========================================================================
    /// No rule fired
    S000_SAFE,

    // =========================================================================
    // S100: Crisis (rule order = evaluation order)
    // =========================================================================
    /// High-risk phrase found in text
    S101_CRISIS_KEYWORD,
    /// Text score at or below the negative threshold
    S102_CRISIS_NEGATIVE_SENTIMENT,
    /// Voice-integrated stress scored HIGH
    S103_CRISIS_VOICE_STRESS,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::S000_SAFE => "S000_SAFE",
            Self::S101_CRISIS_KEYWORD => "S101_CRISIS_KEYWORD",
            Self::S102_CRISIS_NEGATIVE_SENTIMENT => "S102_CRISIS_NEGATIVE_SENTIMENT",
            Self::S103_CRISIS_VOICE_STRESS => "S103_CRISIS_VOICE_STRESS",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::S000_SAFE => "No safety rule triggered",
            Self::S101_CRISIS_KEYWORD => "High-risk phrase detected",
            Self::S102_CRISIS_NEGATIVE_SENTIMENT => "Very negative sentiment",
            Self::S103_CRISIS_VOICE_STRESS => "High stress from voice and text",
        }
    }

    pub fn is_crisis(&self) -> bool {
        !matches!(self, Self::S000_SAFE)
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
