//! Safety decision structures

use serde::{Deserialize, Serialize};

use crate::types::ReasonCode;

/// Static grounding text shown with every crisis decision
pub const GROUNDING_CONTENT: &str = "Let's pause together. Breathe in slowly for four counts, \
hold for four, and breathe out for six. Notice five things you can see and four things you can feel.";

/// Static contact-support text shown with every crisis decision
pub const HELPLINE_CONTENT: &str = "You don't have to go through this alone. If you are in danger \
or thinking about harming yourself, please contact your local emergency number or a crisis helpline \
right now, or reach out to someone you trust.";

/// Firewall outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyStatus {
    Safe,
    Crisis,
}

impl std::fmt::Display for SafetyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SafetyStatus::Safe => write!(f, "SAFE"),
            SafetyStatus::Crisis => write!(f, "CRISIS"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SafetyActionType {
    BlockGeneration,
    ShowGrounding,
    ShowHelpline,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyAction {
    #[serde(rename = "type")]
    pub action_type: SafetyActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
}

/// Firewall decision. Computed fresh from the current input; never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SafetyDecision {
    pub status: SafetyStatus,
    pub code: ReasonCode,
    pub reason: String,
    pub actions: Vec<SafetyAction>,
}

impl SafetyDecision {
    pub fn safe() -> Self {
        Self {
            status: SafetyStatus::Safe,
            code: ReasonCode::S000_SAFE,
            reason: ReasonCode::S000_SAFE.description().to_string(),
            actions: Vec::new(),
        }
    }

    /// Crisis decision with the fixed action triple:
    /// BLOCK_GENERATION, SHOW_GROUNDING, SHOW_HELPLINE.
    pub fn crisis(
        code: ReasonCode,
        reason: impl Into<String>,
        grounding_suggestions: Option<Vec<String>>,
    ) -> Self {
        Self {
            status: SafetyStatus::Crisis,
            code,
            reason: reason.into(),
            actions: vec![
                SafetyAction {
                    action_type: SafetyActionType::BlockGeneration,
                    content: None,
                    suggestions: None,
                },
                SafetyAction {
                    action_type: SafetyActionType::ShowGrounding,
                    content: Some(GROUNDING_CONTENT.to_string()),
                    suggestions: grounding_suggestions,
                },
                SafetyAction {
                    action_type: SafetyActionType::ShowHelpline,
                    content: Some(HELPLINE_CONTENT.to_string()),
                    suggestions: None,
                },
            ],
        }
    }

    pub fn is_safe(&self) -> bool {
        self.status == SafetyStatus::Safe
    }

    /// True when generation must not run
    pub fn blocks_generation(&self) -> bool {
        self.actions
            .iter()
            .any(|a| a.action_type == SafetyActionType::BlockGeneration)
    }

    pub fn action(&self, action_type: SafetyActionType) -> Option<&SafetyAction> {
        self.actions.iter().find(|a| a.action_type == action_type)
    }
}
