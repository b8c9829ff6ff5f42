//! Suggestion structures shared by the local pool and the remote tier

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SuggestionActionType {
    Breathing,
    Journal,
    Meditation,
    Exercise,
    None,
}

/// A short coping suggestion
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub title: String,
    pub description: String,
    pub action_type: SuggestionActionType,
}

impl Suggestion {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        action_type: SuggestionActionType,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            action_type,
        }
    }
}

/// Where a list of suggestions came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SuggestionSource {
    Remote {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        model: Option<String>,
    },
    Local,
}

/// Composer output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComposedSuggestions {
    pub suggestions: Vec<Suggestion>,
    pub source: SuggestionSource,
}
