//! Core types for Solace

mod reason;
mod record;
mod report;
mod safety;
mod sentiment;
mod stress;
mod suggestion;
mod voice;

pub use reason::ReasonCode;
pub use record::{Record, RecordPayload};
pub use report::{JournalReport, VoiceReport};
pub use safety::{
    SafetyAction, SafetyActionType, SafetyDecision, SafetyStatus, GROUNDING_CONTENT,
    HELPLINE_CONTENT,
};
pub use sentiment::{SentimentTag, TextAnalysisResult};
pub use stress::{StressLevel, StressResult};
pub use suggestion::{ComposedSuggestions, Suggestion, SuggestionActionType, SuggestionSource};
pub use voice::{NormalizedVoice, VoiceMetrics};
