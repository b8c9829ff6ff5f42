//! Core modules for Solace

pub mod api;
pub mod audio;
pub mod firewall;
pub mod pipeline;
pub mod prompt;
pub mod store;
pub mod stress_scorer;
pub mod suggestions;
pub mod text_tagger;
pub mod transcription;
pub mod voice_features;

pub use api::{create_router, run_server};
pub use audio::{decode_wav_bytes, read_wav, MonoAudio};
pub use firewall::{representative_tag, SafetyFirewall};
pub use pipeline::WellnessPipeline;
pub use prompt::build_prompt;
pub use store::{open_store, JsonlStore, MemoryStore, RecordStore};
pub use stress_scorer::StressScorer;
pub use suggestions::{
    RemoteSuggestionClient, SuggestionComposer, SuggestionContext, SuggestionRequest,
};
pub use text_tagger::TextTagger;
pub use transcription::{Transcript, TranscriptionClient};
pub use voice_features::VoiceFeatureExtractor;
