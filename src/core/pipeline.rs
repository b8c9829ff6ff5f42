//! Pipeline: wires extractor, tagger, scorer, firewall and composer
//!
//! Text path: tag → firewall → (SAFE only) compose. The firewall decision
//! is computed before anything reads the input for generation, and the
//! composer is never called on CRISIS.
//!
//! Voice path: extract → score against a caller-supplied prior tag.
//!
//! Each call works on its own inputs. "Last known voice metrics" are an
//! argument, not shared state.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::config::Config;
use crate::core::firewall::representative_tag;
use crate::core::store::{open_store, MemoryStore, RecordStore};
use crate::core::suggestions::SuggestionContext;
use crate::core::{SafetyFirewall, StressScorer, SuggestionComposer, TextTagger, VoiceFeatureExtractor};
use crate::types::{
    JournalReport, Record, SafetyDecision, SentimentTag, VoiceMetrics, VoiceReport,
};

pub struct WellnessPipeline {
    extractor: VoiceFeatureExtractor,
    tagger: TextTagger,
    scorer: StressScorer,
    firewall: SafetyFirewall,
    composer: SuggestionComposer,
    store: Arc<dyn RecordStore>,
    pitch_norm_max: f64,
    energy_norm_max: f64,
}

impl WellnessPipeline {
    pub fn new(config: &Config, store: Arc<dyn RecordStore>) -> Self {
        Self {
            extractor: VoiceFeatureExtractor::with_config(config.voice.clone()),
            tagger: TextTagger::new(),
            scorer: StressScorer::new(),
            firewall: SafetyFirewall::new(&config.safety),
            composer: SuggestionComposer::new(&config.suggestions),
            store,
            pitch_norm_max: config.safety.pitch_norm_max,
            energy_norm_max: config.safety.energy_norm_max,
        }
    }

    /// Pipeline with the store named in the config
    pub fn from_config(config: &Config) -> Self {
        Self::new(config, open_store(&config.store))
    }

    /// Default config, in-memory store
    pub fn in_memory() -> Self {
        Self::new(&Config::default(), Arc::new(MemoryStore::new()))
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Extract voice metrics and score them against the most recent text tag.
    /// Synchronous, including the store append; async callers run it on a
    /// blocking thread.
    pub fn analyze_voice(
        &self,
        samples: &[f32],
        sample_rate: u32,
        prior_tag: Option<SentimentTag>,
    ) -> VoiceReport {
        let metrics = self.extractor.extract(samples, sample_rate);
        let normalized = metrics.normalize(self.pitch_norm_max, self.energy_norm_max);
        let stress = self.scorer.score_voice(normalized, prior_tag);

        if metrics.duration > 0.0 {
            self.persist(Record::voice(metrics));
        }
        debug!(level = %stress.stress_level, score = stress.score, "voice analysed");

        VoiceReport {
            timestamp: chrono::Utc::now(),
            metrics,
            stress,
        }
    }

    /// Firewall only, no persistence and no suggestions
    pub fn evaluate_safety(&self, text: &str, voice: Option<&VoiceMetrics>) -> SafetyDecision {
        self.firewall.evaluate(text, voice)
    }

    /// Full text path. `voice` is the caller's last known metrics, if any;
    /// `remote` opts in to the remote suggestion tier.
    pub async fn analyze_text(
        &self,
        text: &str,
        voice: Option<&VoiceMetrics>,
        remote: bool,
    ) -> JournalReport {
        let analysis = self.tagger.analyze(text);

        // Barrier: decided before any generation step sees this input
        let safety = self.firewall.evaluate_with_analysis(text, &analysis, voice);

        let normalized = voice.map(|v| v.normalize(self.pitch_norm_max, self.energy_norm_max));
        let stress = self
            .scorer
            .score_voice(normalized.unwrap_or_default(), Some(representative_tag(&analysis)));

        if !text.trim().is_empty() {
            self.persist_off_runtime(Record::journal(text)).await;
        }

        let (suggestions, source) = if safety.is_safe() {
            let ctx = SuggestionContext {
                decision: &safety,
                analysis: &analysis,
                voice: normalized,
                stress_level: stress.stress_level,
            };
            let composed = self.composer.compose(ctx, remote).await;
            (composed.suggestions, Some(composed.source))
        } else {
            (Vec::new(), None)
        };

        JournalReport {
            timestamp: chrono::Utc::now(),
            analysis,
            safety,
            stress,
            suggestions,
            source,
        }
    }

    fn persist(&self, record: Record) {
        if let Err(e) = self.store.append(record) {
            warn!(error = %e, "failed to persist record");
        }
    }

    /// Store appends may block on file I/O; keep them off the async workers
    async fn persist_off_runtime(&self, record: Record) {
        let store = Arc::clone(&self.store);
        match tokio::task::spawn_blocking(move || store.append(record)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "failed to persist record"),
            Err(e) => warn!(error = %e, "record store task failed"),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RecordPayload, SafetyStatus, StressLevel, SuggestionSource};

    #[tokio::test]
    async fn test_safe_text_gets_local_suggestions() {
        let pipeline = WellnessPipeline::in_memory();
        let report = pipeline.analyze_text("Deadline pressure at work today", None, false).await;
        assert_eq!(report.safety.status, SafetyStatus::Safe);
        assert_eq!(report.stress.stress_level, StressLevel::Moderate);
        assert_eq!(report.source, Some(SuggestionSource::Local));
        assert!(!report.suggestions.is_empty() && report.suggestions.len() <= 3);
    }

    #[tokio::test]
    async fn test_crisis_text_gets_no_suggestions() {
        let pipeline = WellnessPipeline::in_memory();
        let report = pipeline.analyze_text("I want to end my life", None, true).await;
        assert_eq!(report.safety.status, SafetyStatus::Crisis);
        assert!(report.suggestions.is_empty());
        assert!(report.source.is_none());
        assert_eq!(report.safety.actions.len(), 3);
    }

    #[tokio::test]
    async fn test_journal_persisted_blank_skipped() {
        let pipeline = WellnessPipeline::in_memory();
        pipeline.analyze_text("calm morning", None, false).await;
        pipeline.analyze_text("   ", None, false).await;
        let records = pipeline.store().records().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].payload, RecordPayload::Journal { text: "calm morning".into() });
    }

    #[derive(Default)]
    struct ThreadRecordingStore {
        inner: MemoryStore,
        threads: std::sync::Mutex<Vec<std::thread::ThreadId>>,
    }

    impl RecordStore for ThreadRecordingStore {
        fn append(&self, record: Record) -> crate::Result<()> {
            self.threads.lock().unwrap().push(std::thread::current().id());
            self.inner.append(record)
        }

        fn records(&self) -> crate::Result<Vec<Record>> {
            self.inner.records()
        }
    }

    #[tokio::test]
    async fn test_journal_append_runs_off_caller_thread() {
        let store = Arc::new(ThreadRecordingStore::default());
        let pipeline = WellnessPipeline::new(&Config::default(), store.clone());

        pipeline.analyze_text("quiet afternoon", None, false).await;

        let threads = store.threads.lock().unwrap().clone();
        assert_eq!(threads.len(), 1);
        assert_ne!(threads[0], std::thread::current().id());
        assert_eq!(store.records().unwrap().len(), 1);
    }

    #[test]
    fn test_voice_silence_not_persisted() {
        let pipeline = WellnessPipeline::in_memory();
        let report = pipeline.analyze_voice(&[], 16_000, None);
        assert_eq!(report.metrics, VoiceMetrics::zero());
        assert_eq!(report.stress.stress_level, StressLevel::Low);
        assert!(pipeline.store().records().unwrap().is_empty());
    }

    #[test]
    fn test_voice_prior_tag_applies_floor() {
        let pipeline = WellnessPipeline::in_memory();
        let report = pipeline.analyze_voice(&vec![0.0; 16_000], 16_000, Some(SentimentTag::Insomnia));
        assert_eq!(report.stress.stress_level, StressLevel::Moderate);
        assert_eq!(pipeline.store().records().unwrap().len(), 1);
    }
}
