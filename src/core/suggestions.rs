//! Suggestion Composer: remote tier when safe and opted in, local pool otherwise
//!
//! Any remote failure (transport, timeout, non-2xx, bad JSON, empty list)
//! is logged and routed to the local pool. The composer never fails and
//! never returns an empty list.

use lazy_static::lazy_static;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::SuggestionConfig;
use crate::core::prompt::build_prompt;
use crate::error::{Result, SolaceError};
use crate::types::{
    ComposedSuggestions, NormalizedVoice, SafetyDecision, SentimentTag, StressLevel, Suggestion,
    SuggestionActionType, SuggestionSource, TextAnalysisResult,
};

// =============================================================================
// LOCAL POOL
// =============================================================================

/// Condition a local pool is keyed by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PoolCondition {
    ElevatedPitch,
    Stress,
    Anxiety,
    Depression,
    Insomnia,
    Concern,
    Positivity,
    Neutral,
}

impl PoolCondition {
    /// Max items drawn from this pool per call
    pub fn cap(&self) -> usize {
        match self {
            PoolCondition::Stress | PoolCondition::Anxiety | PoolCondition::Neutral => 2,
            _ => 1,
        }
    }

    pub fn pool(&self) -> &'static [Suggestion] {
        POOL.iter()
            .find(|(c, _)| c == self)
            .map(|(_, s)| s.as_slice())
            .unwrap_or(&[])
    }

    fn from_tag(tag: SentimentTag) -> Option<Self> {
        match tag {
            SentimentTag::Stress => Some(PoolCondition::Stress),
            SentimentTag::Anxiety => Some(PoolCondition::Anxiety),
            SentimentTag::Depression => Some(PoolCondition::Depression),
            SentimentTag::Insomnia => Some(PoolCondition::Insomnia),
            SentimentTag::Concern => Some(PoolCondition::Concern),
            SentimentTag::Positivity => Some(PoolCondition::Positivity),
            SentimentTag::Neutral => None,
        }
    }
}

fn s(title: &str, description: &str, action_type: SuggestionActionType) -> Suggestion {
    Suggestion::new(title, description, action_type)
}

lazy_static! {
    static ref POOL: Vec<(PoolCondition, Vec<Suggestion>)> = {
        use SuggestionActionType as A;
        vec![
            (PoolCondition::ElevatedPitch, vec![
                s("Slow your breath", "Breathe out for longer than you breathe in, six rounds.", A::Breathing),
                s("Soften your voice", "Hum gently for a minute to relax your throat and jaw.", A::Breathing),
            ]),
            (PoolCondition::Stress, vec![
                s("Box breathing", "Inhale 4, hold 4, exhale 4, hold 4. Repeat four times.", A::Breathing),
                s("Brain dump", "Write every task on your mind, then circle just one.", A::Journal),
                s("Quick walk", "Step outside for a five-minute walk without your phone.", A::Exercise),
            ]),
            (PoolCondition::Anxiety, vec![
                s("5-4-3-2-1 grounding", "Name 5 things you see, 4 you feel, 3 you hear.", A::Meditation),
                s("Worry window", "Write your worries down and set them aside until later.", A::Journal),
                s("4-7-8 breathing", "Inhale for 4, hold for 7, exhale slowly for 8.", A::Breathing),
            ]),
            (PoolCondition::Depression, vec![
                s("One small thing", "Pick one tiny task you can finish in five minutes.", A::None),
                s("Gentle movement", "Stretch or walk slowly for a few minutes.", A::Exercise),
                s("Kind words", "Write one kind sentence to yourself, as to a friend.", A::Journal),
            ]),
            (PoolCondition::Insomnia, vec![
                s("Wind-down breathing", "Slow belly breaths in bed, counting down from ten.", A::Breathing),
                s("Body scan", "Relax each part of your body from toes to head.", A::Meditation),
            ]),
            (PoolCondition::Concern, vec![
                s("Name it", "Write down what is bothering you in one sentence.", A::Journal),
                s("Two-minute pause", "Sit quietly and notice your breath for two minutes.", A::Meditation),
            ]),
            (PoolCondition::Positivity, vec![
                s("Savour it", "Note what went well today and why.", A::Journal),
                s("Share the good", "Tell someone about something that made you smile.", A::None),
            ]),
            (PoolCondition::Neutral, vec![
                s("Mindful minute", "Spend one minute noticing your breath.", A::Meditation),
                s("Daily check-in", "Write three words that describe how you feel.", A::Journal),
                s("Stretch break", "Stand up and stretch your shoulders and neck.", A::Exercise),
            ]),
        ]
    };
}

// =============================================================================
// REMOTE TIER
// =============================================================================

/// Payload sent to the remote suggestion service
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub stress_level: StressLevel,
    pub themes: Vec<String>,
    /// Templated instruction with the no-diagnosis constraints
    pub prompt: String,
}

impl SuggestionRequest {
    /// The only way to build a request; the prompt is always templated.
    pub fn new(stress_level: StressLevel, themes: Vec<String>) -> Self {
        let prompt = build_prompt(stress_level, &themes);
        Self {
            stress_level,
            themes,
            prompt,
        }
    }
}

/// Expected success payload
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionResponse {
    pub suggestions: Vec<Suggestion>,
    #[serde(default)]
    pub model_used: Option<String>,
}

/// HTTP client for the remote suggestion service
#[derive(Debug, Clone)]
pub struct RemoteSuggestionClient {
    endpoint: String,
    client: reqwest::Client,
}

impl RemoteSuggestionClient {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built with the timeout.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SolaceError::Remote(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            endpoint: endpoint.into(),
            client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the request; anything but a 2xx with a non-empty, well-formed
    /// suggestion list is an error.
    pub async fn fetch(&self, request: &SuggestionRequest) -> Result<SuggestionResponse> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(|e| SolaceError::Remote(format!("request failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(SolaceError::Remote(format!("HTTP {}", status.as_u16())));
        }

        let mut body: SuggestionResponse = resp
            .json()
            .await
            .map_err(|e| SolaceError::Remote(format!("malformed payload: {e}")))?;

        body.suggestions
            .retain(|s| !s.title.trim().is_empty() && !s.description.trim().is_empty());
        if body.suggestions.is_empty() {
            return Err(SolaceError::Remote("empty suggestion list".to_string()));
        }
        Ok(body)
    }
}

// =============================================================================
// COMPOSER
// =============================================================================

/// Inputs for one composition
#[derive(Debug, Clone, Copy)]
pub struct SuggestionContext<'a> {
    pub decision: &'a SafetyDecision,
    pub analysis: &'a TextAnalysisResult,
    pub voice: Option<NormalizedVoice>,
    pub stress_level: StressLevel,
}

#[derive(Debug, Clone)]
pub struct SuggestionComposer {
    remote: Option<RemoteSuggestionClient>,
    max_suggestions: usize,
    elevated_pitch_threshold: f64,
}

impl Default for SuggestionComposer {
    fn default() -> Self {
        Self::new(&SuggestionConfig::default())
    }
}

impl SuggestionComposer {
    pub fn new(config: &SuggestionConfig) -> Self {
        let remote = config.endpoint.as_ref().and_then(|endpoint| {
            match RemoteSuggestionClient::new(endpoint.clone(), Duration::from_secs(config.timeout_secs)) {
                Ok(client) => Some(client),
                Err(e) => {
                    warn!(error = %e, "remote suggestions disabled");
                    None
                }
            }
        });
        Self {
            remote,
            max_suggestions: config.max_suggestions.max(1),
            elevated_pitch_threshold: config.elevated_pitch_threshold,
        }
    }

    pub fn has_remote(&self) -> bool {
        self.remote.is_some()
    }

    /// Remote when SAFE, opted in and configured; local pool otherwise.
    pub async fn compose(&self, ctx: SuggestionContext<'_>, opt_in: bool) -> ComposedSuggestions {
        if let Some(remote) = self.remote.as_ref().filter(|_| opt_in && ctx.decision.is_safe()) {
            // Built only here, after the SAFE check
            let request = SuggestionRequest::new(ctx.stress_level, ctx.analysis.theme_names());
            match remote.fetch(&request).await {
                Ok(mut resp) => {
                    resp.suggestions.truncate(self.max_suggestions);
                    debug!(count = resp.suggestions.len(), "remote suggestions");
                    return ComposedSuggestions {
                        suggestions: resp.suggestions,
                        source: SuggestionSource::Remote {
                            model: resp.model_used,
                        },
                    };
                }
                Err(e) => warn!(error = %e, "remote suggestions unavailable, using local pool"),
            }
        }

        ComposedSuggestions {
            suggestions: self.compose_local(ctx.analysis, ctx.voice),
            source: SuggestionSource::Local,
        }
    }

    /// Local pool selection with the thread RNG
    pub fn compose_local(
        &self,
        analysis: &TextAnalysisResult,
        voice: Option<NormalizedVoice>,
    ) -> Vec<Suggestion> {
        self.compose_local_with_rng(analysis, voice, &mut rand::thread_rng())
    }

    pub fn compose_local_with_rng<R: Rng + ?Sized>(
        &self,
        analysis: &TextAnalysisResult,
        voice: Option<NormalizedVoice>,
        rng: &mut R,
    ) -> Vec<Suggestion> {
        let conditions = self.conditions(analysis, voice);

        let mut picked: Vec<Suggestion> = conditions
            .iter()
            .flat_map(|c| c.pool().choose_multiple(&mut *rng, c.cap()).cloned().collect::<Vec<_>>())
            .collect();
        picked.truncate(self.max_suggestions);

        if picked.is_empty() {
            picked = PoolCondition::Neutral
                .pool()
                .choose_multiple(&mut *rng, PoolCondition::Neutral.cap().min(self.max_suggestions))
                .cloned()
                .collect();
        }
        picked
    }

    /// Matched conditions: elevated pitch first, then tags in dictionary
    /// order; neutral when nothing specific matched.
    pub fn conditions(
        &self,
        analysis: &TextAnalysisResult,
        voice: Option<NormalizedVoice>,
    ) -> Vec<PoolCondition> {
        let mut conditions = Vec::new();
        if voice.is_some_and(|v| v.pitch >= self.elevated_pitch_threshold) {
            conditions.push(PoolCondition::ElevatedPitch);
        }
        conditions.extend(analysis.tags.iter().filter_map(|t| PoolCondition::from_tag(*t)));
        if conditions.is_empty() {
            conditions.push(PoolCondition::Neutral);
        }
        conditions
    }
}

// =============================================================================
// TESTS
// =============================================================================
