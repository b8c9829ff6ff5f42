//! Pipeline outputs and their terminal rendering

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::{
    SafetyActionType, SafetyDecision, SafetyStatus, StressResult, Suggestion, SuggestionSource,
    TextAnalysisResult, VoiceMetrics,
};

/// Output of a journal text analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalReport {
    pub timestamp: DateTime<Utc>,
    pub analysis: TextAnalysisResult,
    pub safety: SafetyDecision,
    pub stress: StressResult,
    /// Empty when the firewall returned CRISIS
    pub suggestions: Vec<Suggestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SuggestionSource>,
}

impl JournalReport {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let level = self.stress.stress_level;
        let mut out = format!(
            "{} score={:+.2} | tags={} | stress={} | safety={}",
            level.emoji(),
            self.analysis.score,
            tag_list(&self.analysis),
            level.to_string().color(level.color()),
            status_colored(self.safety.status),
        );

        if self.safety.status == SafetyStatus::Crisis {
            out.push('\n');
            out.push_str(&format!("  {}", self.safety.reason.red().bold()));
            for action in &self.safety.actions {
                if let Some(content) = &action.content {
                    out.push_str(&format!("\n  {}", content.cyan()));
                }
                if action.action_type == SafetyActionType::ShowGrounding {
                    for s in action.suggestions.iter().flatten() {
                        out.push_str(&format!("\n    • {}", s));
                    }
                }
            }
        } else {
            for s in &self.suggestions {
                out.push_str(&format!("\n  • {} - {}", s.title.bold(), s.description.dimmed()));
            }
        }
        out
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "score={:.2} | tags={} | stress={} | safety={} | reason={} | suggestions={}",
            self.analysis.score,
            tag_list(&self.analysis),
            self.stress.stress_level,
            self.safety.status,
            self.safety.code.code(),
            self.suggestions.len(),
        )
    }
}

/// Output of a voice sample analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceReport {
    pub timestamp: DateTime<Utc>,
    pub metrics: VoiceMetrics,
    pub stress: StressResult,
}

impl VoiceReport {
    pub fn to_terminal_string(&self) -> String {
        let level = self.stress.stress_level;
        format!(
            "{} pitch_sd={:.1}Hz | energy_sd={:.4} | rate={:.2}/s | {:.1}s | stress={}\n  {}",
            level.emoji(),
            self.metrics.pitch_variance,
            self.metrics.energy_variance,
            self.metrics.speaking_rate,
            self.metrics.duration,
            level.to_string().color(level.color()),
            self.stress.message,
        )
    }

    pub fn to_parseable_string(&self) -> String {
        format!(
            "pitch_sd={:.3} | energy_sd={:.5} | rate={:.3} | duration={:.2} | stress={} | score={:.2}",
            self.metrics.pitch_variance,
            self.metrics.energy_variance,
            self.metrics.speaking_rate,
            self.metrics.duration,
            self.stress.stress_level,
            self.stress.score,
        )
    }
}

fn tag_list(analysis: &TextAnalysisResult) -> String {
    analysis
        .tags
        .iter()
        .map(|t| t.as_str())
        .collect::<Vec<_>>()
        .join(",")
}

fn status_colored(status: SafetyStatus) -> colored::ColoredString {
    match status {
        SafetyStatus::Safe => "SAFE".green(),
        SafetyStatus::Crisis => "CRISIS".red().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ReasonCode, StressLevel};

    #[test]
    fn test_parseable_crisis_line() {
        let report = JournalReport {
            timestamp: Utc::now(),
            analysis: TextAnalysisResult::neutral(),
            safety: SafetyDecision::crisis(ReasonCode::S101_CRISIS_KEYWORD, "x", None),
            stress: StressResult::new(StressLevel::Low, 0.0),
            suggestions: Vec::new(),
            source: None,
        };
        assert_eq!(
            report.to_parseable_string(),
            "score=0.00 | tags=neutral | stress=LOW | safety=CRISIS | reason=S101_CRISIS_KEYWORD | suggestions=0"
        );
    }
}
