//! Prompt construction for the remote suggestion tier
//!
//! Only stress level and theme names go in. Raw journal text never does.

use crate::types::StressLevel;

/// Constraints embedded in every prompt
pub const PROMPT_CONSTRAINTS: &[&str] = &[
    "Do not diagnose or name any medical or mental health condition.",
    "Do not offer therapy or present yourself as a therapist.",
    "Do not use emergency or crisis language.",
    "Keep each title under 6 words and each description under 25 words.",
    "Use only these action types: BREATHING, JOURNAL, MEDITATION, EXERCISE, NONE.",
];

/// Build the single instruction string sent to the remote model.
pub fn build_prompt(stress_level: StressLevel, themes: &[String]) -> String {
    let themes = if themes.is_empty() {
        "none".to_string()
    } else {
        themes.join(", ")
    };

    let mut prompt = format!(
        "You are a gentle wellness companion. Suggest up to 3 short, practical self-care activities \
         for someone whose current stress level is {} and whose journal themes are: {}.\n\nRules:\n",
        stress_level, themes
    );
    for rule in PROMPT_CONSTRAINTS {
        prompt.push_str("- ");
        prompt.push_str(rule);
        prompt.push('\n');
    }
    prompt.push_str(
        "\nRespond with JSON only: {\"suggestions\": [{\"title\": string, \"description\": string, \"actionType\": string}]}",
    );
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_level_themes_and_constraints() {
        let prompt = build_prompt(StressLevel::Moderate, &["stress".into(), "insomnia".into()]);
        assert!(prompt.contains("MODERATE"));
        assert!(prompt.contains("stress, insomnia"));
        assert!(prompt.contains("Do not diagnose"));
        assert!(prompt.contains("Do not offer therapy"));
        assert!(prompt.contains("Do not use emergency"));
    }

    #[test]
    fn test_prompt_without_themes() {
        let prompt = build_prompt(StressLevel::Low, &[]);
        assert!(prompt.contains("themes are: none"));
    }
}
