// src/prompt/builder.rs
//! Deterministic prompt composition.
//!
//! The prompt text is the whole contract with the model: output format is
//! requested here, never enforced, so downstream parsing must stay lenient.

use crate::mood::MoodRequest;
use crate::persona::Persona;
use crate::sentiment::{Sentiment, SentimentLevel};

const CRISIS_CONTEXT: &str = "The user may be in crisis or thinking about harming themselves. \
Respond with deep warmth and calm, take what they said seriously, and gently but clearly \
encourage them to contact a crisis line (such as calling or texting 988 in the US) or local \
emergency services right now, and to reach out to someone they trust.";
const HIGH_DISTRESS_CONTEXT: &str = "The user seems to be struggling a lot. Be extra gentle, \
validate their feelings, and softly mention that talking to someone they trust or a \
professional can really help.";
const MODERATE_DISTRESS_CONTEXT: &str = "The user seems upset. Be extra gentle and supportive.";
const POSITIVE_CONTEXT: &str = "The user seems to be in a good mood. Share their excitement \
and keep the vibe upbeat.";
const NEUTRAL_CONTEXT: &str = "The user seems okay. Keep it friendly and upbeat.";

/// Context sentence for a classified message.
pub fn context_for(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Graded(SentimentLevel::Crisis) => CRISIS_CONTEXT,
        Sentiment::Graded(SentimentLevel::HighDistress) => HIGH_DISTRESS_CONTEXT,
        Sentiment::Graded(SentimentLevel::ModerateDistress) => MODERATE_DISTRESS_CONTEXT,
        Sentiment::Graded(SentimentLevel::Positive) => POSITIVE_CONTEXT,
        Sentiment::Graded(SentimentLevel::Neutral) => NEUTRAL_CONTEXT,
        Sentiment::Binary { distressed: true } => MODERATE_DISTRESS_CONTEXT,
        Sentiment::Binary { distressed: false } => NEUTRAL_CONTEXT,
    }
}

/// Persona block, context line, then the user's words.
pub fn build_chat_prompt(persona: Persona, sentiment: Sentiment, user_message: &str) -> String {
    format!(
        "{}\nContext: {}\nUser: {}\nBot:",
        persona.prompt(),
        context_for(sentiment),
        user_message
    )
}

pub fn build_quotes_prompt(request: &MoodRequest) -> String {
    format!(
        r#"
Provide exactly 2-3 motivational quotes for someone with this mood:

Mood Score: {score}/10
Mood Description: {description}

Requirements:
- Each quote should be on its own line
- Format: "Quote text" (Author Name) or "Quote text" if author unknown
- No explanatory text or introductions
- Choose quotes specifically helpful for this mood level
- Start each line with just the quote, no numbering

Example format:
"The way to get started is to quit talking and begin doing." (Walt Disney)
"Don't watch the clock; do what it does. Keep going." (Sam Levenson)
"#,
        score = request.mood_score,
        description = request.mood_description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Number;

    #[test]
    fn chat_prompt_has_labelled_sections_in_order() {
        let prompt = build_chat_prompt(
            Persona::Alex,
            Sentiment::Graded(SentimentLevel::Neutral),
            "hey there",
        );
        let persona_at = prompt.find("best friend named Alex").unwrap();
        let context_at = prompt.find("Context: The user seems okay").unwrap();
        let user_at = prompt.find("User: hey there").unwrap();
        assert!(persona_at < context_at && context_at < user_at);
        assert!(prompt.ends_with("Bot:"));
    }

    #[test]
    fn every_category_has_its_own_context() {
        let levels = [
            SentimentLevel::Crisis,
            SentimentLevel::HighDistress,
            SentimentLevel::ModerateDistress,
            SentimentLevel::Positive,
            SentimentLevel::Neutral,
        ];
        let mut seen: Vec<&str> = levels
            .iter()
            .map(|level| context_for(Sentiment::Graded(*level)))
            .collect();
        seen.dedup();
        assert_eq!(seen.len(), 5);
        assert!(context_for(Sentiment::Graded(SentimentLevel::Crisis)).contains("988"));
    }

    #[test]
    fn binary_contexts_match_the_light_variant() {
        assert_eq!(
            context_for(Sentiment::Binary { distressed: true }),
            "The user seems upset. Be extra gentle and supportive."
        );
        assert_eq!(
            context_for(Sentiment::Binary { distressed: false }),
            "The user seems okay. Keep it friendly and upbeat."
        );
    }

    #[test]
    fn quotes_prompt_embeds_score_as_sent() {
        let request = MoodRequest {
            mood_score: Number::from(4),
            mood_description: "Feeling stressed about work".into(),
        };
        let prompt = build_quotes_prompt(&request);
        assert!(prompt.contains("Mood Score: 4/10"));
        assert!(prompt.contains("Mood Description: Feeling stressed about work"));
        assert!(prompt.contains("exactly 2-3 motivational quotes"));

        let request = MoodRequest {
            mood_score: Number::from_f64(6.5).unwrap(),
            mood_description: String::new(),
        };
        assert!(build_quotes_prompt(&request).contains("Mood Score: 6.5/10"));
    }
}
