// src/sentiment.rs
//! Keyword-based sentiment detection for chat messages.
//!
//! Matching is plain substring containment on the lowercased message, so a
//! keyword embedded in a longer word still counts ("downtown" contains "down").

use std::fmt;
use std::str::FromStr;

const DISTRESS_KEYWORDS: &[&str] = &[
    "sad",
    "stressed",
    "anxious",
    "down",
    "upset",
    "depressed",
    "overwhelmed",
];

const CRISIS_KEYWORDS: &[&str] = &[
    "suicide",
    "suicidal",
    "kill myself",
    "end my life",
    "end it all",
    "want to die",
    "better off dead",
    "no reason to live",
    "self harm",
    "self-harm",
    "hurt myself",
    "cut myself",
];

const HIGH_DISTRESS_KEYWORDS: &[&str] = &[
    "hopeless",
    "worthless",
    "can't go on",
    "cant go on",
    "can't cope",
    "cant cope",
    "panic attack",
    "depressed",
    "desperate",
    "falling apart",
    "breaking down",
    "trapped",
];

const MODERATE_DISTRESS_KEYWORDS: &[&str] = &[
    "sad",
    "stressed",
    "anxious",
    "down",
    "upset",
    "overwhelmed",
    "worried",
    "lonely",
    "frustrated",
    "nervous",
    "exhausted",
    "tired",
];

const POSITIVE_KEYWORDS: &[&str] = &[
    "happy",
    "great",
    "excited",
    "good",
    "grateful",
    "awesome",
    "wonderful",
    "proud",
    "joy",
    "better",
    "amazing",
];

/// Graded distress category, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentLevel {
    Crisis,
    HighDistress,
    ModerateDistress,
    Positive,
    Neutral,
}

impl SentimentLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SentimentLevel::Crisis => "crisis",
            SentimentLevel::HighDistress => "high_distress",
            SentimentLevel::ModerateDistress => "moderate_distress",
            SentimentLevel::Positive => "positive",
            SentimentLevel::Neutral => "neutral",
        }
    }
}

impl fmt::Display for SentimentLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which classifier the chat service runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentMode {
    /// Five-level severity classifier
    Graded,
    /// Distressed / not distressed
    Binary,
}

impl FromStr for SentimentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "graded" => Ok(SentimentMode::Graded),
            "binary" => Ok(SentimentMode::Binary),
            other => Err(format!("unknown sentiment mode: {other}")),
        }
    }
}

/// Result of running the configured classifier over one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sentiment {
    Graded(SentimentLevel),
    Binary { distressed: bool },
}

impl Sentiment {
    /// Label reported back to clients as `sentiment_detected`.
    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Graded(level) => level.as_str(),
            Sentiment::Binary { distressed: true } => "distressed",
            Sentiment::Binary { distressed: false } => "okay",
        }
    }
}

fn contains_any(haystack: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| haystack.contains(keyword))
}

/// Binary classifier: true when any distress keyword appears.
pub fn detect_distress(message: &str) -> bool {
    contains_any(&message.to_lowercase(), DISTRESS_KEYWORDS)
}

/// Graded classifier. Sets are checked in severity order and the first hit
/// wins, so crisis language always outranks anything positive.
pub fn classify(message: &str) -> SentimentLevel {
    let lowered = message.to_lowercase();

    if contains_any(&lowered, CRISIS_KEYWORDS) {
        return SentimentLevel::Crisis;
    }
    if contains_any(&lowered, HIGH_DISTRESS_KEYWORDS) {
        return SentimentLevel::HighDistress;
    }
    if contains_any(&lowered, MODERATE_DISTRESS_KEYWORDS) {
        return SentimentLevel::ModerateDistress;
    }
    if contains_any(&lowered, POSITIVE_KEYWORDS) {
        return SentimentLevel::Positive;
    }
    SentimentLevel::Neutral
}

/// Runs whichever classifier `mode` selects.
pub fn analyze(message: &str, mode: SentimentMode) -> Sentiment {
    match mode {
        SentimentMode::Graded => Sentiment::Graded(classify(message)),
        SentimentMode::Binary => Sentiment::Binary {
            distressed: detect_distress(message),
        },
    }
}
