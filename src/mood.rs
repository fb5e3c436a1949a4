// src/mood.rs
//! Mood scores (1-10) and the context bands used to prompt for quotes.

use serde_json::Number;

pub const MIN_MOOD_SCORE: f64 = 1.0;
pub const MAX_MOOD_SCORE: f64 = 10.0;

/// A validated quotes request.
#[derive(Debug, Clone, PartialEq)]
pub struct MoodRequest {
    /// Score exactly as the client sent it, so `4` stays `4` and `4.5` stays `4.5`
    pub mood_score: Number,
    pub mood_description: String,
}

impl MoodRequest {
    pub fn score(&self) -> f64 {
        self.mood_score.as_f64().unwrap_or(MIN_MOOD_SCORE)
    }

    pub fn band(&self) -> MoodBand {
        MoodBand::from_score(self.score())
    }
}

/// Five fixed bands. Boundaries (3, 5, 7, 9) belong to the lower band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodBand {
    VeryLow,
    Low,
    Neutral,
    Good,
    Excellent,
}

impl MoodBand {
    pub fn from_score(score: f64) -> Self {
        if score <= 3.0 {
            MoodBand::VeryLow
        } else if score <= 5.0 {
            MoodBand::Low
        } else if score <= 7.0 {
            MoodBand::Neutral
        } else if score <= 9.0 {
            MoodBand::Good
        } else {
            MoodBand::Excellent
        }
    }

    pub fn context(&self) -> &'static str {
        match self {
            MoodBand::VeryLow => "very low, struggling, depressed",
            MoodBand::Low => "low, feeling down, unmotivated",
            MoodBand::Neutral => "neutral to slightly positive, okay",
            MoodBand::Good => "good, positive, motivated",
            MoodBand::Excellent => "excellent, very happy, energetic",
        }
    }
}

/// Context phrase for a score.
pub fn get_mood_context(score: f64) -> &'static str {
    MoodBand::from_score(score).context()
}

pub fn is_valid_score(score: f64) -> bool {
    (MIN_MOOD_SCORE..=MAX_MOOD_SCORE).contains(&score)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_integer_score_maps_to_one_band() {
        let expected = [
            (1, MoodBand::VeryLow),
            (2, MoodBand::VeryLow),
            (3, MoodBand::VeryLow),
            (4, MoodBand::Low),
            (5, MoodBand::Low),
            (6, MoodBand::Neutral),
            (7, MoodBand::Neutral),
            (8, MoodBand::Good),
            (9, MoodBand::Good),
            (10, MoodBand::Excellent),
        ];
        for (score, band) in expected {
            assert_eq!(MoodBand::from_score(score as f64), band, "score {score}");
        }
    }

    #[test]
    fn fractional_scores_just_above_a_boundary_move_up() {
        assert_eq!(MoodBand::from_score(3.01), MoodBand::Low);
        assert_eq!(MoodBand::from_score(9.5), MoodBand::Excellent);
    }

    #[test]
    fn context_strings() {
        assert_eq!(get_mood_context(3.0), "very low, struggling, depressed");
        assert_eq!(get_mood_context(9.0), "good, positive, motivated");
    }

    #[test]
    fn score_range_is_inclusive() {
        assert!(is_valid_score(1.0));
        assert!(is_valid_score(10.0));
        assert!(!is_valid_score(0.99));
        assert!(!is_valid_score(10.5));
        assert!(!is_valid_score(f64::NAN));
    }
}
