//! Sentiment Result - Output structure for Brain analysis.
//!
//! Immutable value computed from a piece of free text and embedded as-is into
//! journal entries, mood notes and chat messages.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Polarity above which text reads as positive
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Polarity below which text reads as negative
pub const NEGATIVE_THRESHOLD: f64 = -0.1;
/// Polarity below which a human-support nudge is surfaced
pub const ATTENTION_THRESHOLD: f64 = -0.3;

/// Coarse sentiment label derived from polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
    #[serde(other)]
    Neutral,
}

impl Sentiment {
    /// Positive above 0.1, negative below -0.1, neutral in between (bounds inclusive).
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > POSITIVE_THRESHOLD {
            Sentiment::Positive
        } else if polarity < NEGATIVE_THRESHOLD {
            Sentiment::Negative
        } else {
            Sentiment::Neutral
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Negative => "negative",
            Sentiment::Neutral => "neutral",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Coarse guess about the writer's emotional state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anxious,
    Sad,
    Happy,
    Stressed,
    Calm,
    /// Also the landing spot for labels this build does not know about.
    Neutral,
}

impl Emotion {
    /// Every label, in the order the keyword rules are evaluated.
    pub const ALL: [Emotion; 6] = [
        Emotion::Anxious,
        Emotion::Sad,
        Emotion::Happy,
        Emotion::Stressed,
        Emotion::Calm,
        Emotion::Neutral,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Emotion::Anxious => "anxious",
            Emotion::Sad => "sad",
            Emotion::Happy => "happy",
            Emotion::Stressed => "stressed",
            Emotion::Calm => "calm",
            Emotion::Neutral => "neutral",
        }
    }

    /// Parse a stored label; anything unrecognized is `Neutral`.
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|e| e.label().eq_ignore_ascii_case(label))
            .unwrap_or(Emotion::Neutral)
    }

    /// Fallback when no keyword rule fires.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.5 {
            Emotion::Happy
        } else if polarity > POSITIVE_THRESHOLD {
            Emotion::Calm
        } else if polarity < -0.5 {
            Emotion::Sad
        } else if polarity < NEGATIVE_THRESHOLD {
            Emotion::Anxious
        } else {
            Emotion::Neutral
        }
    }
}

// Stored labels are matched case-insensitively; unknown ones read back as neutral.
impl<'de> Deserialize<'de> for Emotion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let label = String::deserialize(deserializer)?;
        Ok(Emotion::from_label(&label))
    }
}

impl fmt::Display for Emotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Raw estimator output, before labels are derived and before rounding
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PolarityScores {
    /// -1.0 (negative) to 1.0 (positive)
    pub polarity: f64,
    /// 0.0 (objective) to 1.0 (subjective)
    pub subjectivity: f64,
}

impl PolarityScores {
    pub fn new(polarity: f64, subjectivity: f64) -> Self {
        Self {
            polarity,
            subjectivity,
        }
    }
}

/// Complete sentiment analysis of one piece of text
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// Rounded to 2 decimals
    pub polarity: f64,
    /// Rounded to 2 decimals
    pub subjectivity: f64,
    pub sentiment: Sentiment,
    pub emotion: Emotion,
    /// Set when polarity is strictly below -0.3
    pub needs_attention: bool,
}

impl SentimentResult {
    /// Result for empty or unscorable text.
    pub fn neutral() -> Self {
        Self {
            polarity: 0.0,
            subjectivity: 0.0,
            sentiment: Sentiment::Neutral,
            emotion: Emotion::Neutral,
            needs_attention: false,
        }
    }

    /// One-line summary for logs and prompts
    pub fn summary(&self) -> String {
        format!(
            "sentiment={} emotion={} polarity={:.2} subjectivity={:.2} attention={}",
            self.sentiment,
            self.emotion,
            self.polarity,
            self.subjectivity,
            if self.needs_attention { "yes" } else { "no" }
        )
    }
}

impl Default for SentimentResult {
    fn default() -> Self {
        Self::neutral()
    }
}

/// Round half away from zero to two decimal places.
///
/// Adding `0.0` folds `-0.0` into `0.0`, so tiny negative scores store as zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0 + 0.0
}
