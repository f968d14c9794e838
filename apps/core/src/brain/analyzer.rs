//! Sentiment Analyzer - Main orchestrator for the Brain module.
//!
//! Runs the polarity estimator, derives the sentiment label, predicts the
//! emotion and raises the needs-attention flag. All threshold comparisons use
//! the unrounded scores; rounding happens last.

use tracing::debug;

use super::emotion::predict_emotion;
use super::lexicon::{LexiconEstimator, PolarityEstimator};
use super::sentiment::{round2, PolarityScores, Sentiment, SentimentResult, ATTENTION_THRESHOLD};

/// Main Brain analyzer
pub struct SentimentAnalyzer {
    estimator: Box<dyn PolarityEstimator>,
}

impl Default for SentimentAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl SentimentAnalyzer {
    /// Analyzer backed by the built-in lexicon
    pub fn new() -> Self {
        Self::with_estimator(LexiconEstimator::new())
    }

    pub fn with_estimator<E>(estimator: E) -> Self
    where
        E: PolarityEstimator + 'static,
    {
        Self {
            estimator: Box::new(estimator),
        }
    }

    /// Analyze free text. Empty or whitespace-only input is neutral.
    pub fn analyze(&self, text: &str) -> SentimentResult {
        if text.trim().is_empty() {
            return SentimentResult::neutral();
        }

        let scores = self.estimator.estimate(text);
        let result = self.classify(text, scores);
        debug!("Sentiment analysis: {}", result.summary());
        result
    }

    /// Derive the labelled result from precomputed scores.
    pub fn classify(&self, text: &str, scores: PolarityScores) -> SentimentResult {
        let polarity = sanitize(scores.polarity).clamp(-1.0, 1.0);
        let subjectivity = sanitize(scores.subjectivity).clamp(0.0, 1.0);

        SentimentResult {
            polarity: round2(polarity),
            subjectivity: round2(subjectivity),
            sentiment: Sentiment::from_polarity(polarity),
            emotion: predict_emotion(text, polarity),
            needs_attention: polarity < ATTENTION_THRESHOLD,
        }
    }
}

/// NaN from a misbehaving estimator counts as zero
fn sanitize(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value
    }
}
