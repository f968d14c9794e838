//! Lexicon-based polarity and subjectivity estimation.
//!
//! Every known word carries a (polarity, subjectivity) pair. Intensifiers
//! scale the next scored word, negators flip and dampen its polarity, and the
//! text score is the mean over all scored words.

use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use super::sentiment::PolarityScores;

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    // Positive
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("happier", 0.7, 0.9),
    ("wonderful", 1.0, 1.0),
    ("excellent", 1.0, 1.0),
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("fantastic", 0.4, 0.9),
    ("perfect", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("lovely", 0.5, 0.75),
    ("love", 0.5, 0.6),
    ("loved", 0.7, 0.8),
    ("joy", 0.8, 0.9),
    ("joyful", 0.8, 0.9),
    ("excited", 0.5, 0.8),
    ("exciting", 0.3, 0.8),
    ("glad", 0.5, 1.0),
    ("cheerful", 0.7, 0.8),
    ("nice", 0.6, 1.0),
    ("fine", 0.4, 0.5),
    ("okay", 0.5, 0.5),
    ("ok", 0.5, 0.5),
    ("better", 0.5, 0.5),
    ("best", 1.0, 0.3),
    ("fun", 0.3, 0.2),
    ("enjoy", 0.4, 0.5),
    ("enjoyed", 0.4, 0.5),
    ("grateful", 0.6, 0.9),
    ("thankful", 0.5, 0.8),
    ("hopeful", 0.5, 0.8),
    ("proud", 0.6, 0.9),
    ("confident", 0.5, 0.7),
    ("strong", 0.43, 0.73),
    ("safe", 0.5, 0.5),
    ("kind", 0.6, 0.9),
    ("healthy", 0.5, 0.5),
    ("motivated", 0.4, 0.6),
    ("productive", 0.3, 0.5),
    ("rested", 0.3, 0.5),
    ("smile", 0.3, 0.6),
    ("laugh", 0.3, 0.6),
    ("calm", 0.3, 0.75),
    ("peaceful", 0.5, 0.8),
    ("relaxed", 0.4, 0.7),
    ("serene", 0.5, 0.8),
    ("tranquil", 0.4, 0.7),
    ("positive", 0.23, 0.55),
    // Negative
    ("bad", -0.7, 0.67),
    ("sad", -0.5, 1.0),
    ("unhappy", -0.6, 0.9),
    ("terrible", -1.0, 1.0),
    ("awful", -1.0, 1.0),
    ("horrible", -1.0, 1.0),
    ("worst", -1.0, 1.0),
    ("worse", -0.4, 0.6),
    ("miserable", -0.8, 1.0),
    ("hopeless", -0.7, 1.0),
    ("worthless", -0.8, 0.9),
    ("depressed", -0.6, 0.8),
    ("lonely", -0.6, 0.8),
    ("alone", -0.3, 0.6),
    ("empty", -0.1, 0.5),
    ("anxious", -0.4, 0.8),
    ("worried", -0.4, 0.8),
    ("nervous", -0.3, 0.8),
    ("stressed", -0.5, 0.8),
    ("overwhelmed", -0.5, 0.8),
    ("scared", -0.5, 0.9),
    ("afraid", -0.6, 0.9),
    ("fear", -0.5, 0.8),
    ("panic", -0.6, 0.9),
    ("angry", -0.5, 1.0),
    ("furious", -0.8, 1.0),
    ("mad", -0.625, 1.0),
    ("hate", -0.8, 0.9),
    ("frustrated", -0.5, 0.8),
    ("annoyed", -0.4, 0.7),
    ("upset", -0.5, 0.8),
    ("hurt", -0.5, 0.7),
    ("cry", -0.4, 0.7),
    ("crying", -0.4, 0.7),
    ("pain", -0.5, 0.7),
    ("painful", -0.7, 0.9),
    ("broken", -0.4, 0.6),
    ("tired", -0.4, 0.7),
    ("exhausted", -0.5, 0.8),
    ("sick", -0.7, 0.9),
    ("difficult", -0.5, 1.0),
    ("hard", -0.3, 0.5),
    ("boring", -0.6, 0.8),
    ("confused", -0.4, 0.7),
    ("guilty", -0.5, 0.8),
    ("ashamed", -0.5, 0.8),
    ("disappointed", -0.6, 0.8),
    ("failure", -0.6, 0.7),
    ("failed", -0.5, 0.5),
    ("lost", -0.2, 0.4),
    ("sorry", -0.5, 1.0),
    ("wrong", -0.5, 0.9),
    ("stupid", -0.8, 1.0),
    ("useless", -0.5, 0.6),
];

/// (word, multiplier applied to the next scored word)
const INTENSIFIERS: &[(&str, f64)] = &[
    ("very", 1.3),
    ("really", 1.3),
    ("so", 1.3),
    ("super", 1.3),
    ("totally", 1.3),
    ("deeply", 1.3),
    ("too", 1.2),
    ("truly", 1.2),
    ("quite", 1.1),
    ("completely", 1.4),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("absolutely", 1.5),
    ("somewhat", 0.8),
    ("kinda", 0.8),
    ("slightly", 0.6),
    ("barely", 0.4),
];

const NEGATORS: &[&str] = &[
    "not", "no", "never", "nothing", "without", "hardly", "dont", "don't", "can't", "cant",
    "cannot", "won't", "isn't", "aren't", "wasn't", "weren't", "didn't", "doesn't", "haven't",
    "hasn't", "couldn't", "shouldn't", "wouldn't", "ain't",
];

/// Polarity multiplier for a negated word
const NEGATION_FACTOR: f64 = -0.5;

static LEXICON_MAP: LazyLock<HashMap<&'static str, (f64, f64)>> = LazyLock::new(|| {
    LEXICON
        .iter()
        .map(|&(word, polarity, subjectivity)| (word, (polarity, subjectivity)))
        .collect()
});

static INTENSIFIER_MAP: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| INTENSIFIERS.iter().copied().collect());

static NEGATOR_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| NEGATORS.iter().copied().collect());

// NOTE: expect() is acceptable here, the pattern is a compile-time constant
static TOKEN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[a-z]+(?:'[a-z]+)?|!").expect("Invalid regex: token pattern")
});

/// Anything that can turn text into a polarity/subjectivity pair.
pub trait PolarityEstimator: Send + Sync {
    fn estimate(&self, text: &str) -> PolarityScores;
}

/// Default estimator backed by the built-in word lists
#[derive(Debug, Clone)]
pub struct LexiconEstimator {
    /// How many unscored tokens a pending modifier survives
    modifier_window: usize,
    /// Polarity boost per exclamation mark
    exclamation_boost: f64,
    /// Cap on the number of exclamation marks that count
    max_exclamations: usize,
}

impl Default for LexiconEstimator {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconEstimator {
    pub fn new() -> Self {
        Self::with_config(2, 0.1, 3)
    }

    pub fn with_config(modifier_window: usize, exclamation_boost: f64, max_exclamations: usize) -> Self {
        Self {
            modifier_window,
            exclamation_boost,
            max_exclamations,
        }
    }

    fn tokenize(text: &str) -> Vec<String> {
        let normalized = text.to_lowercase().replace('\u{2019}', "'");
        TOKEN_PATTERN
            .find_iter(&normalized)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Look up a word's raw (polarity, subjectivity), if it is scored at all
    pub fn word_score(word: &str) -> Option<(f64, f64)> {
        LEXICON_MAP.get(word).copied()
    }
}

impl PolarityEstimator for LexiconEstimator {
    fn estimate(&self, text: &str) -> PolarityScores {
        let mut assessments: Vec<(f64, f64)> = Vec::new();
        let mut exclamations = 0usize;
        let mut intensity: Option<f64> = None;
        let mut negated = false;
        let mut gap = 0usize;

        for token in Self::tokenize(text) {
            if token == "!" {
                exclamations += 1;
                continue;
            }

            if let Some(&factor) = INTENSIFIER_MAP.get(token.as_str()) {
                intensity = Some(intensity.unwrap_or(1.0) * factor);
                gap = 0;
                continue;
            }

            if NEGATOR_SET.contains(token.as_str()) {
                negated = !negated;
                gap = 0;
                continue;
            }

            match Self::word_score(&token) {
                Some((mut polarity, mut subjectivity)) => {
                    if let Some(factor) = intensity.take() {
                        polarity *= factor;
                        subjectivity *= factor;
                    }
                    if negated {
                        polarity *= NEGATION_FACTOR;
                        negated = false;
                    }
                    assessments.push((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)));
                    gap = 0;
                }
                None => {
                    gap += 1;
                    if gap > self.modifier_window {
                        intensity = None;
                        negated = false;
                    }
                }
            }
        }

        if assessments.is_empty() {
            return PolarityScores::default();
        }

        let count = assessments.len() as f64;
        let mut polarity = assessments.iter().map(|(p, _)| p).sum::<f64>() / count;
        let subjectivity = assessments.iter().map(|(_, s)| s).sum::<f64>() / count;

        if exclamations > 0 && polarity != 0.0 {
            let marks = exclamations.min(self.max_exclamations) as f64;
            polarity *= 1.0 + self.exclamation_boost * marks;
        }

        PolarityScores::new(polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0))
    }
}
