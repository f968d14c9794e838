//! Brain Module Tests
//!
//! End-to-end checks of the analysis pipeline: estimator, classifier,
//! emotion rules and supportive messages working together.

use crate::brain::lexicon::{LexiconEstimator, PolarityEstimator};
use crate::brain::sentiment::{Emotion, PolarityScores, Sentiment};
use crate::brain::{supportive_message, SentimentAnalyzer, SentimentResult};

#[cfg(test)]
mod pipeline_tests {
    use super::*;

    #[test]
    fn test_emotion_rule_priority() {
        let analyzer = SentimentAnalyzer::new();

        let cases = vec![
            ("I am worried and sad", Emotion::Anxious),
            ("so lonely, but happy you called", Emotion::Sad),
            ("great news, but I'm still furious", Emotion::Happy),
            ("this traffic makes me so mad", Emotion::Stressed),
            ("feeling calm and peaceful after my walk", Emotion::Calm),
        ];

        for (text, expected) in cases {
            assert_eq!(
                analyzer.analyze(text).emotion,
                expected,
                "Unexpected emotion for '{}'",
                text
            );
        }
    }

    #[test]
    fn test_keyword_beats_polarity_band() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.analyze("this traffic makes me so mad");

        // Polarity alone would land in the sad band
        assert!(result.polarity < -0.5);
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.emotion, Emotion::Stressed);
        assert!(result.needs_attention);
    }

    #[test]
    fn test_negation_flips_sentiment_but_not_keyword() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.analyze("I am not happy");

        assert_eq!(result.polarity, -0.4);
        assert_eq!(result.sentiment, Sentiment::Negative);
        assert_eq!(result.emotion, Emotion::Happy);
        assert!(result.needs_attention);
    }

    #[test]
    fn test_unscored_text_is_neutral() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.analyze("The meeting is at noon");

        assert_eq!(result, SentimentResult::neutral());
        assert_eq!(
            supportive_message(&result),
            "Thank you for sharing. I'm here to listen whenever you need."
        );
    }

    #[test]
    fn test_non_ascii_input_stays_in_range() {
        let analyzer = SentimentAnalyzer::new();

        for text in ["Je suis très content 😊", "😢😢😢", "日本語のテキスト", "¡¡¡!!!"] {
            let result = analyzer.analyze(text);
            assert!((-1.0..=1.0).contains(&result.polarity), "polarity out of range for '{}'", text);
            assert!(
                (0.0..=1.0).contains(&result.subjectivity),
                "subjectivity out of range for '{}'",
                text
            );
        }
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let analyzer = SentimentAnalyzer::new();
        let text = "Really excited but a bit nervous about tomorrow!";
        assert_eq!(analyzer.analyze(text), analyzer.analyze(text));
    }

    #[test]
    fn test_results_are_rounded_to_two_decimals() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.analyze("I am so happy and excited today!");

        assert_eq!(result.polarity, (result.polarity * 100.0).round() / 100.0);
        assert_eq!(result.subjectivity, (result.subjectivity * 100.0).round() / 100.0);
    }
}

#[cfg(test)]
mod supportive_message_tests {
    use super::*;

    #[test]
    fn test_flagged_journal_gets_escalation() {
        let analyzer = SentimentAnalyzer::new();
        let result = analyzer.analyze("I feel hopeless and want to cry");
        let message = supportive_message(&result);

        assert!(result.needs_attention);
        assert!(message.starts_with("I sense you're going through a difficult time."));
        assert!(message.contains("trusted adult or mental health professional"));
    }

    #[test]
    fn test_happy_entry_has_no_escalation() {
        let analyzer = SentimentAnalyzer::new();
        let message = supportive_message(&analyzer.analyze("I am so happy and excited today!"));

        assert!(message.starts_with("It's wonderful to see you"));
        assert!(!message.contains("trusted adult"));
    }

    #[test]
    fn test_every_emotion_has_a_distinct_message() {
        let mut seen = std::collections::HashSet::new();
        for emotion in Emotion::ALL {
            let result = SentimentResult {
                emotion,
                ..SentimentResult::neutral()
            };
            let message = supportive_message(&result);
            assert!(!message.is_empty());
            assert!(seen.insert(message), "Duplicate message for {:?}", emotion);
        }
    }
}

#[cfg(test)]
mod estimator_seam_tests {
    use super::*;

    /// Scores by the count of "!" only
    struct ShoutEstimator;

    impl PolarityEstimator for ShoutEstimator {
        fn estimate(&self, text: &str) -> PolarityScores {
            let marks = text.matches('!').count() as f64;
            PolarityScores::new(-0.2 * marks, 0.5)
        }
    }

    #[test]
    fn test_analyzer_accepts_other_estimators() {
        let analyzer = SentimentAnalyzer::with_estimator(ShoutEstimator);

        let calm = analyzer.analyze("no marks at all");
        assert_eq!(calm.sentiment, Sentiment::Neutral);

        let loud = analyzer.analyze("stop!!");
        assert_eq!(loud.polarity, -0.4);
        assert_eq!(loud.emotion, Emotion::Anxious);
        assert!(loud.needs_attention);
    }

    #[test]
    fn test_default_estimator_is_lexicon() {
        let text = "What a wonderful, beautiful morning";
        let direct = LexiconEstimator::new().estimate(text);
        let result = SentimentAnalyzer::new().analyze(text);

        assert_eq!(result.polarity, (direct.polarity * 100.0).round() / 100.0);
    }
}
