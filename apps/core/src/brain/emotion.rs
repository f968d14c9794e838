//! Emotion prediction from keywords, with a polarity fallback.
//!
//! Rules are checked in order and the first rule with a matching keyword
//! wins. Matching is a plain substring search on the lower-cased text, so
//! "crying" and "hurting" hit the "cry" and "hurt" keywords.

use super::sentiment::Emotion;

/// One entry of the ordered keyword chain
pub struct EmotionRule {
    pub emotion: Emotion,
    pub keywords: &'static [&'static str],
}

impl EmotionRule {
    fn matches(&self, text_lower: &str) -> bool {
        self.keywords.iter().any(|keyword| text_lower.contains(keyword))
    }
}

/// Priority order matters: anxiety beats sadness beats happiness, and so on.
pub const EMOTION_RULES: &[EmotionRule] = &[
    EmotionRule {
        emotion: Emotion::Anxious,
        keywords: &["anxious", "worried", "nervous", "stressed", "panic", "fear"],
    },
    EmotionRule {
        emotion: Emotion::Sad,
        keywords: &["sad", "depressed", "lonely", "hopeless", "cry", "hurt"],
    },
    EmotionRule {
        emotion: Emotion::Happy,
        keywords: &["happy", "joy", "excited", "great", "wonderful", "love"],
    },
    EmotionRule {
        emotion: Emotion::Stressed,
        keywords: &["angry", "furious", "mad", "hate", "frustrated"],
    },
    EmotionRule {
        emotion: Emotion::Calm,
        keywords: &["calm", "peaceful", "relaxed", "serene", "tranquil"],
    },
];

/// Predict an emotion for `text` given its unrounded polarity.
pub fn predict_emotion(text: &str, polarity: f64) -> Emotion {
    let text_lower = text.to_lowercase();

    EMOTION_RULES
        .iter()
        .find(|rule| rule.matches(&text_lower))
        .map(|rule| rule.emotion)
        .unwrap_or_else(|| Emotion::from_polarity(polarity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_rule_fires() {
        assert_eq!(predict_emotion("I'm so nervous", 0.0), Emotion::Anxious);
        assert_eq!(predict_emotion("feeling lonely", 0.0), Emotion::Sad);
        assert_eq!(predict_emotion("pure joy", 0.0), Emotion::Happy);
        assert_eq!(predict_emotion("I am FURIOUS", 0.0), Emotion::Stressed);
        assert_eq!(predict_emotion("a serene evening", 0.0), Emotion::Calm);
    }

    #[test]
    fn test_priority_first_match_wins() {
        assert_eq!(
            predict_emotion("I feel anxious but also happy", 0.9),
            Emotion::Anxious
        );
        assert_eq!(predict_emotion("sad and angry", 0.0), Emotion::Sad);
        assert_eq!(predict_emotion("calm but frustrated", 0.0), Emotion::Stressed);
    }

    #[test]
    fn test_keywords_override_polarity() {
        assert_eq!(predict_emotion("I love it", -0.9), Emotion::Happy);
    }

    #[test]
    fn test_substring_matching() {
        assert_eq!(predict_emotion("I keep crying", 0.0), Emotion::Sad);
    }

    #[test]
    fn test_polarity_fallback() {
        assert_eq!(predict_emotion("the weather", 0.7), Emotion::Happy);
        assert_eq!(predict_emotion("the weather", 0.3), Emotion::Calm);
        assert_eq!(predict_emotion("the weather", 0.0), Emotion::Neutral);
        assert_eq!(predict_emotion("the weather", -0.3), Emotion::Anxious);
        assert_eq!(predict_emotion("the weather", -0.8), Emotion::Sad);
    }
}
