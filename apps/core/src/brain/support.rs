//! Supportive message templates.

use super::sentiment::{Emotion, SentimentResult};

/// Appended whenever the analysis asks for attention
pub const ESCALATION_NOTICE: &str = "If these feelings persist, please consider talking to a trusted adult or mental health professional.";

/// Base template for an emotion
pub fn template_for(emotion: Emotion) -> &'static str {
    match emotion {
        Emotion::Happy => "It's wonderful to see you in such a positive state! Keep embracing these joyful moments.",
        Emotion::Calm => "Your sense of peace is beautiful. Continue nurturing this tranquility.",
        Emotion::Sad => "I sense you're going through a difficult time. Remember, it's okay to feel this way. Consider reaching out to someone you trust.",
        Emotion::Anxious => "You seem worried. Try some breathing exercises, and remember - you're stronger than you think.",
        Emotion::Stressed => "You're feeling overwhelmed. Take a moment for yourself. Small steps can make a big difference.",
        Emotion::Neutral => "Thank you for sharing. I'm here to listen whenever you need.",
    }
}

/// Empathetic reply for an analysis, with the escalation notice when flagged.
pub fn supportive_message(result: &SentimentResult) -> String {
    let base = template_for(result.emotion);
    if result.needs_attention {
        format!("{} {}", base, ESCALATION_NOTICE)
    } else {
        base.to_string()
    }
}
