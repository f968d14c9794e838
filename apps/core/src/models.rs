use crate::brain::SentimentResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// Rejects strings that are empty once trimmed.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Represents a recorded mood.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MoodEntry {
    /// The unique identifier for the entry (UUID).
    pub id: String,
    /// Free-form mood label (happy, sad, anxious, calm, stressed, peaceful, ...).
    pub mood: String,
    /// Self-reported intensity on a 1-10 scale.
    pub intensity: i64,
    /// Optional note written alongside the mood.
    pub note: Option<String>,
    /// Analysis of the note, when there is one.
    pub sentiment: Option<Json<SentimentResult>>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MoodEntryCreate {
    #[validate(length(min = 1, max = 50), custom(function = "not_blank"))]
    pub mood: String,
    #[validate(range(min = 1, max = 10))]
    pub intensity: i64,
    #[validate(length(max = 2000))]
    pub note: Option<String>,
}

/// Represents a journal entry (typed or dictated).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JournalEntry {
    pub id: String,
    pub content: String,
    /// Whether the entry was dictated through the voice journal.
    pub is_voice: bool,
    pub tags: Json<Vec<String>>,
    /// Analysis of the content.
    pub sentiment: Json<SentimentResult>,
    /// Supportive reply shown after saving.
    pub supportive_message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JournalEntryCreate {
    #[validate(length(min = 1, max = 20000), custom(function = "not_blank"))]
    pub content: String,
    #[serde(default)]
    pub is_voice: bool,
    #[serde(default)]
    #[validate(length(max = 20))]
    pub tags: Vec<String>,
}

/// Represents the outcome of one relaxation game session.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GameScore {
    pub id: String,
    /// breathing, memory, puzzle, coloring, ...
    pub game_type: String,
    pub score: i64,
    /// Time played, in seconds.
    pub duration: Option<i64>,
    pub completed: bool,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GameScoreCreate {
    #[validate(length(min = 1, max = 50), custom(function = "not_blank"))]
    pub game_type: String,
    #[validate(range(min = 0))]
    pub score: i64,
    #[validate(range(min = 0))]
    pub duration: Option<i64>,
    #[serde(default)]
    pub completed: bool,
}

/// Represents an ambient audio track.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AudioTrack {
    pub id: String,
    pub title: String,
    pub url: String,
    /// nature, meditation, ambient, relaxing, ...
    pub category: String,
    /// Length in seconds.
    pub duration: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AudioTrackCreate {
    #[validate(length(min = 1, max = 200), custom(function = "not_blank"))]
    pub title: String,
    #[validate(url)]
    pub url: String,
    #[validate(length(min = 1, max = 50), custom(function = "not_blank"))]
    pub category: String,
    #[validate(range(min = 0))]
    pub duration: Option<i64>,
}

/// Represents one exchange with the AI therapist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub id: String,
    /// What the user wrote.
    pub message: String,
    /// What the assistant answered.
    pub response: String,
    /// Analysis of the user's message.
    pub sentiment: Json<SentimentResult>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ChatMessageCreate {
    #[validate(length(min = 1, max = 4000), custom(function = "not_blank"))]
    pub message: String,
}

/// Ad-hoc analysis request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyzeRequest {
    /// A missing `text` analyzes as empty.
    #[serde(default)]
    #[validate(length(max = 20000))]
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(flatten)]
    pub analysis: SentimentResult,
    pub supportive_message: String,
}
