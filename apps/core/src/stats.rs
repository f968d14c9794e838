//! Aggregate statistics for the dashboard views.

use crate::models::{GameScore, MoodEntry};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Count labels and pick the most frequent one.
///
/// Ties go to the label seen first, so callers should pass labels oldest first.
fn tally<'a, I>(labels: I) -> (Option<String>, BTreeMap<String, usize>)
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for label in labels {
        let count = counts.entry(label).or_insert(0);
        if *count == 0 {
            first_seen.push(label);
        }
        *count += 1;
    }

    let mut most_common: Option<(&str, usize)> = None;
    for label in &first_seen {
        let count = counts[label];
        if most_common.map_or(true, |(_, best)| count > best) {
            most_common = Some((label, count));
        }
    }

    let distribution = counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect();

    (most_common.map(|(label, _)| label.to_string()), distribution)
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodStats {
    pub total_entries: usize,
    pub most_common_mood: Option<String>,
    pub average_intensity: f64,
    pub mood_distribution: BTreeMap<String, usize>,
}

impl MoodStats {
    /// `entries` must be ordered oldest first.
    pub fn from_entries(entries: &[MoodEntry]) -> Self {
        if entries.is_empty() {
            return Self {
                total_entries: 0,
                most_common_mood: None,
                average_intensity: 0.0,
                mood_distribution: BTreeMap::new(),
            };
        }

        let (most_common_mood, mood_distribution) =
            tally(entries.iter().map(|entry| entry.mood.as_str()));
        let total_intensity: i64 = entries.iter().map(|entry| entry.intensity).sum();

        Self {
            total_entries: entries.len(),
            most_common_mood,
            average_intensity: round2(total_intensity as f64 / entries.len() as f64),
            mood_distribution,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    pub total_games_played: usize,
    pub games_completed: usize,
    /// Seconds, summed over scores that report a duration.
    pub total_time_spent: i64,
    pub favorite_game: Option<String>,
    pub game_distribution: BTreeMap<String, usize>,
}

impl GameStats {
    /// `scores` must be ordered oldest first.
    pub fn from_scores(scores: &[GameScore]) -> Self {
        let (favorite_game, game_distribution) =
            tally(scores.iter().map(|score| score.game_type.as_str()));

        Self {
            total_games_played: scores.len(),
            games_completed: scores.iter().filter(|score| score.completed).count(),
            total_time_spent: scores.iter().filter_map(|score| score.duration).sum(),
            favorite_game,
            game_distribution,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_mood_entries: i64,
    pub total_journal_entries: i64,
    pub total_games_played: i64,
    pub total_chat_messages: i64,
    /// Label of the newest mood entry.
    pub recent_mood: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn mood(label: &str, intensity: i64) -> MoodEntry {
        MoodEntry {
            id: uuid::Uuid::new_v4().to_string(),
            mood: label.to_string(),
            intensity,
            note: None,
            sentiment: None,
            timestamp: Utc::now(),
        }
    }

    fn game(game_type: &str, duration: Option<i64>, completed: bool) -> GameScore {
        GameScore {
            id: uuid::Uuid::new_v4().to_string(),
            game_type: game_type.to_string(),
            score: 10,
            duration,
            completed,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_empty_mood_stats() {
        let stats = MoodStats::from_entries(&[]);
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.most_common_mood, None);
        assert_eq!(stats.average_intensity, 0.0);
        assert!(stats.mood_distribution.is_empty());
    }

    #[test]
    fn test_mood_stats() {
        let entries = vec![mood("calm", 3), mood("happy", 8), mood("calm", 6)];
        let stats = MoodStats::from_entries(&entries);

        assert_eq!(stats.total_entries, 3);
        assert_eq!(stats.most_common_mood.as_deref(), Some("calm"));
        assert_eq!(stats.average_intensity, 5.67);
        assert_eq!(stats.mood_distribution["calm"], 2);
        assert_eq!(stats.mood_distribution["happy"], 1);
    }

    #[test]
    fn test_mood_tie_goes_to_first_seen() {
        let entries = vec![mood("sad", 4), mood("happy", 6), mood("happy", 6), mood("sad", 4)];
        let stats = MoodStats::from_entries(&entries);
        assert_eq!(stats.most_common_mood.as_deref(), Some("sad"));
    }

    #[test]
    fn test_empty_game_stats() {
        let stats = GameStats::from_scores(&[]);
        assert_eq!(stats.total_games_played, 0);
        assert_eq!(stats.games_completed, 0);
        assert_eq!(stats.total_time_spent, 0);
        assert_eq!(stats.favorite_game, None);
    }

    #[test]
    fn test_game_stats() {
        let scores = vec![
            game("breathing", Some(60), true),
            game("memory", None, false),
            game("breathing", Some(90), false),
        ];
        let stats = GameStats::from_scores(&scores);

        assert_eq!(stats.total_games_played, 3);
        assert_eq!(stats.games_completed, 1);
        assert_eq!(stats.total_time_spent, 150);
        assert_eq!(stats.favorite_game.as_deref(), Some("breathing"));
        assert_eq!(stats.game_distribution["memory"], 1);
    }
}
