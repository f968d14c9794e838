use super::{AppState, LimitParams, ValidJson, ValidQuery, MAX_LIMIT};
use crate::database;
use crate::error::AppError;
use crate::models::{MoodEntry, MoodEntryCreate};
use crate::stats::MoodStats;
use axum::extract::State;
use axum::Json;
use tracing::instrument;

const DEFAULT_LIMIT: i64 = 50;

#[instrument(skip_all, fields(mood = %payload.mood))]
pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<MoodEntryCreate>,
) -> Result<Json<MoodEntry>, AppError> {
    // Only a written note carries anything to analyze.
    let sentiment = payload
        .note
        .as_deref()
        .filter(|note| !note.trim().is_empty())
        .map(|note| state.analyzer.analyze(note));

    let entry = database::create_mood_entry(&state.pool, &payload, sentiment).await?;
    Ok(Json(entry))
}

pub async fn list(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<LimitParams>,
) -> Result<Json<Vec<MoodEntry>>, AppError> {
    let entries = database::get_mood_entries(&state.pool, params.resolve(DEFAULT_LIMIT)).await?;
    Ok(Json(entries))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<MoodStats>, AppError> {
    let history = database::get_mood_history(&state.pool, MAX_LIMIT).await?;
    Ok(Json(MoodStats::from_entries(&history)))
}
