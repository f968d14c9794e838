use super::{AppState, ValidJson};
use crate::database;
use crate::error::AppError;
use crate::models::{AudioTrack, AudioTrackCreate};
use axum::extract::State;
use axum::Json;

const CATALOG_LIMIT: i64 = 100;

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AudioTrack>>, AppError> {
    let tracks = database::get_audio_tracks(&state.pool, CATALOG_LIMIT).await?;
    Ok(Json(tracks))
}

pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<AudioTrackCreate>,
) -> Result<Json<AudioTrack>, AppError> {
    let track = database::create_audio_track(&state.pool, &payload).await?;
    Ok(Json(track))
}
