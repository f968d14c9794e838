use super::{clamp_limit, AppState, ValidJson, ValidQuery, MAX_LIMIT};
use crate::database;
use crate::error::AppError;
use crate::models::{GameScore, GameScoreCreate};
use crate::stats::GameStats;
use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use tracing::instrument;

const DEFAULT_LIMIT: i64 = 20;

#[derive(Debug, Default, Deserialize)]
pub struct ScoreParams {
    pub game_type: Option<String>,
    pub limit: Option<i64>,
}

#[instrument(skip_all, fields(game_type = %payload.game_type))]
pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<GameScoreCreate>,
) -> Result<Json<GameScore>, AppError> {
    let score = database::create_game_score(&state.pool, &payload).await?;
    Ok(Json(score))
}

pub async fn list(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<ScoreParams>,
) -> Result<Json<Vec<GameScore>>, AppError> {
    let game_type = params.game_type.as_deref().filter(|kind| !kind.is_empty());
    let limit = clamp_limit(params.limit, DEFAULT_LIMIT);

    let scores = database::get_game_scores(&state.pool, game_type, limit).await?;
    Ok(Json(scores))
}

pub async fn stats(State(state): State<AppState>) -> Result<Json<GameStats>, AppError> {
    let history = database::get_game_history(&state.pool, MAX_LIMIT).await?;
    Ok(Json(GameStats::from_scores(&history)))
}
