use super::{AppState, LimitParams, ValidJson, ValidQuery};
use crate::brain::supportive_message;
use crate::database;
use crate::error::AppError;
use crate::models::{JournalEntry, JournalEntryCreate};
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, instrument};

const DEFAULT_LIMIT: i64 = 20;

/// Stores the entry together with its analysis and the supportive reply.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<JournalEntryCreate>,
) -> Result<Json<JournalEntry>, AppError> {
    let analysis = state.analyzer.analyze(&payload.content);
    let message = supportive_message(&analysis);

    if analysis.needs_attention {
        info!("Journal entry flagged for attention ({})", analysis.summary());
    }

    let entry = database::create_journal_entry(&state.pool, &payload, analysis, &message).await?;
    Ok(Json(entry))
}

pub async fn list(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<LimitParams>,
) -> Result<Json<Vec<JournalEntry>>, AppError> {
    let entries = database::get_journal_entries(&state.pool, params.resolve(DEFAULT_LIMIT)).await?;
    Ok(Json(entries))
}

#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    if !database::delete_journal_entry(&state.pool, &id).await? {
        return Err(AppError::NotFound("Journal entry".to_string()));
    }

    Ok(Json(json!({ "message": "Journal entry deleted successfully" })))
}
