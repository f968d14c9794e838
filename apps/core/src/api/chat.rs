use super::{AppState, LimitParams, ValidJson, ValidQuery};
use crate::database;
use crate::error::AppError;
use crate::models::{ChatMessage, ChatMessageCreate};
use axum::extract::State;
use axum::Json;
use tracing::{info, instrument};

const DEFAULT_LIMIT: i64 = 50;

/// Analyzes the message, asks the therapist for a reply and stores the exchange.
#[instrument(skip_all)]
pub async fn send(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<ChatMessageCreate>,
) -> Result<Json<ChatMessage>, AppError> {
    let analysis = state.analyzer.analyze(&payload.message);

    let window = state.therapist.history_window() as i64;
    let history = database::get_chat_history(&state.pool, window).await?;

    let reply = state
        .therapist
        .reply(&payload.message, &analysis, &history)
        .await;
    info!("Chat reply ready (source: {:?}, {})", reply.source, analysis.summary());

    let stored =
        database::create_chat_message(&state.pool, &payload.message, &reply.text, analysis).await?;
    Ok(Json(stored))
}

pub async fn history(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<LimitParams>,
) -> Result<Json<Vec<ChatMessage>>, AppError> {
    let messages = database::get_chat_history(&state.pool, params.resolve(DEFAULT_LIMIT)).await?;
    Ok(Json(messages))
}
