use super::{AppState, ValidJson};
use crate::brain::supportive_message;
use crate::models::{AnalyzeRequest, AnalyzeResponse};
use axum::extract::State;
use axum::Json;

/// Scores arbitrary text without storing it.
pub async fn analyze(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    let analysis = state.analyzer.analyze(&payload.text);

    Json(AnalyzeResponse {
        supportive_message: supportive_message(&analysis),
        analysis,
    })
}
