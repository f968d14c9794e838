//! HTTP surface of the wellness API.
//!
//! Every resource lives under `/api`; `/health` sits at the root for liveness checks.

mod audio;
mod chat;
mod games;
mod journals;
mod moods;
mod sentiment;

use crate::actors::therapist::Therapist;
use crate::brain::SentimentAnalyzer;
use crate::config::AppConfig;
use crate::database;
use crate::error::AppError;
use crate::stats::DashboardStats;
use async_trait::async_trait;
use axum::extract::{FromRequest, FromRequestParts, Query, Request, State};
use axum::http::request::Parts;
use axum::http::HeaderValue;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use sqlx::SqlitePool;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use validator::Validate;

/// Largest page any list endpoint returns.
pub const MAX_LIMIT: i64 = 1000;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub analyzer: Arc<SentimentAnalyzer>,
    pub therapist: Arc<Therapist>,
}

impl AppState {
    pub fn new(pool: SqlitePool, analyzer: SentimentAnalyzer, therapist: Therapist) -> Self {
        Self {
            pool,
            analyzer: Arc::new(analyzer),
            therapist: Arc::new(therapist),
        }
    }
}

/// JSON body that is rejected with a 400 when it fails to parse or validate.
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        value.validate()?;
        Ok(ValidJson(value))
    }
}

/// Query string that is rejected with a JSON 400 when it fails to parse.
pub struct ValidQuery<T>(pub T);

#[async_trait]
impl<S, T> FromRequestParts<S> for ValidQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;
        Ok(ValidQuery(value))
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

impl LimitParams {
    pub fn resolve(&self, default: i64) -> i64 {
        clamp_limit(self.limit, default)
    }
}

pub fn clamp_limit(requested: Option<i64>, default: i64) -> i64 {
    requested.unwrap_or(default).clamp(1, MAX_LIMIT)
}

pub fn router(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api", get(root))
        .route("/api/", get(root))
        .route("/api/sentiment/analyze", post(sentiment::analyze))
        .route("/api/moods", post(moods::create).get(moods::list))
        .route("/api/moods/stats", get(moods::stats))
        .route("/api/journals", post(journals::create).get(journals::list))
        .route("/api/journals/:id", delete(journals::remove))
        .route("/api/games/scores", post(games::create).get(games::list))
        .route("/api/games/stats", get(games::stats))
        .route("/api/audio/tracks", get(audio::list).post(audio::create))
        .route("/api/dashboard/stats", get(dashboard_stats))
        .route("/api/chat", post(chat::send))
        .route("/api/chat/history", get(chat::history))
        .with_state(state)
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if config.allows_any_origin() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    layer.allow_origin(origins)
}

async fn health() -> &'static str {
    "OK"
}

async fn root() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Welcome to MindFlow API",
        "status": "active",
    }))
}

async fn dashboard_stats(State(state): State<AppState>) -> Result<Json<DashboardStats>, AppError> {
    let stats = database::get_dashboard_stats(&state.pool).await?;
    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_limit() {
        assert_eq!(clamp_limit(None, 50), 50);
        assert_eq!(clamp_limit(Some(0), 50), 1);
        assert_eq!(clamp_limit(Some(-7), 20), 1);
        assert_eq!(clamp_limit(Some(5000), 20), MAX_LIMIT);
        assert_eq!(clamp_limit(Some(30), 20), 30);
    }
}
