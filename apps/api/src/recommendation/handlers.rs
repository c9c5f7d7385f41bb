//! Axum route handlers for the Recommendation API.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::ProfileInput;
use crate::models::recommendation::Recommendation;
use crate::recommendation::features::SCHEMA_VERSION;
use crate::recommendation::pipeline::{recommend, score_career};
use crate::recommendation::ranker::resolve_top_k;
use crate::recommendation::registry::CareerModel;
use crate::recommendation::scoring::ScoredCareer;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TopKQuery {
    pub top_k: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub request_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub schema_version: &'static str,
    pub scorer_backend: &'static str,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Debug, Serialize)]
pub struct CareerListResponse {
    pub careers: Vec<CareerModel>,
}

#[derive(Debug, Serialize)]
pub struct ReloadResponse {
    pub careers: usize,
}

/// Maps body extraction failures onto the `VALIDATION_ERROR` envelope.
fn read_profile(payload: Result<Json<Value>, JsonRejection>) -> Result<ProfileInput, AppError> {
    let Json(body) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;
    ProfileInput::from_json(body)
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/recommendations
///
/// Ranks every career for the submitted profile and returns the top `top_k`
/// (default from config) with explanations.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Query(query): Query<TopKQuery>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<RecommendationResponse>, AppError> {
    let k = resolve_top_k(query.top_k, state.config.default_top_k)?;
    let input = read_profile(payload)?;
    let registry = state.registry.current();
    let request_id = Uuid::new_v4();

    let recommendations = recommend(
        state.engine.as_ref(),
        &registry,
        &input,
        k,
        state.config.explanation_top_n,
    )
    .await?;

    info!(
        %request_id,
        source = input.source(),
        k,
        returned = recommendations.len(),
        "Recommendations generated"
    );

    Ok(Json(RecommendationResponse {
        request_id,
        generated_at: Utc::now(),
        schema_version: SCHEMA_VERSION,
        scorer_backend: state.engine.backend(),
        recommendations,
    }))
}

/// GET /api/v1/careers
pub async fn handle_list_careers(State(state): State<AppState>) -> Json<CareerListResponse> {
    let registry = state.registry.current();
    Json(CareerListResponse {
        careers: registry.list().to_vec(),
    })
}

/// GET /api/v1/careers/:title
pub async fn handle_get_career(
    State(state): State<AppState>,
    Path(title): Path<String>,
) -> Result<Json<CareerModel>, AppError> {
    let registry = state.registry.current();
    Ok(Json(registry.get(&title)?.clone()))
}

/// POST /api/v1/careers/:title/score
///
/// Full contribution breakdown for one career, including zero-filtered
/// contributions, raw score and bias.
pub async fn handle_score_career(
    State(state): State<AppState>,
    Path(title): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ScoredCareer>, AppError> {
    let input = read_profile(payload)?;
    let registry = state.registry.current();
    let scored = score_career(
        state.engine.as_ref(),
        &registry,
        &title,
        &input,
        state.config.explanation_top_n,
    )
    .await?;
    Ok(Json(scored))
}

/// POST /api/v1/careers/reload
///
/// Re-reads the registry source and swaps it in. A failed reload keeps the
/// current registry.
pub async fn handle_reload_registry(
    State(state): State<AppState>,
) -> Result<Json<ReloadResponse>, AppError> {
    let careers = state.registry.reload()?;
    Ok(Json(ReloadResponse { careers }))
}
