//! Axum route handlers for the Societal Influence API.

use std::collections::BTreeMap;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::societal::SocietalAnalysisRow;
use crate::societal::explainer::template_explanation;
use crate::societal::keys::CompoundKey;
use crate::societal::mapping::responses_from_json;
use crate::societal::{compute_recommendation, recommend_from_answers, Domain, Recommendation};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AnswersRequest {
    /// 18 Likert answers in survey order.
    pub answers: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsesRequest {
    /// Semantic key (`role_med_pos`) → Likert answer. Values stay raw JSON so
    /// non-numbers are reported by the engine's error taxonomy.
    pub responses: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub saved_id: Uuid,
    pub bias_scores: BTreeMap<CompoundKey, f64>,
    pub domain_scores: BTreeMap<Domain, f64>,
    pub recommended_domains: Vec<Domain>,
    pub reason: String,
    pub explanation: String,
    pub explainer_backend: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/societal/recommend
///
/// Scores an ordered 18-answer survey, explains and stores the result.
pub async fn handle_recommend(
    State(state): State<AppState>,
    Json(request): Json<AnswersRequest>,
) -> Result<(StatusCode, Json<RecommendationResponse>), AppError> {
    let recommendation = recommend_from_answers(&request.answers)?;
    let response = explain_and_store(&state, json!(request.answers), recommendation).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/v1/societal/recommend/responses
///
/// Same pipeline for callers that already hold semantic-key responses.
pub async fn handle_recommend_responses(
    State(state): State<AppState>,
    Json(request): Json<ResponsesRequest>,
) -> Result<(StatusCode, Json<RecommendationResponse>), AppError> {
    if request.responses.is_empty() {
        return Err(AppError::Validation("responses cannot be empty".to_string()));
    }

    let responses = responses_from_json(&request.responses)?;
    let recommendation = compute_recommendation(&responses)?;
    let response = explain_and_store(&state, json!(request.responses), recommendation).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/v1/societal/analyses/:id
pub async fn handle_get_analysis(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SocietalAnalysisRow>, AppError> {
    let row = state
        .store
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Analysis {id} not found")))?;
    Ok(Json(row))
}

/// Explains a finished recommendation, persists it, and shapes the API response.
///
/// An explainer failure never discards the engine result: the template text is
/// used instead.
async fn explain_and_store(
    state: &AppState,
    input: serde_json::Value,
    recommendation: Recommendation,
) -> Result<RecommendationResponse, AppError> {
    let (explanation, backend) = match state.explainer.explain(&recommendation).await {
        Ok(text) => (text, state.explainer.backend()),
        Err(e) => {
            warn!("Explanation failed, falling back to template: {e}");
            (template_explanation(&recommendation), "template")
        }
    };

    let row = SocietalAnalysisRow::new(input, &recommendation, explanation, backend)?;
    state.store.insert(&row).await?;

    info!(
        "Societal analysis {} recommended {:?}",
        row.id, recommendation.winning_domains
    );

    Ok(RecommendationResponse {
        saved_id: row.id,
        bias_scores: recommendation.bias_scores,
        domain_scores: recommendation.domain_scores,
        recommended_domains: recommendation.winning_domains,
        reason: recommendation.reason,
        explanation: row.explanation,
        explainer_backend: row.explainer_backend,
    })
}
