use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SocietalAnalysisRow {
    pub id: Uuid,
    /// Raw request input, either the answer vector or the semantic-key map.
    pub answers: Value,
    pub bias_scores: Value,
    pub domain_scores: Value,
    pub recommended_domains: Vec<String>,
    pub reason: String,
    pub explanation: String,
    pub explainer_backend: String,
    pub created_at: DateTime<Utc>,
}
