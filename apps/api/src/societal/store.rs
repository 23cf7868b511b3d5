//! Analysis persistence — every computed recommendation is kept for later review.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::societal::SocietalAnalysisRow;
use crate::societal::Recommendation;

/// Storage backend for analyses. Carried in `AppState` as `Arc<dyn AnalysisStore>`.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn insert(&self, row: &SocietalAnalysisRow) -> Result<(), AppError>;

    async fn get(&self, id: Uuid) -> Result<Option<SocietalAnalysisRow>, AppError>;
}

impl SocietalAnalysisRow {
    /// Builds a fresh row (new id, current timestamp) for a completed analysis.
    pub fn new(
        answers: Value,
        recommendation: &Recommendation,
        explanation: String,
        explainer_backend: &str,
    ) -> Result<Self, AppError> {
        let to_json = |v: serde_json::Result<Value>| v.map_err(|e| AppError::Internal(e.into()));

        Ok(Self {
            id: Uuid::new_v4(),
            answers,
            bias_scores: to_json(serde_json::to_value(&recommendation.bias_scores))?,
            domain_scores: to_json(serde_json::to_value(&recommendation.domain_scores))?,
            recommended_domains: recommendation
                .winning_domains
                .iter()
                .map(|d| d.name().to_string())
                .collect(),
            reason: recommendation.reason.clone(),
            explanation,
            explainer_backend: explainer_backend.to_string(),
            created_at: Utc::now(),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgAnalysisStore {
    pool: PgPool,
}

impl PgAnalysisStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn insert(&self, row: &SocietalAnalysisRow) -> Result<(), AppError> {
        // Append-only: analyses are never updated after insert
        sqlx::query(
            r#"
            INSERT INTO societal_analyses
                (id, answers, bias_scores, domain_scores, recommended_domains,
                 reason, explanation, explainer_backend, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(row.id)
        .bind(&row.answers)
        .bind(&row.bias_scores)
        .bind(&row.domain_scores)
        .bind(&row.recommended_domains)
        .bind(&row.reason)
        .bind(&row.explanation)
        .bind(&row.explainer_backend)
        .bind(row.created_at)
        .execute(&self.pool)
        .await?;

        info!("Saved societal analysis {}", row.id);
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<SocietalAnalysisRow>, AppError> {
        let row = sqlx::query_as::<_, SocietalAnalysisRow>(
            "SELECT * FROM societal_analyses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory (tests)
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
#[derive(Default)]
pub struct InMemoryAnalysisStore {
    rows: std::sync::Mutex<std::collections::HashMap<Uuid, SocietalAnalysisRow>>,
}

#[cfg(test)]
impl InMemoryAnalysisStore {
    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[cfg(test)]
#[async_trait]
impl AnalysisStore for InMemoryAnalysisStore {
    async fn insert(&self, row: &SocietalAnalysisRow) -> Result<(), AppError> {
        self.rows.lock().unwrap().insert(row.id, row.clone());
        Ok(())
    }

    async fn get(&self, id: Uuid) -> Result<Option<SocietalAnalysisRow>, AppError> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }
}
