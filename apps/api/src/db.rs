use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::{Executor, PgPool};
use tracing::info;

/// Idempotent schema for stored analyses.
const SCHEMA: &str = include_str!("../migrations/001_societal_analyses.sql");

/// Creates a PostgreSQL connection pool and makes sure the analysis table exists.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url)
        .await
        .context("Failed to connect to PostgreSQL")?;

    pool.execute(SCHEMA)
        .await
        .context("Failed to apply societal_analyses schema")?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}
