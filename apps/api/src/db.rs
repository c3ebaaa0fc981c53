use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

const CREATE_CANDIDATES: &str = r#"
CREATE TABLE IF NOT EXISTS candidates (
    id          UUID PRIMARY KEY,
    name        TEXT NOT NULL,
    email       TEXT,
    match_score DOUBLE PRECISION NOT NULL,
    skills      TEXT[] NOT NULL DEFAULT '{}',
    jd_text     TEXT NOT NULL,
    cv_text     TEXT NOT NULL,
    created_at  TIMESTAMPTZ NOT NULL DEFAULT now()
)
"#;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the `candidates` table if it does not exist yet.
pub async fn init_schema(pool: &PgPool) -> Result<()> {
    sqlx::query(CREATE_CANDIDATES)
        .execute(pool)
        .await
        .context("failed to create candidates table")?;
    info!("Database schema ready");
    Ok(())
}
