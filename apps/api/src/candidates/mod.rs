//! Candidate persistence — write-once records of each screening.

pub mod handlers;
pub mod service;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::candidate::{CandidateRow, NewCandidate};

/// The display name recorded for every screened candidate.
pub const DEFAULT_CANDIDATE_NAME: &str = "Candidate";

#[async_trait]
pub trait CandidateStore: Send + Sync {
    async fn insert(&self, candidate: &NewCandidate) -> Result<Uuid, sqlx::Error>;
    async fn find(&self, id: Uuid) -> Result<Option<CandidateRow>, sqlx::Error>;
}

pub struct PgCandidateStore {
    pool: PgPool,
}

impl PgCandidateStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CandidateStore for PgCandidateStore {
    async fn insert(&self, candidate: &NewCandidate) -> Result<Uuid, sqlx::Error> {
        let id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO candidates
                (id, name, email, match_score, skills, jd_text, cv_text)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(id)
        .bind(&candidate.name)
        .bind(candidate.email.as_deref())
        .bind(candidate.match_score)
        .bind(&candidate.skills)
        .bind(&candidate.jd_text)
        .bind(&candidate.cv_text)
        .execute(&self.pool)
        .await?;

        info!("Stored candidate {id} (score {:.2})", candidate.match_score);
        Ok(id)
    }

    async fn find(&self, id: Uuid) -> Result<Option<CandidateRow>, sqlx::Error> {
        sqlx::query_as::<_, CandidateRow>("SELECT * FROM candidates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }
}
