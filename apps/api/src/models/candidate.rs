use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CandidateRow {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub match_score: f64,
    pub skills: Vec<String>,
    pub jd_text: String,
    pub cv_text: String,
    pub created_at: DateTime<Utc>,
}

/// A screened candidate, written once after evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCandidate {
    pub name: String,
    pub email: Option<String>,
    pub match_score: f64,
    pub skills: Vec<String>,
    pub jd_text: String,
    pub cv_text: String,
}
