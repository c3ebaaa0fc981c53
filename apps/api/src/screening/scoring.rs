//! Match scoring — pluggable, trait-based scorer over matched skill sets.
//!
//! Default: `VocabularyShareScorer`, matched skills as a share of the whole
//! vocabulary. `JobDescriptionShareScorer` divides by the job description's
//! own skill count instead and is opt-in via `SCORING_POLICY`.
//!
//! `Screener` holds an `Arc<dyn MatchScorer>`, chosen at startup via config.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::screening::skills::SkillSet;
use crate::screening::vocabulary::Vocabulary;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Invalid configuration: skill vocabulary is empty")]
    InvalidConfiguration,
}

/// `|matching| / |vocabulary| * 100`.
///
/// The denominator is the full vocabulary, so a job description naming two
/// of 25 terms caps every candidate at 8%.
pub fn score(matching: &SkillSet, vocabulary: &Vocabulary) -> Result<f64, ScoringError> {
    if vocabulary.is_empty() {
        return Err(ScoringError::InvalidConfiguration);
    }
    Ok(percentage(matching.len(), vocabulary.len()))
}

// Divide first, then scale: stored scores keep the historical rounding.
fn percentage(part: usize, whole: usize) -> f64 {
    (part as f64 / whole as f64 * 100.0).clamp(0.0, 100.0)
}

/// The scorer trait. Implement this to swap scoring policies without
/// touching the screener or the upload handler.
pub trait MatchScorer: Send + Sync {
    fn score(
        &self,
        matching: &SkillSet,
        jd_skills: &SkillSet,
        vocabulary: &Vocabulary,
    ) -> Result<f64, ScoringError>;

    /// Short backend name for logs.
    fn name(&self) -> &'static str;
}

pub struct VocabularyShareScorer;

impl MatchScorer for VocabularyShareScorer {
    fn score(
        &self,
        matching: &SkillSet,
        _jd_skills: &SkillSet,
        vocabulary: &Vocabulary,
    ) -> Result<f64, ScoringError> {
        score(matching, vocabulary)
    }

    fn name(&self) -> &'static str {
        "vocabulary"
    }
}

/// Scores against the skills the job description actually asks for.
/// A job description with no vocabulary skills scores 0.
pub struct JobDescriptionShareScorer;

impl MatchScorer for JobDescriptionShareScorer {
    fn score(
        &self,
        matching: &SkillSet,
        jd_skills: &SkillSet,
        vocabulary: &Vocabulary,
    ) -> Result<f64, ScoringError> {
        if vocabulary.is_empty() {
            return Err(ScoringError::InvalidConfiguration);
        }
        if jd_skills.is_empty() {
            return Ok(0.0);
        }
        Ok(percentage(matching.len(), jd_skills.len()))
    }

    fn name(&self) -> &'static str {
        "job-description"
    }
}

/// Config-facing selector for the scorer backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoringPolicy {
    #[default]
    Vocabulary,
    JobDescription,
}

impl ScoringPolicy {
    pub fn scorer(self) -> Arc<dyn MatchScorer> {
        match self {
            ScoringPolicy::Vocabulary => Arc::new(VocabularyShareScorer),
            ScoringPolicy::JobDescription => Arc::new(JobDescriptionShareScorer),
        }
    }
}

impl FromStr for ScoringPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vocabulary" => Ok(ScoringPolicy::Vocabulary),
            "job-description" | "job_description" | "jd" => Ok(ScoringPolicy::JobDescription),
            other => Err(format!(
                "unknown scoring policy '{other}' (expected 'vocabulary' or 'job-description')"
            )),
        }
    }
}

impl fmt::Display for ScoringPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoringPolicy::Vocabulary => f.write_str("vocabulary"),
            ScoringPolicy::JobDescription => f.write_str("job-description"),
        }
    }
}
