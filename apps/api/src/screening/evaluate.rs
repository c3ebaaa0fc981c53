use std::sync::Arc;

use tracing::debug;

use crate::screening::contact::extract_primary_contact;
use crate::screening::normalizer::normalize;
use crate::screening::scoring::{MatchScorer, ScoringError, VocabularyShareScorer};
use crate::screening::skills::{extract_skills, match_skills, MatchMode, SkillSet};
use crate::screening::vocabulary::Vocabulary;

/// Outcome of screening one CV against one job description.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateEvaluation {
    pub matched_skills: SkillSet,
    pub score: f64,
    pub primary_contact: Option<String>,
}

/// The screening pipeline: normalise both texts, extract vocabulary skills,
/// intersect, score, and pick the candidate's contact address.
///
/// Pure and synchronous. Shared across requests behind an `Arc`.
#[derive(Clone)]
pub struct Screener {
    vocabulary: Arc<Vocabulary>,
    mode: MatchMode,
    scorer: Arc<dyn MatchScorer>,
}

impl Screener {
    pub fn new(vocabulary: Arc<Vocabulary>, mode: MatchMode, scorer: Arc<dyn MatchScorer>) -> Self {
        Self {
            vocabulary,
            mode,
            scorer,
        }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn scorer_name(&self) -> &'static str {
        self.scorer.name()
    }

    pub fn evaluate(&self, cv_text: &str, jd_text: &str) -> Result<CandidateEvaluation, ScoringError> {
        let cv_skills = extract_skills(&normalize(cv_text), &self.vocabulary, self.mode);
        let jd_skills = extract_skills(&normalize(jd_text), &self.vocabulary, self.mode);
        let matched_skills = match_skills(&cv_skills, &jd_skills);
        let score = self
            .scorer
            .score(&matched_skills, &jd_skills, &self.vocabulary)?;

        debug!(
            cv_skills = cv_skills.len(),
            jd_skills = jd_skills.len(),
            matched = matched_skills.len(),
            score,
            "Evaluated candidate"
        );

        Ok(CandidateEvaluation {
            matched_skills,
            score,
            primary_contact: extract_primary_contact(cv_text),
        })
    }
}

/// Screens with substring matching and the vocabulary-share score.
#[allow(dead_code)]
pub fn evaluate_candidate(
    cv_text: &str,
    jd_text: &str,
    vocabulary: &Vocabulary,
) -> Result<CandidateEvaluation, ScoringError> {
    let screener = Screener::new(
        Arc::new(vocabulary.clone()),
        MatchMode::Substring,
        Arc::new(VocabularyShareScorer),
    );
    screener.evaluate(cv_text, jd_text)
}
