//! Skill detection and intersection over normalised text.

use std::fmt;
use std::str::FromStr;

use crate::screening::vocabulary::Vocabulary;

/// How a vocabulary term is located inside normalised text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Plain substring containment: `"c"` is found inside `"aircraft"`.
    #[default]
    Substring,
    /// The term must be bounded by a space or the ends of the text.
    WordBoundary,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "word-boundary" | "word_boundary" => Ok(MatchMode::WordBoundary),
            other => Err(format!(
                "unknown skill match mode '{other}' (expected 'substring' or 'word-boundary')"
            )),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Substring => f.write_str("substring"),
            MatchMode::WordBoundary => f.write_str("word-boundary"),
        }
    }
}

/// A set of vocabulary terms.
///
/// Iteration follows insertion order, which for extracted sets is the
/// vocabulary order. Equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct SkillSet {
    skills: Vec<String>,
}

impl SkillSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a skill; returns `false` if it was already present.
    pub fn insert(&mut self, skill: impl Into<String>) -> bool {
        let skill = skill.into();
        if self.contains(&skill) {
            return false;
        }
        self.skills.push(skill);
        true
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.skills.iter().any(|s| s == skill)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.skills.clone()
    }
}

impl PartialEq for SkillSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|s| other.contains(s))
    }
}

impl Eq for SkillSet {}

impl<S: Into<String>> FromIterator<S> for SkillSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SkillSet::new();
        for skill in iter {
            set.insert(skill);
        }
        set
    }
}

/// Returns the vocabulary terms present in `normalized_text`, in vocabulary order.
pub fn extract_skills(normalized_text: &str, vocabulary: &Vocabulary, mode: MatchMode) -> SkillSet {
    vocabulary
        .terms()
        .iter()
        .filter(|term| is_present(normalized_text, term, mode))
        .cloned()
        .collect()
}

/// Set intersection. Keeps the order of `doc_skills`.
pub fn match_skills(doc_skills: &SkillSet, jd_skills: &SkillSet) -> SkillSet {
    doc_skills
        .iter()
        .filter(|skill| jd_skills.contains(skill))
        .collect()
}

fn is_present(text: &str, term: &str, mode: MatchMode) -> bool {
    if term.is_empty() {
        return false;
    }
    match mode {
        MatchMode::Substring => text.contains(term),
        MatchMode::WordBoundary => text.match_indices(term).any(|(start, _)| {
            let end = start + term.len();
            let before_ok = text[..start].chars().next_back().map_or(true, |c| c == ' ');
            let after_ok = text[end..].chars().next().map_or(true, |c| c == ' ');
            before_ok && after_ok
        }),
    }
}
