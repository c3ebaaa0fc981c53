/// Skill keywords recognised by the screener, in reporting order.
pub const DEFAULT_SKILLS: [&str; 25] = [
    "java",
    "python",
    "sql",
    "javascript",
    "html",
    "css",
    "c++",
    "react",
    "nodejs",
    "aws",
    "docker",
    "kubernetes",
    "azure",
    "machine learning",
    "data science",
    "deep learning",
    "devops",
    "android",
    "flutter",
    "java spring",
    "c",
    "ruby",
    "mysql",
    "mongodb",
    "power bi",
];

/// An ordered, duplicate-free list of lowercase skill terms.
///
/// Built once at startup and shared read-only (behind an `Arc`) by every
/// screening call. Terms may be single tokens or short phrases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
}

impl Vocabulary {
    /// Lowercases and trims every term, dropping blanks and repeats.
    /// The first occurrence of a term fixes its position.
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim().to_lowercase();
            if term.is_empty() || unique.contains(&term) {
                continue;
            }
            unique.push(term);
        }
        Self { terms: unique }
    }

    pub fn default_skills() -> Self {
        Self::new(DEFAULT_SKILLS)
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::default_skills()
    }
}
