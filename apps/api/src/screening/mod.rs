// Candidate screening core: normalisation, skill extraction, matching, scoring.
// Pure and synchronous. No I/O here; collaborators live in documents/, candidates/, notify/.

pub mod contact;
pub mod evaluate;
pub mod normalizer;
pub mod scoring;
pub mod skills;
pub mod vocabulary;

pub use evaluate::Screener;
pub use scoring::{ScoringError, ScoringPolicy};
pub use skills::MatchMode;
pub use vocabulary::Vocabulary;
