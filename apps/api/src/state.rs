use std::sync::Arc;

use crate::candidates::CandidateStore;
use crate::documents::{TextSource, UploadStore};
use crate::notify::Notifier;
use crate::screening::Screener;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every collaborator sits behind a trait object so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    /// Vocabulary, match mode and scoring policy, fixed at startup.
    pub screener: Arc<Screener>,
    pub text_source: Arc<dyn TextSource>,
    pub uploads: Arc<dyn UploadStore>,
    pub candidates: Arc<dyn CandidateStore>,
    pub notifier: Arc<dyn Notifier>,
}
