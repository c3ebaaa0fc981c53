//! In-memory collaborators for driving the router in tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use uuid::Uuid;

use crate::candidates::CandidateStore;
use crate::documents::{ExtractionError, StorageError, TextSource, UploadStore};
use crate::models::candidate::{CandidateRow, NewCandidate};
use crate::notify::testing::RecordingNotifier;
use crate::screening::scoring::VocabularyShareScorer;
use crate::screening::{MatchMode, Screener, Vocabulary};
use crate::state::AppState;

/// Uploaded bytes are the text. Anything starting with `%BROKEN` fails to extract.
pub struct Utf8TextSource;

#[async_trait]
impl TextSource for Utf8TextSource {
    async fn cv_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        if bytes.starts_with(b"%BROKEN") {
            return Err(ExtractionError::Pdf("invalid file header".to_string()));
        }
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    async fn jd_text(&self, bytes: &[u8]) -> Result<String, ExtractionError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

#[derive(Default)]
pub struct MemoryUploadStore {
    pub files: Mutex<HashMap<String, Bytes>>,
}

#[async_trait]
impl UploadStore for MemoryUploadStore {
    async fn put(&self, name: &str, bytes: Bytes) -> Result<(), StorageError> {
        self.files.lock().unwrap().insert(name.to_string(), bytes);
        Ok(())
    }

    async fn get(&self, name: &str) -> Result<Bytes, StorageError> {
        self.files
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| StorageError::NotFound(name.to_string()))
    }

    fn location(&self, name: &str) -> String {
        format!("memory://{name}")
    }
}

#[derive(Default)]
pub struct MemoryCandidateStore {
    pub rows: Mutex<Vec<CandidateRow>>,
}

#[async_trait]
impl CandidateStore for MemoryCandidateStore {
    async fn insert(&self, candidate: &NewCandidate) -> Result<Uuid, sqlx::Error> {
        let id = Uuid::new_v4();
        self.rows.lock().unwrap().push(CandidateRow {
            id,
            name: candidate.name.clone(),
            email: candidate.email.clone(),
            match_score: candidate.match_score,
            skills: candidate.skills.clone(),
            jd_text: candidate.jd_text.clone(),
            cv_text: candidate.cv_text.clone(),
            created_at: Utc::now(),
        });
        Ok(id)
    }

    async fn find(&self, id: Uuid) -> Result<Option<CandidateRow>, sqlx::Error> {
        Ok(self.rows.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }
}

pub struct TestHarness {
    pub state: AppState,
    pub uploads: Arc<MemoryUploadStore>,
    pub candidates: Arc<MemoryCandidateStore>,
    pub notifier: Arc<RecordingNotifier>,
}

pub fn harness_with(vocabulary: Vocabulary, notifier: RecordingNotifier) -> TestHarness {
    let uploads = Arc::new(MemoryUploadStore::default());
    let candidates = Arc::new(MemoryCandidateStore::default());
    let notifier = Arc::new(notifier);
    let screener = Screener::new(
        Arc::new(vocabulary),
        MatchMode::Substring,
        Arc::new(VocabularyShareScorer),
    );
    let state = AppState {
        screener: Arc::new(screener),
        text_source: Arc::new(Utf8TextSource),
        uploads: uploads.clone(),
        candidates: candidates.clone(),
        notifier: notifier.clone(),
    };
    TestHarness {
        state,
        uploads,
        candidates,
        notifier,
    }
}

pub fn harness() -> TestHarness {
    harness_with(Vocabulary::default_skills(), RecordingNotifier::default())
}

pub const BOUNDARY: &str = "screener-test-boundary";

/// Builds a multipart/form-data body from `(field, file_name, content)` parts.
pub fn multipart_body(parts: &[(&str, Option<&str>, &str)]) -> Vec<u8> {
    let mut body = Vec::new();
    for (field, file_name, content) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let disposition = match file_name {
            Some(f) => format!("Content-Disposition: form-data; name=\"{field}\"; filename=\"{f}\"\r\n"),
            None => format!("Content-Disposition: form-data; name=\"{field}\"\r\n"),
        };
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(content.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}
