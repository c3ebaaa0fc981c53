//! The upload-to-record screening flow.

use bytes::Bytes;
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::candidates::DEFAULT_CANDIDATE_NAME;
use crate::documents::sanitize_filename;
use crate::errors::AppError;
use crate::models::candidate::NewCandidate;
use crate::notify::{notify_if_shortlisted, NotificationOutcome};
use crate::state::AppState;

/// One uploaded file as received from the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

#[derive(Debug, Serialize)]
pub struct ScreeningReport {
    pub candidate_id: Uuid,
    pub cv_text: String,
    pub jd_text: String,
    pub matching_skills: Vec<String>,
    pub match_score: f64,
    pub primary_contact: Option<String>,
    pub notification: NotificationOutcome,
    pub message: String,
}

/// Store uploads → extract text → evaluate → notify → persist.
///
/// Extraction and scoring failures abort before anything is recorded.
/// A notification failure does not.
pub async fn screen_upload(
    state: &AppState,
    cv: UploadedFile,
    jd: UploadedFile,
) -> Result<ScreeningReport, AppError> {
    let cv_name = sanitize_filename(&cv.file_name)?;
    let jd_name = sanitize_filename(&jd.file_name)?;

    state.uploads.put(&cv_name, cv.bytes.clone()).await?;
    info!("CV file saved at: {}", state.uploads.location(&cv_name));
    state.uploads.put(&jd_name, jd.bytes.clone()).await?;
    info!("JD file saved at: {}", state.uploads.location(&jd_name));

    let cv_text = state.text_source.cv_text(&cv.bytes).await?;
    let jd_text = state.text_source.jd_text(&jd.bytes).await?;

    let evaluation = state.screener.evaluate(&cv_text, &jd_text)?;
    info!(
        score = evaluation.score,
        matched = evaluation.matched_skills.len(),
        scorer = state.screener.scorer_name(),
        "Screened {cv_name} against {jd_name}"
    );

    let notification = notify_if_shortlisted(
        state.notifier.as_ref(),
        evaluation.primary_contact.as_deref(),
        evaluation.score,
    )
    .await;

    let matching_skills = evaluation.matched_skills.to_vec();
    let candidate_id = state
        .candidates
        .insert(&NewCandidate {
            name: DEFAULT_CANDIDATE_NAME.to_string(),
            email: evaluation.primary_contact.clone(),
            match_score: evaluation.score,
            skills: matching_skills.clone(),
            jd_text: jd_text.clone(),
            cv_text: cv_text.clone(),
        })
        .await?;

    Ok(ScreeningReport {
        candidate_id,
        cv_text,
        jd_text,
        matching_skills,
        match_score: evaluation.score,
        primary_contact: evaluation.primary_contact,
        message: notification.message(),
        notification,
    })
}
