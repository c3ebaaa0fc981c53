//! Axum route handlers for candidate screening and stored uploads.

use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::candidates::service::{screen_upload, ScreeningReport, UploadedFile};
use crate::documents::storage::content_type_for;
use crate::errors::AppError;
use crate::models::candidate::CandidateRow;
use crate::state::AppState;

/// POST /upload
///
/// Multipart form with two file fields, `cv` (PDF) and `jd` (CSV).
/// Unknown fields are ignored.
pub async fn handle_upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ScreeningReport>, AppError> {
    let mut cv = None;
    let mut jd = None;

    while let Some(field) = multipart.next_field().await? {
        let name = match field.name() {
            Some(n @ ("cv" | "jd")) => n.to_string(),
            _ => continue,
        };
        let file_name = field
            .file_name()
            .map(str::to_string)
            .ok_or_else(|| AppError::Validation(format!("Field '{name}' must be a file")))?;
        let bytes = field.bytes().await?;
        let file = UploadedFile { file_name, bytes };
        if name == "cv" {
            cv = Some(file);
        } else {
            jd = Some(file);
        }
    }

    let cv = cv.ok_or_else(|| AppError::Validation("Missing 'cv' file".to_string()))?;
    let jd = jd.ok_or_else(|| AppError::Validation("Missing 'jd' file".to_string()))?;

    let report = screen_upload(&state, cv, jd).await?;
    Ok(Json(report))
}

/// GET /uploads/:filename
pub async fn handle_get_upload(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let data = state.uploads.get(&filename).await?;
    Ok(([(header::CONTENT_TYPE, content_type_for(&filename))], data))
}

/// GET /api/v1/candidates/:id
pub async fn handle_get_candidate(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CandidateRow>, AppError> {
    let candidate = state
        .candidates
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;
    Ok(Json(candidate))
}
