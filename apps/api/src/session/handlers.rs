//! Axum route handlers for the wizard session API.

use axum::{
    body::Body,
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::Response,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::analysis::request::{resolve_mime_type, OCTET_STREAM};
use crate::calculator::ManualAssessment;
use crate::errors::AppError;
use crate::models::applicant::{ApplicantCategory, EvaluationMode, Language};
use crate::session::store::NewUpload;
use crate::session::{ManualEntry, SessionView, UploadedDocumentView};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub lang: Language,
}

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SelectCategoryRequest {
    pub category: ApplicantCategory,
}

#[derive(Debug, Deserialize)]
pub struct SetLanguageRequest {
    pub lang: Language,
}

#[derive(Debug, Deserialize)]
pub struct SetModeRequest {
    pub mode: EvaluationMode,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub documents: Vec<UploadedDocumentView>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
    body: Option<Json<CreateSessionRequest>>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AppError> {
    let lang = body.map(|Json(b)| b.lang).unwrap_or_default();
    let id = state.sessions.create(lang)?;
    Ok((StatusCode::CREATED, Json(CreateSessionResponse { id })))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state.sessions.with(id, |s| SessionView::new(id, s))?;
    Ok(Json(view))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/sessions/:id/reset
///
/// Clears category, uploads, calculator input and result. An analysis still
/// running for this session will be discarded when it returns.
pub async fn handle_reset_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let view = state.sessions.with_mut(id, |s| {
        s.reset();
        SessionView::new(id, s)
    })?;
    info!("Session {id} reset");
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/category
pub async fn handle_select_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SelectCategoryRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = state
        .sessions
        .with_mut(id, |s| -> Result<SessionView, AppError> {
            s.select_category(req.category)?;
            Ok(SessionView::new(id, s))
        })??;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/language
pub async fn handle_set_language(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetLanguageRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = state.sessions.with_mut(id, |s| {
        s.set_language(req.lang);
        SessionView::new(id, s)
    })?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/mode
pub async fn handle_set_mode(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<SetModeRequest>,
) -> Result<Json<SessionView>, AppError> {
    let view = state.sessions.with_mut(id, |s| {
        s.set_mode(req.mode);
        SessionView::new(id, s)
    })?;
    Ok(Json(view))
}

/// PUT /api/v1/sessions/:id/manual
///
/// Stores the raw calculator inputs and returns the recomputed DTI.
pub async fn handle_update_manual(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(entry): Json<ManualEntry>,
) -> Result<Json<ManualAssessment>, AppError> {
    let assessment = state.sessions.with_mut(id, |s| s.update_manual(entry))?;
    Ok(Json(assessment))
}

/// POST /api/v1/sessions/:id/slots/:descriptor_id
///
/// Multipart batch upload into one catalog slot. Every file field is stored;
/// non-file fields are ignored. Rejected with 413 when the session would hold
/// more than `MAX_SESSION_BYTES`.
pub async fn handle_upload_documents(
    State(state): State<AppState>,
    Path((id, descriptor_id)): Path<(Uuid, String)>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let mut uploads = Vec::new();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        let Some(filename) = field.file_name().map(str::to_string) else {
            continue;
        };
        let mime_type = field.content_type().unwrap_or_default().to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read {filename}: {e}")))?;
        uploads.push(NewUpload {
            filename,
            mime_type,
            data,
        });
    }

    if uploads.is_empty() {
        return Err(AppError::Validation("No files in upload".to_string()));
    }

    let max_bytes = state.config.max_session_bytes;
    let documents = state
        .sessions
        .with_mut(id, |s| -> Result<Vec<UploadedDocumentView>, AppError> {
            let ids = s.add_uploads(&descriptor_id, uploads, max_bytes)?;
            Ok(ids
                .iter()
                .filter_map(|file_id| s.uploads.get(file_id))
                .map(|doc| UploadedDocumentView::new(&id, doc))
                .collect())
        })??;

    info!(
        "Session {id}: {} file(s) added to '{descriptor_id}'",
        documents.len()
    );
    Ok((StatusCode::CREATED, Json(UploadResponse { documents })))
}

/// DELETE /api/v1/sessions/:id/documents/:file_id
///
/// Removing an unknown file id is a no-op.
pub async fn handle_remove_document(
    State(state): State<AppState>,
    Path((id, file_id)): Path<(Uuid, String)>,
) -> Result<StatusCode, AppError> {
    state.sessions.with_mut(id, |s| s.uploads.remove(&file_id))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Types the preview serves as-is. Anything else goes out as an opaque download
/// so uploaded markup or SVG never renders from this origin.
fn preview_content_type(resolved: &str) -> &str {
    let is_raster_image = resolved.starts_with("image/") && !resolved.contains("svg");
    if resolved == "application/pdf" || is_raster_image {
        resolved
    } else {
        OCTET_STREAM
    }
}

/// Filename for `Content-Disposition`, limited to characters that need no quoting rules.
fn disposition_filename(filename: &str) -> String {
    let cleaned: String = filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_' | ' ') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim().is_empty() {
        "document".to_string()
    } else {
        cleaned
    }
}

/// GET /api/v1/sessions/:id/documents/:file_id/preview
pub async fn handle_preview_document(
    State(state): State<AppState>,
    Path((id, file_id)): Path<(Uuid, String)>,
) -> Result<Response, AppError> {
    let (filename, mime, data) = state
        .sessions
        .with(id, |s| {
            s.uploads.get(&file_id).map(|d| {
                (
                    d.filename.clone(),
                    resolve_mime_type(&d.filename, &d.mime_type),
                    d.data.clone(),
                )
            })
        })?
        .ok_or_else(|| AppError::NotFound(format!("Document {file_id} not found")))?;

    let content_type = preview_content_type(&mime);
    let disposition = if content_type == OCTET_STREAM {
        "attachment"
    } else {
        "inline"
    };

    Response::builder()
        .header(header::CONTENT_TYPE, content_type)
        .header(header::X_CONTENT_TYPE_OPTIONS, "nosniff")
        .header(
            header::CONTENT_DISPOSITION,
            format!("{disposition}; filename=\"{}\"", disposition_filename(&filename)),
        )
        .body(Body::from(data))
        .map_err(|e| AppError::Internal(e.into()))
}
