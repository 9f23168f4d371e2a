//! # Page Handlers
//!
//! Every page interaction is a render: a `GET` re-renders what the session holds,
//! a `POST` renders with a submission. Warnings and failed completions come back
//! as notices inside a `200` response.

use super::{
    find_session, parse_task, wrap_response, ApiResponse, AppError, AppState, DebugParams,
};
use crate::types::SubmitRequest;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    Json,
};
use axum_extra::extract::{multipart::MultipartRejection, Multipart};
use rpa_ai::{tasks::TaskInput, RenderedPage, SessionStore, Submission, TaskKind};
use serde_json::{json, Value};
use tracing::info;

type PageResponse = Json<ApiResponse<RenderedPage>>;

/// Renders a page without a submission.
pub async fn render_page_handler(
    State(app_state): State<AppState>,
    Path((session_id, task)): Path<(String, String)>,
    debug_params: Query<DebugParams>,
) -> Result<PageResponse, AppError> {
    let session = find_session(&app_state, &session_id).await?;
    let task = parse_task(&task)?;

    let mut session = session.lock().await;
    let page = app_state.controller.render(&mut session, task, None).await?;
    let debug_info = debug_info(&app_state, &session, task);
    Ok(wrap_response(page, debug_params, debug_info))
}

/// Renders a page with the submitted form fields.
pub async fn submit_page_handler(
    State(app_state): State<AppState>,
    Path((session_id, task)): Path<(String, String)>,
    debug_params: Query<DebugParams>,
    payload: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<PageResponse, AppError> {
    let session = find_session(&app_state, &session_id).await?;
    let task = parse_task(&task)?;
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    info!(%session_id, %task, fields = payload.fields.len(), "Page submitted");

    let mut session = session.lock().await;
    if let Some(api_key) = &payload.api_key {
        session.set_credential(api_key);
    }
    let submission = Submission::from_fields(payload.fields);
    let page = app_state
        .controller
        .render(&mut session, task, Some(submission))
        .await?;
    let debug_info = debug_info(&app_state, &session, task);
    Ok(wrap_response(page, debug_params, debug_info))
}

/// Renders a document page with an uploaded file.
///
/// Accepts the parts `file` (the document) and `api_key` (optional). A file part
/// with no bytes counts as no upload.
pub async fn upload_document_handler(
    State(app_state): State<AppState>,
    Path((session_id, task)): Path<(String, String)>,
    debug_params: Query<DebugParams>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<PageResponse, AppError> {
    let session = find_session(&app_state, &session_id).await?;
    let task = parse_task(&task)?;
    if !matches!(task.spec().input, TaskInput::Document { .. }) {
        return Err(AppError::BadRequest(format!(
            "Task '{task}' does not accept document uploads"
        )));
    }
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.to_string()))?;

    let mut document: Option<Vec<u8>> = None;
    let mut api_key: Option<String> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field.file_name().unwrap_or("uploaded_file.pdf").to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                info!(%session_id, %file_name, bytes = bytes.len(), "Document uploaded");
                document = (!bytes.is_empty()).then(|| bytes.to_vec());
            }
            "api_key" => {
                api_key = Some(
                    field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(e.to_string()))?,
                );
            }
            _ => {}
        }
    }

    let mut session = session.lock().await;
    if let Some(api_key) = &api_key {
        session.set_credential(api_key);
    }
    let submission = match document {
        Some(data) => Submission::from_document(data),
        None => Submission::default(),
    };
    let page = app_state
        .controller
        .render(&mut session, task, Some(submission))
        .await?;
    let debug_info = debug_info(&app_state, &session, task);
    Ok(wrap_response(page, debug_params, debug_info))
}

fn debug_info(app_state: &AppState, session: &SessionStore, task: TaskKind) -> Option<Value> {
    let profile = app_state.controller.profile(task);
    Some(json!({
        "active_task": session.active_task(),
        "model": profile.settings.model,
        "temperature": profile.settings.temperature,
        "streaming": profile.settings.streaming,
        "has_credential": session.credential().is_some(),
    }))
}
