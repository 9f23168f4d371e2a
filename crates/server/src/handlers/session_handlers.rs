use super::{find_session, parse_session_id, session_not_found, AppError, AppState};
use crate::types::{CredentialRequest, SessionCreated};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use tracing::info;

/// Creates an empty session and returns its id.
pub async fn create_session_handler(
    State(app_state): State<AppState>,
) -> (StatusCode, Json<SessionCreated>) {
    let session_id = app_state.sessions.create().await;
    info!(%session_id, "Created session");
    (StatusCode::CREATED, Json(SessionCreated { session_id }))
}

/// Ends a session. Its history and credential are dropped with it.
pub async fn delete_session_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_session_id(&session_id)?;
    if !app_state.sessions.remove(&id).await {
        return Err(session_not_found(&session_id));
    }
    info!(%session_id, "Deleted session");
    Ok(StatusCode::NO_CONTENT)
}

/// Stores the API key of a session. A blank key clears it.
pub async fn set_credential_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<CredentialRequest>, JsonRejection>,
) -> Result<StatusCode, AppError> {
    let session = find_session(&app_state, &session_id).await?;
    let Json(payload) = payload.map_err(|e| AppError::BadRequest(e.body_text()))?;

    let mut session = session.lock().await;
    session.set_credential(&payload.api_key);
    info!(
        %session_id,
        has_credential = session.credential().is_some(),
        "Updated session credential"
    );
    Ok(StatusCode::NO_CONTENT)
}
