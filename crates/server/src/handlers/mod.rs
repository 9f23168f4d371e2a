//! # API Route Handlers
//!
//! This module organizes all the Axum route handlers for the `rpa-ai-server`.
//! The handlers are split into logical sub-modules: general endpoints, session
//! management and the pages themselves.

pub mod general;
pub mod page_handlers;
pub mod session_handlers;

pub use general::*;
pub use page_handlers::*;
pub use session_handlers::*;

// Shared items used by multiple handler modules.
use super::{
    errors::AppError,
    state::AppState,
    types::{ApiResponse, DebugParams},
};
use axum::{extract::Query, Json};
use rpa_ai::{session::SharedSession, TaskKind};
use serde_json::Value;
use uuid::Uuid;

/// A shared helper function to wrap a successful result in the standard `ApiResponse`
/// format, optionally including debug information if requested.
pub(crate) fn wrap_response<T>(
    result: T,
    debug_params: Query<DebugParams>,
    debug_info: Option<Value>,
) -> Json<ApiResponse<T>> {
    let debug = if debug_params.debug.unwrap_or(false) {
        debug_info
    } else {
        None
    };
    Json(ApiResponse { debug, result })
}

fn session_not_found(session_id: &str) -> AppError {
    AppError::NotFound(format!("Session '{session_id}' not found"))
}

/// Parses a session id from the path. Anything that is not a UUID cannot name a session.
pub(crate) fn parse_session_id(session_id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(session_id).map_err(|_| session_not_found(session_id))
}

/// Looks up a live session by the id taken from the path.
pub(crate) async fn find_session(
    app_state: &AppState,
    session_id: &str,
) -> Result<SharedSession, AppError> {
    let id = parse_session_id(session_id)?;
    app_state
        .sessions
        .get(&id)
        .await
        .ok_or_else(|| session_not_found(session_id))
}

pub(crate) fn parse_task(task: &str) -> Result<TaskKind, AppError> {
    task.parse()
        .map_err(|_| AppError::NotFound(format!("Task '{task}' not found")))
}
