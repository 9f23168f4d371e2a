use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use rpa_ai::PromptError;
use serde_json::json;
use tracing::{error, warn};

/// A custom error type for the server application.
///
/// Page-level problems (missing fields, failed completions) are not errors here:
/// they are notices inside a successful page. `AppError` covers what prevents a
/// page from being rendered at all.
pub enum AppError {
    /// Errors originating from `rpa-ai`.
    Prompt(PromptError),
    /// An unknown session or task.
    NotFound(String),
    /// A request body the server could not make sense of.
    BadRequest(String),
    /// Generic internal server errors.
    Internal(anyhow::Error),
}

impl From<PromptError> for AppError {
    fn from(err: PromptError) -> Self {
        AppError::Prompt(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            AppError::Prompt(err) => {
                error!("PromptError: {:?}", err);
                match err {
                    PromptError::MissingAiProvider | PromptError::ReqwestClientBuild(_) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "Server is not configured correctly.".to_string(),
                    ),
                    PromptError::MissingTemplateVariable(name) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Prompt template is missing a value for '{name}'"),
                    ),
                    PromptError::JsonSerialization(e) => (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to read session state: {e}"),
                    ),
                    other => (StatusCode::BAD_GATEWAY, other.to_string()),
                }
            }
            AppError::NotFound(msg) => {
                warn!("Not found: {msg}");
                (StatusCode::NOT_FOUND, msg)
            }
            AppError::BadRequest(msg) => {
                warn!("Bad request: {msg}");
                (StatusCode::BAD_REQUEST, msg)
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status_code, body).into_response()
    }
}
