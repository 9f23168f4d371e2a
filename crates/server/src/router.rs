use super::{handlers, state::AppState};
use axum::extract::DefaultBodyLimit;
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::trace::TraceLayer;

/// Creates the Axum router with all the application routes.
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route("/tasks", get(handlers::list_tasks_handler))
        .route("/sessions", post(handlers::create_session_handler))
        .route(
            "/sessions/{session_id}",
            delete(handlers::delete_session_handler),
        )
        .route(
            "/sessions/{session_id}/credential",
            put(handlers::set_credential_handler),
        )
        .route(
            "/sessions/{session_id}/tasks/{task}",
            get(handlers::render_page_handler).post(handlers::submit_page_handler),
        )
        .route(
            "/sessions/{session_id}/tasks/{task}/document",
            post(handlers::upload_document_handler)
                .layer(DefaultBodyLimit::max(10 * 1024 * 1024)),
        )
        .with_state(app_state)
        .layer(TraceLayer::new_for_http())
}
