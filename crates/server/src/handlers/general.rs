//! # General Route Handlers
//!
//! The root, health check and the task catalogue.

use super::{wrap_response, ApiResponse, AppState, DebugParams};
use axum::{
    extract::{Query, State},
    Json,
};
use rpa_ai::{tasks::TaskSpec, TaskKind};
use serde_json::{json, Value};

/// The handler for the root (`/`) endpoint.
pub async fn root() -> &'static str {
    "rpa-ai server is running."
}

/// The handler for the health check (`/health`) endpoint.
pub async fn health_check() -> &'static str {
    "OK"
}

/// Lists every page with its fields and labels. With `?debug=true` the resolved
/// model settings of each task are included.
pub async fn list_tasks_handler(
    State(app_state): State<AppState>,
    debug_params: Query<DebugParams>,
) -> Json<ApiResponse<Vec<TaskSpec>>> {
    let specs: Vec<TaskSpec> = TaskKind::ALL.iter().map(|task| task.spec()).collect();

    let debug_info = if debug_params.debug.unwrap_or(false) {
        let settings: serde_json::Map<String, Value> = TaskKind::ALL
            .iter()
            .map(|task| {
                let profile = app_state.controller.profile(*task);
                (
                    task.id().to_string(),
                    json!({
                        "model": profile.settings.model,
                        "temperature": profile.settings.temperature,
                        "streaming": profile.settings.streaming,
                        "placeholders": profile.template.placeholders(),
                    }),
                )
            })
            .collect();
        Some(Value::Object(settings))
    } else {
        None
    };

    wrap_response(specs, debug_params, debug_info)
}
