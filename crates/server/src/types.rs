use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

#[derive(Debug, Deserialize, Default)]
pub struct DebugParams {
    pub debug: Option<bool>,
}

#[derive(Serialize, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<Value>,
    pub result: T,
}

/// The body of `POST /sessions/{id}/tasks/{task}`.
#[derive(Deserialize, Default)]
pub struct SubmitRequest {
    #[serde(default)]
    pub fields: HashMap<String, String>,
    /// Stored as the session credential before the page renders.
    #[serde(default)]
    pub api_key: Option<String>,
}

#[derive(Deserialize)]
pub struct CredentialRequest {
    #[serde(default)]
    pub api_key: String,
}

#[derive(Serialize, Deserialize)]
pub struct SessionCreated {
    pub session_id: uuid::Uuid,
}
