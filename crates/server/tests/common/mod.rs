//! # Common Test Utilities
//!
//! `TestApp` spawns a real server on a random port, configured against an
//! `httpmock::MockServer` standing in for the OpenAI-compatible endpoint, and
//! offers small helpers for the session and page routes.

// Not every test file uses every helper.
#![allow(unused)]

use anyhow::Result;
use axum::serve;
use httpmock::{Method::POST, Mock, MockServer};
use reqwest::{Client, Response};
use rpa_ai_server::{
    config, router,
    state::{build_app_state, AppState},
};
use serde_json::{json, Value};
use std::{fs::File, io::Write, net::SocketAddr};
use tempfile::{tempdir, TempDir};
use tokio::{net::TcpListener, task::JoinHandle};

pub const COMPLETIONS_PATH: &str = "/v1/chat/completions";

/// A harness for end-to-end testing of the Axum server.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub mock_server: MockServer,
    pub app_state: AppState,
    _config_dir: TempDir,
    _server_handle: JoinHandle<()>,
    shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestApp {
    /// Spawns the server with the default configuration.
    pub async fn spawn() -> Result<Self> {
        Self::spawn_with_tasks("").await
    }

    /// Spawns the server with `tasks_yaml` appended to the generated config.
    /// It must be a complete `tasks:` block or empty.
    pub async fn spawn_with_tasks(tasks_yaml: &str) -> Result<Self> {
        dotenvy::dotenv().ok();
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .compact()
            .try_init();

        let mock_server = MockServer::start();
        let config_dir = tempdir()?;
        let config_path = config_dir.path().join("config.yml");
        let config_content = format!(
            r#"
port: 0
completion:
  api_url: "{}"
  model_name: "mock-chat-model"
{tasks_yaml}
"#,
            mock_server.url(COMPLETIONS_PATH),
        );
        let mut file = File::create(&config_path)?;
        file.write_all(config_content.as_bytes())?;

        let config_path = config_path
            .to_str()
            .ok_or_else(|| anyhow::anyhow!("temp path is not valid UTF-8"))?;
        let config = config::get_config(Some(config_path))?;
        let app_state = build_app_state(config).await?;

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = listener.local_addr()?;
        let address = format!("http://{addr}");

        let app_state_for_harness = app_state.clone();
        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
        let server_handle = tokio::spawn(async move {
            let app = router::create_router(app_state);
            let server = serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(e) = server.await {
                tracing::error!("[TestApp] Server error: {}", e);
            }
        });

        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Ok(Self {
            address,
            client: Client::new(),
            mock_server,
            app_state: app_state_for_harness,
            _config_dir: config_dir,
            _server_handle: server_handle,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.address)
    }

    /// Programs a completion answer for requests whose body contains `needle`.
    pub fn mock_completion(&self, needle: &str, content: &str) -> Mock<'_> {
        let needle = needle.to_string();
        self.mock_server.mock(|when, then| {
            when.method(POST)
                .path(COMPLETIONS_PATH)
                .body_contains(&needle);
            then.status(200).json_body(json!({
                "choices": [{ "message": { "role": "assistant", "content": content } }]
            }));
        })
    }

    pub async fn create_session(&self) -> Result<String> {
        let body: Value = self
            .client
            .post(self.url("/sessions"))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        body["session_id"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| anyhow::anyhow!("no session_id in {body}"))
    }

    pub async fn set_credential(&self, session_id: &str, api_key: &str) -> Result<Response> {
        Ok(self
            .client
            .put(self.url(&format!("/sessions/{session_id}/credential")))
            .json(&json!({ "api_key": api_key }))
            .send()
            .await?)
    }

    /// Creates a session that already holds `api_key`.
    pub async fn session_with_credential(&self, api_key: &str) -> Result<String> {
        let session_id = self.create_session().await?;
        self.set_credential(&session_id, api_key)
            .await?
            .error_for_status()?;
        Ok(session_id)
    }

    pub async fn get_page(&self, session_id: &str, task: &str) -> Result<Response> {
        Ok(self
            .client
            .get(self.url(&format!("/sessions/{session_id}/tasks/{task}")))
            .send()
            .await?)
    }

    pub async fn submit(&self, session_id: &str, task: &str, body: Value) -> Result<Response> {
        Ok(self
            .client
            .post(self.url(&format!("/sessions/{session_id}/tasks/{task}")))
            .json(&body)
            .send()
            .await?)
    }

    /// Submits and returns the rendered page (the `result` of the response).
    pub async fn submit_page(&self, session_id: &str, task: &str, body: Value) -> Result<Value> {
        let response = self.submit(session_id, task, body).await?.error_for_status()?;
        let body: Value = response.json().await?;
        Ok(body["result"].clone())
    }

    pub async fn render_page(&self, session_id: &str, task: &str) -> Result<Value> {
        let response = self.get_page(session_id, task).await?.error_for_status()?;
        let body: Value = response.json().await?;
        Ok(body["result"].clone())
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// The history strings of a rendered page.
pub fn history(page: &Value) -> Vec<String> {
    page["history"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// The `(level, message)` pairs of a rendered page's notices.
pub fn notices(page: &Value) -> Vec<(String, String)> {
    page["notices"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|n| {
                    (
                        n["level"].as_str().unwrap_or_default().to_string(),
                        n["message"].as_str().unwrap_or_default().to_string(),
                    )
                })
                .collect()
        })
        .unwrap_or_default()
}
