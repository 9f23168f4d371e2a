//! # Application State
//!
//! This module defines the shared application state (`AppState`) and the logic
//! for building it at startup: the completion client, the PDF loader, the page
//! controller with per-task overrides applied, and the session registry.

use crate::config::{AppConfig, TaskConfig};
use rpa_ai::{
    providers::ai::{openai::OpenAiProvider, AiProvider},
    tasks::TaskInput,
    types::CompletionSettings,
    PageController, PageControllerBuilder, SessionRegistry, TaskKind, TaskProfile,
};
use rpa_ai_pdf::PdfLoader;
use std::sync::Arc;
use tracing::info;

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Renders every page.
    pub controller: Arc<PageController>,
    /// All sessions created since startup.
    pub sessions: SessionRegistry,
}

/// Builds the shared application state from the configuration.
///
/// The configuration is consumed here. Only the resolved task profiles outlive startup.
pub async fn build_app_state(config: AppConfig) -> anyhow::Result<AppState> {
    let ai_provider = OpenAiProvider::new(config.completion.api_url.clone())?;
    build_app_state_with_provider(&config, Box::new(ai_provider))
}

/// Same as [`build_app_state`] but with a caller-supplied completion client.
pub fn build_app_state_with_provider(
    config: &AppConfig,
    ai_provider: Box<dyn AiProvider>,
) -> anyhow::Result<AppState> {
    let mut builder = PageControllerBuilder::new()
        .ai_provider(ai_provider)
        .document_loader(Box::new(PdfLoader::new()));

    for task in TaskKind::ALL {
        let profile = resolve_profile(config, task)?;
        info!(
            task = %task,
            model = %profile.settings.model,
            temperature = profile.settings.temperature,
            streaming = profile.settings.streaming,
            "Resolved task profile"
        );
        builder = builder.task_profile(task, profile);
    }

    Ok(AppState {
        controller: Arc::new(builder.build()?),
        sessions: SessionRegistry::new(),
    })
}

/// Merges the global completion settings and the task's own overrides onto the
/// built-in profile of `task`.
fn resolve_profile(config: &AppConfig, task: TaskKind) -> anyhow::Result<TaskProfile> {
    let spec = task.spec();
    let overrides = config.task(task).cloned().unwrap_or_default();
    let TaskConfig {
        model_name,
        temperature,
        streaming,
        prompt,
    } = overrides;

    let mut template = task.default_template();
    if let Some(prompt) = prompt {
        template = template.with_user_prompt(prompt);
        let mut known: Vec<&str> = spec.fields.iter().map(|f| f.name).collect();
        if let TaskInput::Document { placeholder } = spec.input {
            known.push(placeholder);
        }
        for name in template.placeholders() {
            if !known.contains(&name.as_str()) {
                anyhow::bail!(
                    "Prompt override for task '{task}' uses unknown placeholder '{{{name}}}'"
                );
            }
        }
    }

    Ok(TaskProfile {
        template,
        settings: CompletionSettings {
            model: model_name.unwrap_or_else(|| config.completion.model_name.clone()),
            temperature: temperature.unwrap_or(spec.temperature),
            streaming: streaming.unwrap_or(config.completion.streaming),
        },
    })
}
