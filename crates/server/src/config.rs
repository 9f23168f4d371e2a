//! # Application Configuration
//!
//! This module defines the configuration structure for `rpa-ai-server` and the
//! logic for loading it from `config.yml`, an optional `prompt.yml` and
//! environment variables.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use rpa_ai::{constants, TaskKind};
use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::fs;
use std::sync::LazyLock;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
    NotFound(String),
    /// Indicates a value that loaded fine but is not usable.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
            ConfigError::Invalid(msg) => write!(f, "Invalid configuration: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// The completion endpoint shared by all pages.
    #[serde(default)]
    pub completion: CompletionConfig,
    /// Per-task overrides, keyed by task id (e.g. `news_translation`).
    #[serde(default)]
    pub tasks: HashMap<String, TaskConfig>,
}

fn default_port() -> u16 {
    8501
}

fn default_api_url() -> String {
    constants::DEFAULT_API_URL.to_string()
}

fn default_model_name() -> String {
    constants::DEFAULT_MODEL.to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct CompletionConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model_name")]
    pub model_name: String,
    #[serde(default)]
    pub streaming: bool,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            model_name: default_model_name(),
            streaming: false,
        }
    }
}

/// Overrides for a single page. Anything left out keeps the built-in value.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct TaskConfig {
    #[serde(default)]
    pub model_name: Option<String>,
    #[serde(default)]
    pub temperature: Option<f32>,
    #[serde(default)]
    pub streaming: Option<bool>,
    /// Replacement text for the task's user prompt.
    #[serde(default)]
    pub prompt: Option<String>,
}

impl AppConfig {
    /// Returns the override block of `task`, if any.
    pub fn task(&self, task: TaskKind) -> Option<&TaskConfig> {
        self.tasks.get(task.id())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, task_config) in &self.tasks {
            name.parse::<TaskKind>()
                .map_err(|e| ConfigError::Invalid(e.to_string()))?;
            if let Some(t) = task_config.temperature {
                if !(0.0..=1.0).contains(&t) {
                    return Err(ConfigError::Invalid(format!(
                        "temperature for task '{name}' must be between 0 and 1, got {t}"
                    )));
                }
            }
        }
        Ok(())
    }
}

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}").expect("env var regex is valid")
});

// Reads a file and substitutes `${VAR}` references with environment values.
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let expanded_content = ENV_VAR.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from files and environment variables.
///
/// - Built-in defaults apply when no file is present.
/// - `config.yml` (or the explicit override path, which must exist) comes next.
/// - `prompt.yml` next to the crate manifest may replace task prompts.
/// - `PORT` overrides the port; nested keys are overridden by `RPA_...` variables
///   (e.g., `RPA_COMPLETION__MODEL_NAME`).
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder();

    let main_content = match config_path_override {
        Some(path) => Some(read_and_substitute(path)?.ok_or_else(|| {
            ConfigError::NotFound(format!("Config file not found at '{path}'."))
        })?),
        None => {
            let user_config_path = format!("{base_path}/config.yml");
            let content = read_and_substitute(&user_config_path)?;
            if content.is_some() {
                info!("Loading configuration from '{user_config_path}'.");
            } else {
                info!("'{user_config_path}' not found. Using built-in defaults.");
            }
            content
        }
    };
    if let Some(content) = main_content {
        builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
    }

    let user_prompt_path = format!("{base_path}/prompt.yml");
    if let Some(user_prompts_content) = read_and_substitute(&user_prompt_path)? {
        info!("Loading user prompt overrides from '{user_prompt_path}'.");
        builder = builder.add_source(File::from_str(&user_prompts_content, FileFormat::Yaml));
    }

    let mut settings = builder
        .add_source(
            Environment::with_prefix("RPA")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        );

    if let Ok(port) = env::var("PORT") {
        settings = settings.set_override("port", port)?;
    }

    let config: AppConfig = settings.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}
