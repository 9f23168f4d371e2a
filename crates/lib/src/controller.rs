//! # Page Controller
//!
//! `render` is the whole body of a page. It runs on every interaction, with or
//! without a submission, and is a function of the session state and the new
//! submission only: rendering again without a submission changes nothing.
//!
//! Failures never escape a render. Missing input becomes a warning, a failed
//! completion or extraction becomes an error notice, and the history is left as it was.

use crate::{
    constants::{MISSING_CREDENTIAL_WARNING, MISSING_DOCUMENT_WARNING},
    errors::{LoaderError, PageError, PromptError},
    loader::DocumentLoader,
    prompts::PromptTemplate,
    providers::ai::AiProvider,
    session::{history_key, SessionStore},
    tasks::{TaskInput, TaskKind, TaskSpec},
    types::{CompletionRequest, CompletionSettings, Credential},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{error, info, instrument, warn};

/// The values submitted with one form post.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Submission {
    #[serde(default)]
    pub fields: HashMap<String, String>,
    #[serde(skip)]
    pub document: Option<Vec<u8>>,
}

impl Submission {
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            fields: fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            document: None,
        }
    }

    pub fn from_document(data: Vec<u8>) -> Self {
        Self {
            fields: HashMap::new(),
            document: Some(data),
        }
    }
}

/// A message shown above the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "level", content = "message", rename_all = "snake_case")]
pub enum Notice {
    Warning(String),
    Error(String),
}

/// What the page shows after one render.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedPage {
    pub task: TaskKind,
    pub subheader: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<&'static str>,
    pub notices: Vec<Notice>,
    pub history: Vec<String>,
}

/// The template and model settings a task runs with.
#[derive(Debug, Clone)]
pub struct TaskProfile {
    pub template: PromptTemplate,
    pub settings: CompletionSettings,
}

impl TaskProfile {
    fn builtin(task: TaskKind) -> Self {
        Self {
            template: task.default_template(),
            settings: task.spec().default_settings(),
        }
    }
}

#[derive(Debug)]
pub struct PageController {
    ai_provider: Box<dyn AiProvider>,
    document_loader: Option<Box<dyn DocumentLoader>>,
    profiles: HashMap<TaskKind, TaskProfile>,
}

impl PageController {
    pub fn profile(&self, task: TaskKind) -> &TaskProfile {
        &self.profiles[&task]
    }

    /// Renders `task` for `session`, processing `submission` when one was posted.
    ///
    /// The only errors returned are failures of the session store itself.
    #[instrument(skip(self, session, submission), fields(submitted = submission.is_some()))]
    pub async fn render(
        &self,
        session: &mut SessionStore,
        task: TaskKind,
        submission: Option<Submission>,
    ) -> Result<RenderedPage, PromptError> {
        let spec = task.spec();
        let mut notices = Vec::new();

        if session.check_page_change(task)? {
            session.reset_history(task)?;
        }
        session.get_or_init(&history_key(task), Vec::<String>::new())?;

        if session.credential().is_none() {
            notices.push(notice_for(&spec, PageError::MissingCredential));
        }

        if let Some(submission) = submission {
            let outcome = self.submit(session.credential(), &spec, submission).await;
            match outcome {
                Ok(text) => session.push_history(task, text)?,
                // Already reported by the warning above.
                Err(PageError::MissingCredential) => {}
                Err(err) => notices.push(notice_for(&spec, err)),
            }
        }

        Ok(RenderedPage {
            task,
            subheader: spec.subheader,
            description: spec.description,
            notices,
            history: session.history(task),
        })
    }

    async fn submit(
        &self,
        credential: Option<&Credential>,
        spec: &TaskSpec,
        submission: Submission,
    ) -> Result<String, PageError> {
        let credential = credential.ok_or(PageError::MissingCredential)?.clone();

        let mut values = HashMap::new();
        for field in &spec.fields {
            let value = submission
                .fields
                .get(field.name)
                .cloned()
                .unwrap_or_default();
            if field.required && value.trim().is_empty() {
                return Err(PageError::MissingRequiredField(field.name.to_string()));
            }
            values.insert(field.name.to_string(), value);
        }

        if let TaskInput::Document { placeholder } = spec.input {
            let data = submission
                .document
                .ok_or_else(|| PageError::MissingRequiredField(placeholder.to_string()))?;
            let loader = self
                .document_loader
                .as_deref()
                .ok_or(LoaderError::Unavailable)?;
            let text = loader.extract_text(&data)?;
            if text.trim().is_empty() {
                warn!(task = %spec.kind, "Uploaded document produced no text");
            }
            values.insert(placeholder.to_string(), text);
        }

        let profile = self.profile(spec.kind);
        let request = CompletionRequest {
            messages: profile.template.render(&values)?,
            settings: profile.settings.clone(),
            credential,
        };

        info!(task = %spec.kind, model = %request.settings.model, "Requesting completion");
        let text = self.ai_provider.complete(&request).await.map_err(|e| {
            error!(task = %spec.kind, "Completion failed: {e}");
            e
        })?;
        Ok(text)
    }
}

fn notice_for(spec: &TaskSpec, err: PageError) -> Notice {
    match err {
        // The document page asks for the file and the key together.
        PageError::MissingCredential => match spec.input {
            TaskInput::Document { .. } => Notice::Warning(MISSING_DOCUMENT_WARNING.to_string()),
            TaskInput::Form => Notice::Warning(MISSING_CREDENTIAL_WARNING.to_string()),
        },
        PageError::MissingRequiredField(name) => match spec.input {
            TaskInput::Document { .. } => Notice::Warning(MISSING_DOCUMENT_WARNING.to_string()),
            TaskInput::Form => {
                let label = spec
                    .fields
                    .iter()
                    .find(|f| f.name == name)
                    .map_or(name.as_str(), |f| f.label);
                Notice::Warning(format!("{label} 항목을 입력해주시기 바랍니다."))
            }
        },
        PageError::CompletionFailure(e) => Notice::Error(format!("{}: {e}", spec.error_label)),
        PageError::DocumentExtractionFailure(e) => {
            Notice::Error(format!("{}: {e}", spec.error_label))
        }
    }
}

/// A builder for [`PageController`].
#[derive(Default)]
pub struct PageControllerBuilder {
    ai_provider: Option<Box<dyn AiProvider>>,
    document_loader: Option<Box<dyn DocumentLoader>>,
    profiles: HashMap<TaskKind, TaskProfile>,
}

impl PageControllerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ai_provider(mut self, ai_provider: Box<dyn AiProvider>) -> Self {
        self.ai_provider = Some(ai_provider);
        self
    }

    pub fn document_loader(mut self, loader: Box<dyn DocumentLoader>) -> Self {
        self.document_loader = Some(loader);
        self
    }

    /// Overrides the template and settings of one task.
    pub fn task_profile(mut self, task: TaskKind, profile: TaskProfile) -> Self {
        self.profiles.insert(task, profile);
        self
    }

    pub fn build(self) -> Result<PageController, PromptError> {
        let ai_provider = self.ai_provider.ok_or(PromptError::MissingAiProvider)?;
        let mut profiles = self.profiles;
        for task in TaskKind::ALL {
            profiles
                .entry(task)
                .or_insert_with(|| TaskProfile::builtin(task));
        }
        Ok(PageController {
            ai_provider,
            document_loader: self.document_loader,
            profiles,
        })
    }
}
