use thiserror::Error;

/// Errors raised while preparing or executing a completion.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to build Reqwest client: {0}")]
    ReqwestClientBuild(reqwest::Error),
    #[error("Failed to send request to AI provider: {0}")]
    AiRequest(reqwest::Error),
    #[error("Failed to deserialize AI provider response: {0}")]
    AiDeserialization(String),
    #[error("AI provider returned an error: {0}")]
    AiApi(String),
    #[error("AI provider is missing")]
    MissingAiProvider,
    #[error("Prompt template references '{{{0}}}' but no value was supplied")]
    MissingTemplateVariable(String),
    #[error("Failed to serialize JSON: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

/// Errors raised by a [`crate::loader::DocumentLoader`].
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to parse document: {0}")]
    Parse(String),
    #[error("Document is empty")]
    Empty,
    #[error("No document loader is configured")]
    Unavailable,
}

/// The outcomes of a page submission that are shown to the user instead of a result.
///
/// Every variant ends up as a single notice on the rendered page and never escapes
/// the page controller.
#[derive(Error, Debug)]
pub enum PageError {
    #[error("credential is missing")]
    MissingCredential,
    #[error("required field '{0}' is blank")]
    MissingRequiredField(String),
    #[error("completion failed: {0}")]
    CompletionFailure(#[from] PromptError),
    #[error("document extraction failed: {0}")]
    DocumentExtractionFailure(#[from] LoaderError),
}
