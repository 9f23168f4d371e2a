pub mod openai;

use crate::{errors::PromptError, types::CompletionRequest};
use async_trait::async_trait;
use dyn_clone::DynClone;
use std::fmt::Debug;

/// A trait for interacting with a hosted language model.
///
/// Implementations receive fully rendered messages plus the model settings and the
/// user's credential, and return the completion text.
#[async_trait]
pub trait AiProvider: Send + Sync + Debug + DynClone {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, PromptError>;
}

dyn_clone::clone_trait_object!(AiProvider);
