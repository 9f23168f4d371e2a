//! # RPA with AI
//!
//! The core of a set of single-purpose pages (mail correction, official-document
//! correction, news translation, prompt improvement, document analysis and a plain
//! chat). Each page fills a fixed prompt template with the user's input, sends it to
//! an OpenAI-compatible completion endpoint and keeps the returned text in a
//! per-session history.

pub mod constants;
pub mod controller;
pub mod errors;
pub mod loader;
pub mod prompts;
pub mod providers;
pub mod session;
pub mod tasks;
pub mod template;
pub mod types;

pub use controller::{
    Notice, PageController, PageControllerBuilder, RenderedPage, Submission, TaskProfile,
};
pub use errors::{LoaderError, PageError, PromptError};
pub use session::{SessionRegistry, SessionStore};
pub use tasks::TaskKind;
