//! # Prompt Template Registry
//!
//! Every task owns exactly one [`PromptTemplate`]: an ordered list of role-tagged
//! messages whose text may contain `{placeholder}`s.

pub mod tasks;

use crate::{
    errors::PromptError,
    template,
    types::{ChatMessage, Role},
};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    messages: Vec<(Role, String)>,
}

impl PromptTemplate {
    /// A template consisting of a single user message.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            messages: vec![(Role::User, text.into())],
        }
    }

    /// A template with a system message followed by a user message.
    pub fn chat(system: impl Into<String>, user: impl Into<String>) -> Self {
        Self {
            messages: vec![(Role::System, system.into()), (Role::User, user.into())],
        }
    }

    pub fn messages(&self) -> &[(Role, String)] {
        &self.messages
    }

    /// Replaces the text of the last user message, keeping any system message.
    pub fn with_user_prompt(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        match self
            .messages
            .iter_mut()
            .rev()
            .find(|(role, _)| *role == Role::User)
        {
            Some((_, existing)) => *existing = text,
            None => self.messages.push((Role::User, text)),
        }
        self
    }

    /// Placeholder names across all messages, in order of first appearance.
    pub fn placeholders(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for (_, text) in &self.messages {
            for name in template::placeholders(text) {
                if !names.contains(&name) {
                    names.push(name);
                }
            }
        }
        names
    }

    /// Fills every message and returns them ready for a completion request.
    pub fn render(
        &self,
        values: &HashMap<String, String>,
    ) -> Result<Vec<ChatMessage>, PromptError> {
        self.messages
            .iter()
            .map(|(role, text)| Ok(ChatMessage::new(*role, template::fill(text, values)?)))
            .collect()
    }
}
