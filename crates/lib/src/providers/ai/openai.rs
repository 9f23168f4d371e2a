use crate::{
    errors::PromptError,
    providers::ai::AiProvider,
    types::{ChatMessage, CompletionRequest},
};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use tracing::{debug, instrument};

// --- OpenAI-compatible request and response structures ---

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    stream: bool,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionResponse {
    choices: Vec<ChatCompletionChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionChoice {
    message: ChatCompletionMessage,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionChunk {
    choices: Vec<ChatCompletionChunkChoice>,
}

#[derive(Deserialize, Debug)]
struct ChatCompletionChunkChoice {
    #[serde(default)]
    delta: ChatCompletionDelta,
}

#[derive(Deserialize, Debug, Default)]
struct ChatCompletionDelta {
    #[serde(default)]
    content: Option<String>,
}

// --- Provider implementation ---

/// A provider for the OpenAI chat completions API or any compatible server.
#[derive(Clone, Debug)]
pub struct OpenAiProvider {
    client: ReqwestClient,
    api_url: String,
}

impl OpenAiProvider {
    /// Creates a new `OpenAiProvider` posting to `api_url`.
    pub fn new(api_url: impl Into<String>) -> Result<Self, PromptError> {
        let client = ReqwestClient::builder()
            .build()
            .map_err(PromptError::ReqwestClientBuild)?;
        Ok(Self {
            client,
            api_url: api_url.into(),
        })
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    #[instrument(skip_all, fields(model = %request.settings.model, stream = request.settings.streaming))]
    async fn complete(&self, request: &CompletionRequest) -> Result<String, PromptError> {
        let body = ChatCompletionRequest {
            model: &request.settings.model,
            messages: &request.messages,
            temperature: request.settings.temperature,
            stream: request.settings.streaming,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(request.credential.expose())
            .json(&body)
            .send()
            .await
            .map_err(PromptError::AiRequest)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(PromptError::AiApi(format!("{status}: {error_text}")));
        }

        let raw = response.text().await.map_err(PromptError::AiRequest)?;
        debug!(bytes = raw.len(), "Received completion response");

        if request.settings.streaming {
            parse_event_stream(&raw)
        } else {
            parse_completion(&raw)
        }
    }
}

/// Extracts the first choice's message content from a non-streaming response body.
pub fn parse_completion(body: &str) -> Result<String, PromptError> {
    let response: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| PromptError::AiDeserialization(e.to_string()))?;
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content.unwrap_or_default())
        .ok_or_else(|| PromptError::AiDeserialization("response contained no choices".to_string()))
}

/// Reassembles a server-sent-event body (`stream: true`) into the full completion text.
///
/// Only `data:` lines are considered; the stream ends at `data: [DONE]`.
pub fn parse_event_stream(body: &str) -> Result<String, PromptError> {
    let mut text = String::new();
    for line in body.lines() {
        let Some(data) = line.trim().strip_prefix("data:") else {
            continue;
        };
        let data = data.trim();
        if data == "[DONE]" {
            break;
        }
        if data.is_empty() {
            continue;
        }
        let chunk: ChatCompletionChunk = serde_json::from_str(data)
            .map_err(|e| PromptError::AiDeserialization(e.to_string()))?;
        if let Some(content) = chunk
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.delta.content)
        {
            text.push_str(&content);
        }
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_stream_is_concatenated_until_done() {
        let body = concat!(
            "data: {\"choices\":[{\"delta\":{\"role\":\"assistant\"}}]}\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"안녕\"}}]}\n\n",
            ": keep-alive\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\", 세계\"}}]}\n\n",
            "data: [DONE]\n\n",
            "data: {\"choices\":[{\"delta\":{\"content\":\"ignored\"}}]}\n\n",
        );
        assert_eq!(parse_event_stream(body).unwrap(), "안녕, 세계");
    }

    #[test]
    fn completion_without_choices_is_an_error() {
        let err = parse_completion(r#"{"choices": []}"#).unwrap_err();
        assert!(matches!(err, PromptError::AiDeserialization(_)));
    }
}
