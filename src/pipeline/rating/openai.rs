use serde::{Deserialize, Serialize};

use super::http::{build_client, send_json};
use super::types::LlmClient;
use crate::pipeline::ScoringError;

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct OpenAiClient {
    base_url: String,
    api_key: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
    temperature: f32,
}

impl OpenAiClient {
    pub fn new(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
        temperature: f32,
    ) -> Result<Self, ScoringError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            client: build_client(timeout_secs)?,
            timeout_secs,
            temperature,
        })
    }
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

impl LlmClient for OpenAiClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, ScoringError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatCompletionRequest {
            model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
        };

        let parsed: ChatCompletionResponse = send_json(
            self.client.post(&url).bearer_auth(&self.api_key),
            &body,
            &self.base_url,
            self.timeout_secs,
        )?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ScoringError::ResponseParsing("Completion has no message content".into()))
    }
}
