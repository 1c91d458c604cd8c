use serde::{Deserialize, Serialize};

use super::http::{build_client, send_json};
use super::types::LlmClient;
use crate::pipeline::ScoringError;

/// Ollama HTTP client for local LLM inference.
pub struct OllamaClient {
    base_url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
    temperature: f32,
}

impl OllamaClient {
    /// Create a new OllamaClient pointing at an Ollama instance.
    pub fn new(base_url: &str, timeout_secs: u64, temperature: f32) -> Result<Self, ScoringError> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: build_client(timeout_secs)?,
            timeout_secs,
            temperature,
        })
    }

    /// Default Ollama instance at localhost:11434, deterministic sampling.
    pub fn default_local() -> Result<Self, ScoringError> {
        Self::new("http://localhost:11434", 120, 0.0)
    }
}

/// Request body for Ollama /api/generate
#[derive(Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
    /// Constrains the reply to a JSON document.
    format: &'a str,
    options: OllamaOptions,
}

#[derive(Serialize)]
struct OllamaOptions {
    temperature: f32,
}

/// Response body from Ollama /api/generate
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl LlmClient for OllamaClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, ScoringError> {
        let url = format!("{}/api/generate", self.base_url);
        let body = OllamaGenerateRequest {
            model,
            prompt,
            system,
            stream: false,
            format: "json",
            options: OllamaOptions {
                temperature: self.temperature,
            },
        };

        let parsed: OllamaGenerateResponse = send_json(
            self.client.post(&url),
            &body,
            &self.base_url,
            self.timeout_secs,
        )?;

        Ok(parsed.response)
    }
}
