use std::sync::Mutex;

use super::ollama::OllamaClient;
use super::openai::OpenAiClient;
use super::parser::parse_rating_response;
use super::prompt::{build_rating_prompt, RATING_SYSTEM_PROMPT};
use super::types::{LlmClient, RatingLists, ReviewRater};
use crate::config::{RaterConfig, RaterProvider};
use crate::pipeline::ScoringError;

/// Rates reviews by prompting an LLM and parsing its JSON reply.
/// One request per call, no retries.
pub struct LlmReviewRater {
    llm: Box<dyn LlmClient + Send + Sync>,
    model_name: String,
}

impl LlmReviewRater {
    pub fn new(llm: Box<dyn LlmClient + Send + Sync>, model_name: &str) -> Self {
        Self {
            llm,
            model_name: model_name.to_string(),
        }
    }

    /// Build the rater for the configured provider.
    pub fn from_config(config: &RaterConfig) -> Result<Self, ScoringError> {
        let llm: Box<dyn LlmClient + Send + Sync> = match config.provider {
            RaterProvider::Ollama => Box::new(OllamaClient::new(
                &config.base_url,
                config.timeout_secs,
                config.temperature,
            )?),
            RaterProvider::OpenAi => {
                let api_key = config.api_key.as_deref().ok_or_else(|| {
                    ScoringError::Configuration("OPENAI_API_KEY is required for openai".into())
                })?;
                Box::new(OpenAiClient::new(
                    &config.base_url,
                    api_key,
                    config.timeout_secs,
                    config.temperature,
                )?)
            }
        };
        Ok(Self::new(llm, &config.model))
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }
}

impl ReviewRater for LlmReviewRater {
    fn rate(&self, restaurant_name: &str, reviews: &[String]) -> Result<RatingLists, ScoringError> {
        let prompt = build_rating_prompt(restaurant_name, reviews);
        tracing::debug!(
            model = %self.model_name,
            review_count = reviews.len(),
            prompt_chars = prompt.chars().count(),
            "Requesting ratings"
        );

        let response = self
            .llm
            .generate(&self.model_name, &prompt, RATING_SYSTEM_PROMPT)?;
        parse_rating_response(&response)
    }
}

/// Mock LLM client for testing: returns a configurable response and
/// remembers the last prompt it was given.
pub struct MockLlmClient {
    response: String,
    last_prompt: Mutex<Option<String>>,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().ok().and_then(|p| p.clone())
    }
}

impl LlmClient for MockLlmClient {
    fn generate(&self, _model: &str, prompt: &str, _system: &str) -> Result<String, ScoringError> {
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.to_string());
        }
        Ok(self.response.clone())
    }
}
