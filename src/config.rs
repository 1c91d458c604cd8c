use std::path::PathBuf;
use std::str::FromStr;

use crate::pipeline::ScoringError;

/// Application-level constants
pub const APP_NAME: &str = "restaurant-rating";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Corpus file used when `RESTAURANT_CORPUS` is unset.
pub const DEFAULT_CORPUS_PATH: &str = "restaurantes.txt";

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
pub const DEFAULT_OLLAMA_MODEL: &str = "llama3.1";
pub const DEFAULT_OPENAI_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Log filter used when `RUST_LOG` is unset.
pub fn default_log_filter() -> &'static str {
    "restaurant_rating=info,warn"
}

/// Which LLM backend rates the reviews.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RaterProvider {
    /// Local Ollama server.
    #[default]
    Ollama,
    /// OpenAI-compatible chat completions API.
    OpenAi,
}

impl RaterProvider {
    pub fn default_base_url(self) -> &'static str {
        match self {
            Self::Ollama => DEFAULT_OLLAMA_URL,
            Self::OpenAi => DEFAULT_OPENAI_URL,
        }
    }

    pub fn default_model(self) -> &'static str {
        match self {
            Self::Ollama => DEFAULT_OLLAMA_MODEL,
            Self::OpenAi => DEFAULT_OPENAI_MODEL,
        }
    }
}

impl FromStr for RaterProvider {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAi),
            other => Err(ScoringError::Configuration(format!(
                "unknown rating provider '{other}' (expected 'ollama' or 'openai')"
            ))),
        }
    }
}

impl std::fmt::Display for RaterProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ollama => write!(f, "ollama"),
            Self::OpenAi => write!(f, "openai"),
        }
    }
}

/// Everything the rating adapter needs, handed over at construction.
#[derive(Clone)]
pub struct RaterConfig {
    pub provider: RaterProvider,
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for RaterConfig {
    fn default() -> Self {
        Self::for_provider(RaterProvider::default())
    }
}

// Hand-written so the API key never reaches logs.
impl std::fmt::Debug for RaterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaterConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl RaterConfig {
    /// Provider defaults with deterministic sampling and no credentials.
    pub fn for_provider(provider: RaterProvider) -> Self {
        Self {
            provider,
            base_url: provider.default_base_url().to_string(),
            model: provider.default_model().to_string(),
            api_key: None,
            temperature: 0.0,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read from the process environment.
    pub fn from_env() -> Result<Self, ScoringError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve from any key lookup. Unset or blank keys fall back to defaults.
    ///
    /// Keys: `RATER_PROVIDER`, `RATER_BASE_URL`, `RATER_MODEL`,
    /// `RATER_TIMEOUT_SECS`, `OPENAI_API_KEY`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScoringError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let provider = match get("RATER_PROVIDER") {
            Some(raw) => raw.parse()?,
            None => RaterProvider::default(),
        };
        let mut config = Self::for_provider(provider);

        if let Some(url) = get("RATER_BASE_URL") {
            config.base_url = url;
        }
        if let Some(model) = get("RATER_MODEL") {
            config.model = model;
        }
        if let Some(raw) = get("RATER_TIMEOUT_SECS") {
            config.timeout_secs = raw.trim().parse().map_err(|_| {
                ScoringError::Configuration(format!("RATER_TIMEOUT_SECS is not a number: {raw}"))
            })?;
        }
        config.api_key = get("OPENAI_API_KEY");

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.provider == RaterProvider::OpenAi && self.api_key.is_none() {
            return Err(ScoringError::Configuration(
                "OPENAI_API_KEY is required when RATER_PROVIDER=openai".into(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ScoringError::Configuration("model name is empty".into()));
        }
        Ok(())
    }
}

/// Full runtime configuration for one scoring run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub corpus_path: PathBuf,
    pub rater: RaterConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ScoringError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// `RESTAURANT_CORPUS` plus everything [`RaterConfig::from_lookup`] reads.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ScoringError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let corpus_path = lookup("RESTAURANT_CORPUS")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CORPUS_PATH));
        Ok(Self {
            corpus_path,
            rater: RaterConfig::from_lookup(lookup)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::pipeline::ErrorKind;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_local_ollama() {
        let config = RaterConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.provider, RaterProvider::Ollama);
        assert_eq!(config.base_url, DEFAULT_OLLAMA_URL);
        assert_eq!(config.model, DEFAULT_OLLAMA_MODEL);
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn openai_provider_uses_openai_defaults() {
        let config = RaterConfig::from_lookup(lookup(&[
            ("RATER_PROVIDER", "OpenAI"),
            ("OPENAI_API_KEY", "sk-test"),
        ]))
        .unwrap();
        assert_eq!(config.provider, RaterProvider::OpenAi);
        assert_eq!(config.base_url, DEFAULT_OPENAI_URL);
        assert_eq!(config.model, DEFAULT_OPENAI_MODEL);
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn openai_without_key_is_rejected() {
        let err = RaterConfig::from_lookup(lookup(&[("RATER_PROVIDER", "openai")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn overrides_apply() {
        let config = RaterConfig::from_lookup(lookup(&[
            ("RATER_BASE_URL", "http://gpu-box:11434"),
            ("RATER_MODEL", "qwen2.5:7b"),
            ("RATER_TIMEOUT_SECS", " 30 "),
        ]))
        .unwrap();
        assert_eq!(config.base_url, "http://gpu-box:11434");
        assert_eq!(config.model, "qwen2.5:7b");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn blank_values_fall_back_to_defaults() {
        let config =
            RaterConfig::from_lookup(lookup(&[("RATER_MODEL", "  "), ("RATER_PROVIDER", "")]))
                .unwrap();
        assert_eq!(config.provider, RaterProvider::Ollama);
        assert_eq!(config.model, DEFAULT_OLLAMA_MODEL);
    }

    #[test]
    fn unknown_provider_is_rejected() {
        let err = RaterConfig::from_lookup(lookup(&[("RATER_PROVIDER", "gemini")])).unwrap_err();
        assert!(err.to_string().contains("gemini"));
    }

    #[test]
    fn bad_timeout_is_rejected() {
        let err =
            RaterConfig::from_lookup(lookup(&[("RATER_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = RaterConfig {
            api_key: Some("sk-secret".into()),
            ..RaterConfig::for_provider(RaterProvider::OpenAi)
        };
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn corpus_path_defaults_and_overrides() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.corpus_path, PathBuf::from(DEFAULT_CORPUS_PATH));

        let config =
            AppConfig::from_lookup(lookup(&[("RESTAURANT_CORPUS", "/data/reviews.txt")])).unwrap();
        assert_eq!(config.corpus_path, PathBuf::from("/data/reviews.txt"));
    }

    #[test]
    fn app_name_is_crate_name() {
        assert_eq!(APP_NAME, "restaurant-rating");
    }
}
