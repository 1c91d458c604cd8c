pub mod config;
pub mod pipeline;

pub use pipeline::rating::{LlmReviewRater, RatingLists, ReviewRater};
pub use pipeline::{ErrorKind, ScoreReport, ScoringError, ScoringPipeline};

use tracing_subscriber::EnvFilter;

/// Install the global subscriber. Logs go to stderr; stdout carries results.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Build a pipeline from resolved configuration.
pub fn build_pipeline(config: &config::AppConfig) -> Result<ScoringPipeline, ScoringError> {
    let rater = LlmReviewRater::from_config(&config.rater)?;
    tracing::info!(
        provider = %config.rater.provider,
        model = %rater.model_name(),
        corpus = %config.corpus_path.display(),
        "Pipeline configured"
    );
    Ok(ScoringPipeline::new(
        pipeline::ReviewStore::new(&config.corpus_path),
        Box::new(rater),
    ))
}
