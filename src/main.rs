//! Command-line entry point: one question in, one `{ "<name>": <score> }` out.

use std::process::ExitCode;

use clap::Parser;
use restaurant_rating::config::{self, AppConfig};
use restaurant_rating::pipeline::require_query;
use restaurant_rating::{build_pipeline, ErrorKind, ScoringError};

/// Score a restaurant from its customer reviews.
///
/// Examples:
///   restaurant-rating "Qual a média do Cantina Bella?"
///   restaurant-rating --provider openai "Qual a nota do Sabor Caseiro?"
#[derive(Parser, Debug)]
#[command(name = "restaurant-rating")]
#[command(version)]
#[command(about, long_about = None)]
struct Cli {
    /// Question naming the restaurant
    query: Option<String>,

    /// Review corpus file (overrides RESTAURANT_CORPUS)
    #[arg(long, value_name = "FILE")]
    corpus: Option<String>,

    /// Rating provider: ollama or openai (overrides RATER_PROVIDER)
    #[arg(long)]
    provider: Option<String>,

    /// Model name (overrides RATER_MODEL)
    #[arg(long)]
    model: Option<String>,

    /// Provider base URL (overrides RATER_BASE_URL)
    #[arg(long)]
    base_url: Option<String>,
}

impl Cli {
    /// Flags first, then the environment.
    fn lookup(&self, key: &str) -> Option<String> {
        let flag = match key {
            "RESTAURANT_CORPUS" => self.corpus.as_ref(),
            "RATER_PROVIDER" => self.provider.as_ref(),
            "RATER_MODEL" => self.model.as_ref(),
            "RATER_BASE_URL" => self.base_url.as_ref(),
            _ => None,
        };
        flag.cloned().or_else(|| std::env::var(key).ok())
    }
}

fn run(cli: Cli) -> Result<String, ScoringError> {
    let query = require_query(cli.query.clone())?;
    let config = AppConfig::from_lookup(|key| cli.lookup(key))?;
    let pipeline = build_pipeline(&config)?;
    let report = pipeline.run(&query)?;
    report.to_json()
}

fn main() -> ExitCode {
    restaurant_rating::init_tracing();
    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);

    match run(Cli::parse()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            match e.kind() {
                ErrorKind::MissingQuery => ExitCode::from(2),
                _ => ExitCode::FAILURE,
            }
        }
    }
}
