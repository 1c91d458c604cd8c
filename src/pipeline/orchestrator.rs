use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use uuid::Uuid;

use super::query::extract_restaurant_name;
use super::rating::ReviewRater;
use super::reviews::ReviewStore;
use super::score::calculate_overall_score;
use super::ScoringError;

/// Where a scoring run is. Runs only move forward, one step at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    QueryReceived,
    NameExtracted,
    ReviewsFetched,
    RatingsObtained,
    ScoreComputed,
    Done,
}

impl PipelineStage {
    pub fn next(self) -> Option<Self> {
        match self {
            Self::QueryReceived => Some(Self::NameExtracted),
            Self::NameExtracted => Some(Self::ReviewsFetched),
            Self::ReviewsFetched => Some(Self::RatingsObtained),
            Self::RatingsObtained => Some(Self::ScoreComputed),
            Self::ScoreComputed => Some(Self::Done),
            Self::Done => None,
        }
    }
}

impl std::fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::QueryReceived => write!(f, "query_received"),
            Self::NameExtracted => write!(f, "name_extracted"),
            Self::ReviewsFetched => write!(f, "reviews_fetched"),
            Self::RatingsObtained => write!(f, "ratings_obtained"),
            Self::ScoreComputed => write!(f, "score_computed"),
            Self::Done => write!(f, "done"),
        }
    }
}

/// Final result of a run: one score keyed by the extracted name.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreReport {
    pub restaurant_name: String,
    pub overall_score: f64,
}

impl ScoreReport {
    /// The report as a one-line JSON object.
    pub fn to_json(&self) -> Result<String, ScoringError> {
        serde_json::to_string(self).map_err(|e| ScoringError::ReportEncoding(e.to_string()))
    }
}

/// Serializes as `{ "<restaurant_name>": <overall_score> }`.
impl Serialize for ScoreReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.restaurant_name, &self.overall_score)?;
        map.end()
    }
}

/// Reject an absent query before any stage runs.
pub fn require_query(query: Option<String>) -> Result<String, ScoringError> {
    query.ok_or(ScoringError::MissingQuery)
}

/// Orchestrates one scoring run:
/// query → name → reviews → ratings → score
pub struct ScoringPipeline {
    store: ReviewStore,
    rater: Box<dyn ReviewRater + Send + Sync>,
}

impl ScoringPipeline {
    pub fn new(store: ReviewStore, rater: Box<dyn ReviewRater + Send + Sync>) -> Self {
        Self { store, rater }
    }

    /// Score the restaurant named in `query`.
    ///
    /// An unmatched query or a restaurant with no reviews still reaches
    /// `Done` (the latter scores `0.0`). Corpus and rating-provider failures
    /// end the run with the error of the stage that failed.
    pub fn run(&self, query: &str) -> Result<ScoreReport, ScoringError> {
        let run_id = Uuid::new_v4();
        let _span = tracing::info_span!("score_restaurant", run_id = %run_id).entered();

        let mut stage = PipelineStage::QueryReceived;
        tracing::debug!(%stage, query_chars = query.chars().count(), "Pipeline started");

        let restaurant_name = extract_restaurant_name(query);
        advance(&mut stage);
        tracing::debug!(%stage, restaurant = %restaurant_name, "Restaurant name extracted");

        let reviews = self
            .store
            .fetch_reviews(&restaurant_name)
            .inspect_err(|e| tracing::warn!(%stage, error = %e, "Review retrieval failed"))?;
        advance(&mut stage);
        tracing::debug!(%stage, review_count = reviews.len(), "Reviews fetched");

        let ratings = self
            .rater
            .rate(&restaurant_name, &reviews)
            .inspect_err(|e| {
                tracing::warn!(
                    %stage,
                    error = %e,
                    retryable = e.is_retryable(),
                    "Rating request failed"
                )
            })?;
        advance(&mut stage);
        tracing::debug!(
            %stage,
            food_ratings = ratings.food_scores.len(),
            service_ratings = ratings.service_scores.len(),
            "Ratings obtained"
        );

        let overall_score = calculate_overall_score(&ratings.food_scores, &ratings.service_scores);
        advance(&mut stage);
        tracing::debug!(%stage, "Score computed");

        let report = ScoreReport {
            restaurant_name,
            overall_score,
        };
        advance(&mut stage);
        tracing::info!(
            %stage,
            restaurant = %report.restaurant_name,
            score = report.overall_score,
            "Restaurant scored"
        );

        Ok(report)
    }
}

fn advance(stage: &mut PipelineStage) {
    if let Some(next) = stage.next() {
        *stage = next;
    }
}
