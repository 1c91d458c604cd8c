use serde::{Deserialize, Serialize};

use crate::pipeline::ScoringError;

/// Food and service ratings produced from one restaurant's reviews.
///
/// Index `i` of each list is conceptually one observation, but the lists
/// may differ in length: adjectives outside the rating scale are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingLists {
    #[serde(alias = "foodScores")]
    pub food_scores: Vec<u32>,
    #[serde(
        rename = "customer_service_scores",
        alias = "service_scores",
        alias = "serviceScores"
    )]
    pub service_scores: Vec<u32>,
}

/// Turns a restaurant's reviews into rating lists (allows stubbing).
pub trait ReviewRater {
    fn rate(&self, restaurant_name: &str, reviews: &[String])
        -> Result<RatingLists, ScoringError>;
}

/// LLM client abstraction (allows mocking)
pub trait LlmClient {
    fn generate(&self, model: &str, prompt: &str, system: &str) -> Result<String, ScoringError>;
}
