/// Per-pair maximum of `sqrt(food² · service)` on the 1..5 scale: `sqrt(5² · 5)`.
const MAX_PAIR_TERM_SQUARED: f64 = 125.0;

/// Upper end of the overall score scale.
const SCORE_SCALE: f64 = 10.0;

/// Combine paired food and service ratings into one 0..10 score.
///
/// Only the first `min(food.len(), service.len())` pairs count; any excess
/// tail is dropped. With no pairs the score is exactly `0.0`.
/// Each pair contributes `sqrt(food² · service)`, so food weighs in
/// quadratically and service linearly. The mean contribution is normalized
/// by `sqrt(125)` and scaled to 10, then rounded half-to-even at 3 decimals.
pub fn calculate_overall_score(food_scores: &[u32], service_scores: &[u32]) -> f64 {
    let n = food_scores.len().min(service_scores.len());
    if n == 0 {
        return 0.0;
    }

    let total: f64 = food_scores
        .iter()
        .zip(service_scores)
        .map(|(&food, &service)| {
            let food = f64::from(food);
            (food * food * f64::from(service)).sqrt()
        })
        .sum();

    let score = total * (1.0 / (n as f64 * MAX_PAIR_TERM_SQUARED.sqrt())) * SCORE_SCALE;
    round_to_millis(score)
}

fn round_to_millis(value: f64) -> f64 {
    (value * 1000.0).round_ties_even() / 1000.0
}
