use super::types::RatingLists;
use crate::pipeline::ScoringError;

/// Parse the provider's reply into rating lists.
///
/// Accepts a bare JSON object or one wrapped in a ```` ```json ```` fence.
/// Both lists are required and must hold non-negative integers; anything
/// else is an error rather than an empty result.
pub fn parse_rating_response(response: &str) -> Result<RatingLists, ScoringError> {
    let json_str = extract_json_block(response)?;
    let ratings: RatingLists =
        serde_json::from_str(json_str).map_err(|e| ScoringError::JsonParsing(e.to_string()))?;

    if ratings
        .food_scores
        .iter()
        .chain(&ratings.service_scores)
        .any(|r| !(1..=5).contains(r))
    {
        tracing::debug!(
            food = ?ratings.food_scores,
            service = ?ratings.service_scores,
            "Ratings outside the 1-5 scale accepted as-is"
        );
    }

    Ok(ratings)
}

/// Locate the JSON object inside a reply, stripping a code fence if present.
fn extract_json_block(response: &str) -> Result<&str, ScoringError> {
    let trimmed = response.trim();
    if trimmed.is_empty() {
        return Err(ScoringError::MalformedResponse("Empty response".into()));
    }

    let body = match trimmed.find("```") {
        Some(fence_start) => {
            let after_fence = &trimmed[fence_start + 3..];
            // Skip the info string ("json") up to the end of the fence line.
            let content_start = after_fence.find('\n').map_or(after_fence.len(), |i| i + 1);
            let content = &after_fence[content_start..];
            let fence_end = content
                .find("```")
                .ok_or_else(|| ScoringError::MalformedResponse("Unclosed code fence".into()))?;
            content[..fence_end].trim()
        }
        None => trimmed,
    };

    if !body.starts_with('{') {
        return Err(ScoringError::MalformedResponse(
            "No JSON object found in response".into(),
        ));
    }
    Ok(body)
}
