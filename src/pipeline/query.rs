use std::sync::LazyLock;

use regex::Regex;

/// Name patterns in priority order. The first one yielding a non-empty
/// capture wins, so the order here is part of the behavior.
static NAME_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    vec![
        // "... do <name>"
        Regex::new(r"(?i)do\s+(.+?)[?.]?\n?$").unwrap(),
        // "... do restaurante <name>"
        Regex::new(r"(?i)do restaurante\s+(.+?)[?.]?\n?$").unwrap(),
        // "... restaurante <name>"
        Regex::new(r"(?i)restaurante\s+(.+?)[?.]?\n?$").unwrap(),
        // "... média do <name>"
        Regex::new(r"(?i)média\s+do\s+(.+?)[?.]?\n?$").unwrap(),
    ]
});

/// Pull the restaurant name out of a free-form question.
///
/// Total over any input: when no pattern yields a name, the trimmed query
/// itself is returned (so `""` maps to `""`).
pub fn extract_restaurant_name(query: &str) -> String {
    NAME_PATTERNS
        .iter()
        .filter_map(|pattern| pattern.captures(query))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|name| !name.is_empty())
        .unwrap_or_else(|| query.trim())
        .to_string()
}
