//! Review retrieval from the flat-text corpus.
//!
//! Each corpus line reads `<Restaurant Name>. <review text>`. Matching is a
//! pure predicate ([`ReviewMatcher`]); [`ReviewStore`] is the thin file
//! boundary around it.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use super::ScoringError;

/// Decides whether a corpus line belongs to one restaurant.
///
/// A line belongs to `name` when, after trimming, it starts with `name`
/// (case-insensitive), then a literal `.`, then at least one whitespace
/// character. Nothing inside the name is normalized.
#[derive(Debug, Clone)]
pub struct ReviewMatcher {
    name: String,
}

impl ReviewMatcher {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// The review text of `line` when it belongs to this restaurant.
    pub fn review_text<'a>(&self, line: &'a str) -> Option<&'a str> {
        let mut rest = line.trim().chars();
        for expected in self.name.chars() {
            let actual = rest.next()?;
            if !chars_eq_ignore_case(expected, actual) {
                return None;
            }
        }

        let after_period = rest.as_str().strip_prefix('.')?;
        let text = after_period.trim_start();
        if text.len() == after_period.len() {
            return None;
        }
        Some(text)
    }

    /// Reviews from `lines` that belong to this restaurant, in input order.
    pub fn collect<'a, I>(&self, lines: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        lines
            .into_iter()
            .filter_map(|line| self.review_text(line))
            .map(str::to_string)
            .collect()
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// Read-only access to the review corpus file. Not cached across calls.
#[derive(Debug, Clone)]
pub struct ReviewStore {
    corpus_path: PathBuf,
}

impl ReviewStore {
    pub fn new(corpus_path: impl Into<PathBuf>) -> Self {
        Self {
            corpus_path: corpus_path.into(),
        }
    }

    /// All reviews for `name`, in file order. No match is an empty Vec, not an error.
    pub fn fetch_reviews(&self, name: &str) -> Result<Vec<String>, ScoringError> {
        let matcher = ReviewMatcher::new(name);
        let file = File::open(&self.corpus_path).map_err(|e| self.unavailable(e))?;

        let mut reviews = Vec::new();
        let mut scanned = 0usize;
        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| self.unavailable(e))?;
            scanned += 1;
            if let Some(text) = matcher.review_text(&line) {
                reviews.push(text.to_string());
            }
        }

        tracing::debug!(
            corpus = %self.corpus_path.display(),
            lines_scanned = scanned,
            reviews_found = reviews.len(),
            "Corpus scanned"
        );
        Ok(reviews)
    }

    fn unavailable(&self, source: std::io::Error) -> ScoringError {
        ScoringError::CorpusUnavailable {
            path: self.corpus_path.clone(),
            source,
        }
    }
}
