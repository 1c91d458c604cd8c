pub mod query;
pub mod reviews;
pub mod score;
pub mod rating;
pub mod orchestrator;

pub use query::*;
pub use reviews::*;
pub use score::*;
pub use orchestrator::*;

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScoringError {
    #[error("No query supplied: pass a question naming a restaurant")]
    MissingQuery,

    #[error("Review corpus unavailable at {}: {source}", path.display())]
    CorpusUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Rating provider is not reachable at {0}")]
    ProviderConnection(String),

    #[error("Rating provider returned error (status {status}): {body}")]
    ProviderError { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Malformed rating response: {0}")]
    MalformedResponse(String),

    #[error("JSON parsing error: {0}")]
    JsonParsing(String),

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Could not encode score report: {0}")]
    ReportEncoding(String),
}

/// Coarse failure category, stable across variants so callers can branch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    MissingQuery,
    Corpus,
    /// Transport failure talking to the rating provider. Worth retrying.
    CollaboratorUnavailable,
    /// The provider answered, but not with rating lists. Not worth retrying.
    CollaboratorMalformedResponse,
    Configuration,
    /// Writing the result failed after scoring succeeded.
    Output,
}

impl ScoringError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingQuery => ErrorKind::MissingQuery,
            Self::CorpusUnavailable { .. } => ErrorKind::Corpus,
            Self::ProviderConnection(_) | Self::ProviderError { .. } | Self::HttpClient(_) => {
                ErrorKind::CollaboratorUnavailable
            }
            Self::MalformedResponse(_) | Self::JsonParsing(_) | Self::ResponseParsing(_) => {
                ErrorKind::CollaboratorMalformedResponse
            }
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::ReportEncoding(_) => ErrorKind::Output,
        }
    }

    /// Only transport failures are retryable; a malformed reply is abandoned.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::CollaboratorUnavailable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_errors_are_retryable() {
        let errors = [
            ScoringError::ProviderConnection("http://localhost:11434".into()),
            ScoringError::HttpClient("timed out".into()),
            ScoringError::ProviderError {
                status: 503,
                body: "busy".into(),
            },
        ];
        for e in errors {
            assert_eq!(e.kind(), ErrorKind::CollaboratorUnavailable);
            assert!(e.is_retryable(), "{e} should be retryable");
        }
    }

    #[test]
    fn parse_errors_are_not_retryable() {
        let errors = [
            ScoringError::MalformedResponse("no object".into()),
            ScoringError::JsonParsing("eof".into()),
            ScoringError::ResponseParsing("missing choices".into()),
        ];
        for e in errors {
            assert_eq!(e.kind(), ErrorKind::CollaboratorMalformedResponse);
            assert!(!e.is_retryable(), "{e} should not be retryable");
        }
    }

    #[test]
    fn corpus_error_names_the_path() {
        let e = ScoringError::CorpusUnavailable {
            path: PathBuf::from("/nowhere/restaurantes.txt"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert_eq!(e.kind(), ErrorKind::Corpus);
        assert!(e.to_string().contains("/nowhere/restaurantes.txt"));
    }

    #[test]
    fn report_encoding_is_an_output_error() {
        let e = ScoringError::ReportEncoding("key must be a string".into());
        assert_eq!(e.kind(), ErrorKind::Output);
        assert!(!e.is_retryable());
    }

    #[test]
    fn missing_query_kind() {
        assert_eq!(ScoringError::MissingQuery.kind(), ErrorKind::MissingQuery);
        assert!(!ScoringError::MissingQuery.is_retryable());
    }
}
