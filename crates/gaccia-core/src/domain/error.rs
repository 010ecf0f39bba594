//! Error taxonomy for competitive evaluation runs.
//!
//! Unparseable scores are not errors: judges recover from them locally.
//! What reaches the caller is a service failure (fatal to the run), a
//! configuration problem (fatal before the run), or a report I/O failure
//! (the in-memory evaluation survives it).

use std::fmt;
use std::path::PathBuf;

use gaccia_llm::LlmError;

use super::language::{Dimension, Language};

/// Which kind of component was talking to the text-generation service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Judge,
    Commentator,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Judge => f.write_str("judge"),
            Stage::Commentator => f.write_str("commentator"),
        }
    }
}

fn dimension_suffix(dimension: &Option<Dimension>) -> String {
    dimension
        .map(|d| format!(" / {}", d.label()))
        .unwrap_or_default()
}

/// Errors that abort an evaluation run.
#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    #[error(
        "text generation unavailable for {stage} ({language}{}): {source}",
        dimension_suffix(.dimension)
    )]
    ServiceUnavailable {
        stage: Stage,
        language: Language,
        dimension: Option<Dimension>,
        source: LlmError,
    },

    #[error("invalid orchestrator configuration: {0}")]
    Configuration(String),

    #[error("invalid scorecard for {language}: {reason}")]
    InvalidScorecard { language: Language, reason: String },
}

impl EvaluationError {
    pub(crate) fn judge(language: Language, dimension: Dimension, source: LlmError) -> Self {
        EvaluationError::ServiceUnavailable {
            stage: Stage::Judge,
            language,
            dimension: Some(dimension),
            source,
        }
    }

    pub(crate) fn commentator(language: Language, source: LlmError) -> Self {
        EvaluationError::ServiceUnavailable {
            stage: Stage::Commentator,
            language,
            dimension: None,
            source,
        }
    }
}

/// Errors produced while persisting or loading report artifacts.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("report I/O failed for {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("report serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for evaluation runs.
pub type Result<T> = std::result::Result<T, EvaluationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn judge_failure_names_language_and_dimension() {
        let err = EvaluationError::judge(
            Language::TypeScript,
            Dimension::SecurityPerformance,
            LlmError::Http("timeout".to_string()),
        );
        let msg = err.to_string();
        assert!(msg.contains("judge"));
        assert!(msg.contains("typescript"));
        assert!(msg.contains("Security & Performance"));
        assert!(msg.contains("timeout"));
    }

    #[test]
    fn commentator_failure_has_no_dimension() {
        let err = EvaluationError::commentator(Language::Python, LlmError::EmptyResponse);
        assert_eq!(
            err.to_string(),
            "text generation unavailable for commentator (python): service returned an empty response"
        );
    }

    #[test]
    fn report_io_error_shows_path() {
        let err = ReportError::Io {
            path: PathBuf::from("/nope/evaluation_report.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.to_string().contains("/nope/evaluation_report.json"));
    }
}
