//! Structured observability hooks for the evaluation lifecycle.
//!
//! This module provides:
//! - a run-scoped tracing span (`run_span`) to instrument a whole competition
//! - emission functions for phase boundaries: language start, per-dimension
//!   score, commentary, winner, report
//!
//! Events are emitted at `info!` (recoverable oddities at `warn!`) with an
//! `event` field so JSON log pipelines can filter on it.

use std::path::Path;

use tracing::{info, warn};
use uuid::Uuid;

use crate::domain::{Dimension, Language, Stage, Winner};

/// Span tagged with the run id; attach with `tracing::Instrument`.
pub fn run_span(run_id: &Uuid) -> tracing::Span {
    tracing::info_span!("gaccia.run", run_id = %run_id)
}

/// Emit event: evaluation started with both sample sizes.
pub fn emit_evaluation_started(python_len: usize, typescript_len: usize) {
    info!(
        event = "evaluation.started",
        python_bytes = python_len,
        typescript_bytes = typescript_len,
    );
}

/// Emit event: judging of one language began.
pub fn emit_language_started(language: Language) {
    info!(event = "language.started", language = %language);
}

/// Emit event: one dimension scored.
pub fn emit_dimension_scored(language: Language, dimension: Dimension, score: f64, defaulted: bool) {
    info!(
        event = "dimension.scored",
        language = %language,
        dimension = dimension.key(),
        score = score,
        defaulted = defaulted,
    );
}

/// Emit event: judge reply had no usable score line (warning level).
pub fn emit_score_defaulted(language: Language, dimension: Dimension, default: f64) {
    warn!(
        event = "score.defaulted",
        language = %language,
        dimension = dimension.key(),
        default = default,
    );
}

/// Emit event: commentary requested for a language.
pub fn emit_commentary_started(language: Language) {
    info!(event = "commentary.started", language = %language);
}

/// Emit event: totals compared and winner decided.
pub fn emit_winner_decided(python_total: f64, typescript_total: f64, winner: Winner) {
    info!(
        event = "winner.decided",
        python_total = python_total,
        typescript_total = typescript_total,
        winner = %winner,
    );
}

/// Emit event: text-generation call failed (warning level).
pub fn emit_service_failure(stage: Stage, language: Language, error: &dyn std::fmt::Display) {
    warn!(event = "service.failed", stage = %stage, language = %language, error = %error);
}

/// Emit event: report artifacts persisted.
pub fn emit_report_written(dir: &Path, files: usize) {
    info!(event = "report.written", dir = %dir.display(), files = files);
}

/// Emit event: report persistence failed (warning level).
pub fn emit_report_failed(dir: &Path, error: &dyn std::fmt::Display) {
    warn!(event = "report.failed", dir = %dir.display(), error = %error);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_span_can_be_entered() {
        let span = run_span(&Uuid::new_v4());
        let _guard = span.enter();
        emit_language_started(Language::Python);
    }
}
