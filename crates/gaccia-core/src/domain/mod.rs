//! Domain models for GACCIA.
//!
//! Canonical definitions for the core entities:
//! - `Language` / `Dimension`: the competitors and the judged axes
//! - `DetailedEvaluation`: one judge's verdict
//! - `CompetitiveEvaluation`: the full competition record

pub mod error;
pub mod evaluation;
pub mod language;

pub use error::{EvaluationError, ReportError, Result, Stage};
pub use evaluation::{CompetitiveEvaluation, DetailedEvaluation, Winner, DEFAULT_SCORE, SCORE_RANGE};
pub use language::{Dimension, Language, UnknownLanguage};
