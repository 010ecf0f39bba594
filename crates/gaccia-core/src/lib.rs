//! GACCIA Core Library
//!
//! The competitive evaluation engine: five dimension judges per language,
//! rival commentary, score aggregation, winner decision, and report
//! persistence. Text generation is reached through
//! [`gaccia_llm::TextGenerator`].

pub mod commentator;
pub mod domain;
pub mod judge;
pub mod metrics;
pub mod obs;
pub mod orchestrator;
pub mod reporting;
pub mod scoring;
pub mod telemetry;

pub use commentator::{excerpt, RivalCommentator};

pub use domain::{
    CompetitiveEvaluation, DetailedEvaluation, Dimension, EvaluationError, Language, ReportError,
    Result, Stage, UnknownLanguage, Winner, DEFAULT_SCORE, SCORE_RANGE,
};

pub use judge::{parse_reply, parse_score, DimensionJudge, JudgePanel, ParsedReply};

pub use orchestrator::{CompetitionRun, EvaluationOrchestrator, ExecutionMode, OrchestratorConfig};

pub use reporting::{
    evaluation_digest, read_evaluation_report, render_artifact_overview, render_detailed_results,
    render_report_md, render_snark_md, save_evaluation_report, EvaluationReportArtifact,
    ReportPaths, ReportSummarySection,
};

pub use scoring::{decide_winner, mean_score, Scoreboard};

/// Crate version, shown by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
