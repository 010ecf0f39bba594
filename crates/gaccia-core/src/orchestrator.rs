//! Competition orchestration.
//!
//! [`EvaluationOrchestrator`] owns the judge panel and one commentator per
//! language. A run judges both samples, tallies, asks each commentator for
//! a take on its own language's sample, composes the
//! [`CompetitiveEvaluation`], and persists the report.

use std::path::Path;
use std::sync::Arc;

use futures::future::{try_join, try_join_all};
use gaccia_llm::{TextGenerator, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use tracing::Instrument;
use uuid::Uuid;

use crate::commentator::RivalCommentator;
use crate::domain::{
    CompetitiveEvaluation, DetailedEvaluation, EvaluationError, Language, ReportError, Result,
};
use crate::judge::JudgePanel;
use crate::metrics::{Counter, METRICS};
use crate::obs;
use crate::reporting::{save_evaluation_report, ReportPaths};
use crate::scoring::Scoreboard;

/// How generator calls are scheduled within a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// One call at a time, Python before TypeScript, canonical order.
    #[default]
    Sequential,
    /// All judge calls at once, then both commentary calls at once.
    Concurrent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorConfig {
    pub model: String,
    /// Totals within this distance of each other tie. `0.0` means exact.
    pub tie_tolerance: f64,
    pub mode: ExecutionMode,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            tie_tolerance: 0.0,
            mode: ExecutionMode::Sequential,
        }
    }
}

impl OrchestratorConfig {
    fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(EvaluationError::Configuration(
                "model id must not be empty".to_string(),
            ));
        }
        if !self.tie_tolerance.is_finite() || self.tie_tolerance < 0.0 {
            return Err(EvaluationError::Configuration(format!(
                "tie tolerance must be a finite non-negative number, got {}",
                self.tie_tolerance
            )));
        }
        Ok(())
    }
}

/// Outcome of [`EvaluationOrchestrator::run`].
///
/// The evaluation is kept even when persisting it failed.
#[derive(Debug)]
pub struct CompetitionRun {
    pub run_id: Uuid,
    pub evaluation: CompetitiveEvaluation,
    pub report: std::result::Result<ReportPaths, ReportError>,
}

#[derive(Debug)]
pub struct EvaluationOrchestrator {
    config: OrchestratorConfig,
    panel: JudgePanel,
    python_commentator: RivalCommentator,
    typescript_commentator: RivalCommentator,
}

impl EvaluationOrchestrator {
    /// Build all judges and commentators. Fails before any call on bad config.
    pub fn new(generator: Arc<dyn TextGenerator>, config: OrchestratorConfig) -> Result<Self> {
        config.validate()?;
        let model = config.model.as_str();
        Ok(Self {
            panel: JudgePanel::new(model, Arc::clone(&generator)),
            python_commentator: RivalCommentator::new(
                Language::Python,
                model,
                Arc::clone(&generator),
            ),
            typescript_commentator: RivalCommentator::new(Language::TypeScript, model, generator),
            config,
        })
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn panel(&self) -> &JudgePanel {
        &self.panel
    }

    /// The commentator whose home is `language`.
    pub fn commentator(&self, language: Language) -> &RivalCommentator {
        match language {
            Language::Python => &self.python_commentator,
            Language::TypeScript => &self.typescript_commentator,
        }
    }

    /// Run the five judges for `language` on `code`, results in canonical order.
    pub async fn evaluate_language(
        &self,
        language: Language,
        code: &str,
    ) -> Result<Vec<DetailedEvaluation>> {
        obs::emit_language_started(language);
        let judges = self.panel.judges(language);
        match self.config.mode {
            ExecutionMode::Sequential => {
                let mut out = Vec::with_capacity(judges.len());
                for judge in judges {
                    out.push(judge.evaluate(code, language).await?);
                }
                Ok(out)
            }
            ExecutionMode::Concurrent => {
                try_join_all(judges.iter().map(|j| j.evaluate(code, language))).await
            }
        }
    }

    async fn commentary(&self, language: Language, code: &str, board: &Scoreboard) -> Result<String> {
        self.commentator(language)
            .generate(code, &board.summary_line(language))
            .await
    }

    /// Judge both samples, decide the winner, collect commentary.
    ///
    /// Any service failure aborts the whole evaluation.
    pub async fn evaluate_implementations(
        &self,
        python_code: &str,
        typescript_code: &str,
    ) -> Result<CompetitiveEvaluation> {
        obs::emit_evaluation_started(python_code.len(), typescript_code.len());

        let (python_evals, typescript_evals) = match self.config.mode {
            ExecutionMode::Sequential => (
                self.evaluate_language(Language::Python, python_code).await?,
                self.evaluate_language(Language::TypeScript, typescript_code)
                    .await?,
            ),
            ExecutionMode::Concurrent => {
                try_join(
                    self.evaluate_language(Language::Python, python_code),
                    self.evaluate_language(Language::TypeScript, typescript_code),
                )
                .await?
            }
        };

        let board = Scoreboard::tally(python_evals, typescript_evals, self.config.tie_tolerance)?;
        obs::emit_winner_decided(
            board.total(Language::Python),
            board.total(Language::TypeScript),
            board.winner(),
        );

        let (python_snark, typescript_snark) = match self.config.mode {
            ExecutionMode::Sequential => (
                self.commentary(Language::Python, python_code, &board).await?,
                self.commentary(Language::TypeScript, typescript_code, &board)
                    .await?,
            ),
            ExecutionMode::Concurrent => {
                try_join(
                    self.commentary(Language::Python, python_code, &board),
                    self.commentary(Language::TypeScript, typescript_code, &board),
                )
                .await?
            }
        };

        Ok(board.into_evaluation(python_snark, typescript_snark))
    }

    /// Full run: evaluate, then persist into `output_dir`.
    ///
    /// Evaluation failures are returned as `Err` and nothing is written.
    /// Report failures land in [`CompetitionRun::report`].
    pub async fn run(
        &self,
        python_code: &str,
        typescript_code: &str,
        output_dir: &Path,
    ) -> Result<CompetitionRun> {
        let run_id = Uuid::new_v4();
        let span = obs::run_span(&run_id);

        async move {
            let outcome = self
                .evaluate_implementations(python_code, typescript_code)
                .await;
            let evaluation = match outcome {
                Ok(evaluation) => evaluation,
                Err(e) => {
                    METRICS.flush();
                    return Err(e);
                }
            };

            let report = save_evaluation_report(&evaluation, output_dir, run_id);
            if let Err(e) = &report {
                obs::emit_report_failed(output_dir, e);
            }
            METRICS.inc(Counter::RunsCompleted);
            METRICS.flush();

            Ok(CompetitionRun {
                run_id,
                evaluation,
                report,
            })
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dimension, Stage, Winner};
    use gaccia_llm::fakes::FakeGenerator;

    fn orchestrator(fake: FakeGenerator, config: OrchestratorConfig) -> (Arc<FakeGenerator>, EvaluationOrchestrator) {
        let fake = Arc::new(fake);
        let orch = EvaluationOrchestrator::new(fake.clone(), config).unwrap();
        (fake, orch)
    }

    #[test]
    fn empty_model_is_rejected() {
        let config = OrchestratorConfig {
            model: "  ".to_string(),
            ..OrchestratorConfig::default()
        };
        let err = EvaluationOrchestrator::new(Arc::new(FakeGenerator::replying("")), config)
            .unwrap_err();
        assert!(matches!(err, EvaluationError::Configuration(_)));
    }

    #[test]
    fn negative_or_nan_tolerance_is_rejected() {
        for tol in [-0.1, f64::NAN] {
            let config = OrchestratorConfig {
                tie_tolerance: tol,
                ..OrchestratorConfig::default()
            };
            assert!(
                EvaluationOrchestrator::new(Arc::new(FakeGenerator::replying("")), config)
                    .is_err()
            );
        }
    }

    #[tokio::test]
    async fn python_wins_on_higher_scores() {
        let fake = FakeGenerator::replying("Nice one.")
            .when("```python", "Score: 9")
            .when("```typescript", "Score: 7");
        let (fake, orch) = orchestrator(fake, OrchestratorConfig::default());

        let eval = orch
            .evaluate_implementations("def f(): pass", "function f() {}")
            .await
            .unwrap();
        assert_eq!(eval.python_total_score(), 9.0);
        assert_eq!(eval.typescript_total_score(), 7.0);
        assert_eq!(eval.winner(), Winner::Python);
        assert_eq!(eval.python_snark(), "Nice one.");
        // 10 judges + 2 commentators
        assert_eq!(fake.call_count(), 12);
    }

    #[tokio::test]
    async fn calls_follow_canonical_order_sequentially() {
        let (fake, orch) = orchestrator(
            FakeGenerator::replying("Score: 6"),
            OrchestratorConfig::default(),
        );
        orch.evaluate_implementations("a = 1", "const a = 1;")
            .await
            .unwrap();

        let calls = fake.calls();
        let expected: Vec<String> = Language::ALL
            .iter()
            .flat_map(|l| {
                Dimension::CANONICAL
                    .iter()
                    .map(move |d| format!("Evaluate this {} code on {}:", l.tag(), d.label()))
            })
            .collect();
        for (call, prefix) in calls.iter().zip(&expected) {
            assert!(call.prompt.starts_with(prefix), "{} vs {}", call.prompt, prefix);
        }
        assert!(calls[10].persona.instructions.contains("Python developer"));
        assert!(calls[10].prompt.contains("Code: a = 1"));
        assert!(calls[10].prompt.contains("Python scored 6.0/10 overall"));
        assert!(calls[11].prompt.contains("Code: const a = 1;"));
        assert!(calls[11].prompt.contains("TypeScript scored 6.0/10 overall"));
    }

    #[tokio::test]
    async fn judge_failure_identifies_language_and_dimension() {
        let fake = FakeGenerator::replying("Score: 8")
            .fail_when("Evaluate this typescript code on Maintainability");
        let (fake, orch) = orchestrator(fake, OrchestratorConfig::default());

        let err = orch
            .evaluate_implementations("x = 1", "let x = 1;")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::ServiceUnavailable {
                stage: Stage::Judge,
                language: Language::TypeScript,
                dimension: Some(Dimension::Maintainability),
                ..
            }
        ));
        // 5 python + readability + failing maintainability; no commentary
        assert_eq!(fake.call_count(), 7);
    }

    #[tokio::test]
    async fn commentator_failure_aborts_evaluation() {
        let fake = FakeGenerator::replying("Score: 8").fail_when("witty comment");
        let (_, orch) = orchestrator(fake, OrchestratorConfig::default());
        let err = orch.evaluate_implementations("x", "y").await.unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::ServiceUnavailable {
                stage: Stage::Commentator,
                language: Language::Python,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn concurrent_mode_matches_sequential() {
        let reply = FakeGenerator::replying("Quip.")
            .when("code on Readability", "Score: 9")
            .when("```python", "Score: 6")
            .when("```typescript", "Score: 7");
        let (_, seq) = orchestrator(reply, OrchestratorConfig::default());

        let reply = FakeGenerator::replying("Quip.")
            .when("code on Readability", "Score: 9")
            .when("```python", "Score: 6")
            .when("```typescript", "Score: 7");
        let (_, conc) = orchestrator(
            reply,
            OrchestratorConfig {
                mode: ExecutionMode::Concurrent,
                ..OrchestratorConfig::default()
            },
        );

        let a = seq.evaluate_implementations("p", "t").await.unwrap();
        let b = conc.evaluate_implementations("p", "t").await.unwrap();
        assert_eq!(a, b);
        let dims: Vec<_> = b.python_evaluations().iter().map(|e| e.dimension).collect();
        assert_eq!(dims, Dimension::CANONICAL.to_vec());
    }

    #[tokio::test]
    async fn tolerance_turns_close_totals_into_tie() {
        let fake = FakeGenerator::replying("ok")
            .when("```python", "Score: 7.02")
            .when("```typescript", "Score: 7");
        let (_, orch) = orchestrator(
            fake,
            OrchestratorConfig {
                tie_tolerance: 0.05,
                ..OrchestratorConfig::default()
            },
        );
        let eval = orch.evaluate_implementations("p", "t").await.unwrap();
        assert_eq!(eval.winner(), Winner::Tie);
    }
}
