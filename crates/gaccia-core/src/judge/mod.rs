//! Dimension judges.
//!
//! A [`DimensionJudge`] scores one code sample on one [`Dimension`] from the
//! perspective of one [`Language`]. Ten of them (five dimensions, two
//! languages) make up a [`JudgePanel`].

mod panel;
pub mod parse;
pub mod persona;

use std::sync::Arc;

use gaccia_llm::{PersonaConfig, TextGenerator};
use tracing::instrument;

use crate::domain::{DetailedEvaluation, Dimension, EvaluationError, Language, Result, Stage, DEFAULT_SCORE};
use crate::metrics::{Counter, METRICS};
use crate::obs;

pub use panel::JudgePanel;
pub use parse::{parse_reply, parse_score, ParsedReply};
pub use persona::judge_instructions;

const PLACEHOLDER_STRENGTHS: [&str; 2] = ["Strength 1", "Strength 2"];
const PLACEHOLDER_WEAKNESSES: [&str; 2] = ["Weakness 1", "Weakness 2"];
const PLACEHOLDER_SUGGESTIONS: [&str; 2] = ["Suggestion 1", "Suggestion 2"];

/// Scores code on a single dimension with a language-partial persona.
#[derive(Clone)]
pub struct DimensionJudge {
    dimension: Dimension,
    language: Language,
    persona: PersonaConfig,
    generator: Arc<dyn TextGenerator>,
}

impl std::fmt::Debug for DimensionJudge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DimensionJudge")
            .field("dimension", &self.dimension)
            .field("language", &self.language)
            .field("model", &self.persona.model)
            .finish()
    }
}

impl DimensionJudge {
    pub fn new(
        dimension: Dimension,
        language: Language,
        model: &str,
        generator: Arc<dyn TextGenerator>,
    ) -> Self {
        Self {
            dimension,
            language,
            persona: PersonaConfig::new(model, judge_instructions(dimension, language)),
            generator,
        }
    }

    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// The language whose perspective this judge speaks for.
    pub fn language(&self) -> Language {
        self.language
    }

    pub fn persona(&self) -> &PersonaConfig {
        &self.persona
    }

    /// The user prompt sent for `code` written in `language`.
    pub fn build_prompt(&self, code: &str, language: Language) -> String {
        format!(
            "Evaluate this {tag} code on {label}:\n\n```{tag}\n{code}\n```\n\n\
             Provide evaluation in this exact format:\n\
             Score: [0-10 score]\n\
             Reasoning: [detailed reasoning]\n\
             Strengths: [list 2-3 strengths]\n\
             Weaknesses: [list 2-3 weaknesses]\n\
             Suggestions: [list 2-3 improvement suggestions]",
            tag = language.tag(),
            label = self.dimension.label(),
        )
    }

    /// Ask the service for a verdict and parse it.
    ///
    /// A reply without a usable score gets [`DEFAULT_SCORE`]; a failed call
    /// is returned as [`EvaluationError::ServiceUnavailable`] and never
    /// turned into a score.
    #[instrument(skip_all, fields(dimension = self.dimension.key(), language = %language))]
    pub async fn evaluate(&self, code: &str, language: Language) -> Result<DetailedEvaluation> {
        let prompt = self.build_prompt(code, language);
        METRICS.inc(Counter::JudgeCalls);

        let reply = match self.generator.generate(&prompt, &self.persona).await {
            Ok(reply) => reply,
            Err(e) => {
                obs::emit_service_failure(Stage::Judge, language, &e);
                return Err(EvaluationError::judge(language, self.dimension, e));
            }
        };

        let parsed = parse_reply(&reply);
        let defaulted = parsed.score.is_none();
        let score = parsed.score.unwrap_or_else(|| {
            METRICS.inc(Counter::ScoresDefaulted);
            obs::emit_score_defaulted(language, self.dimension, DEFAULT_SCORE);
            DEFAULT_SCORE
        });
        obs::emit_dimension_scored(language, self.dimension, score, defaulted);

        Ok(DetailedEvaluation {
            dimension: self.dimension,
            score,
            reasoning: reply,
            strengths: or_placeholder(parsed.strengths, &PLACEHOLDER_STRENGTHS),
            weaknesses: or_placeholder(parsed.weaknesses, &PLACEHOLDER_WEAKNESSES),
            suggestions: or_placeholder(parsed.suggestions, &PLACEHOLDER_SUGGESTIONS),
        })
    }
}

fn or_placeholder(items: Vec<String>, placeholder: &[&str]) -> Vec<String> {
    if items.is_empty() {
        placeholder.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gaccia_llm::fakes::FakeGenerator;

    fn judge(dimension: Dimension, fake: Arc<FakeGenerator>) -> DimensionJudge {
        DimensionJudge::new(dimension, Language::Python, "gpt-4.1", fake)
    }

    #[test]
    fn prompt_fences_code_and_names_dimension() {
        let j = judge(
            Dimension::SecurityPerformance,
            Arc::new(FakeGenerator::replying("")),
        );
        let prompt = j.build_prompt("def f(): pass", Language::Python);
        assert!(prompt.starts_with("Evaluate this python code on Security & Performance:"));
        assert!(prompt.contains("```python\ndef f(): pass\n```"));
        assert!(prompt.ends_with("Suggestions: [list 2-3 improvement suggestions]"));
    }

    #[test]
    fn persona_uses_model_and_markdown() {
        let j = judge(Dimension::Readability, Arc::new(FakeGenerator::replying("")));
        assert_eq!(j.persona().model, "gpt-4.1");
        assert!(j.persona().markdown);
        assert!(j.persona().instructions.starts_with("You are a Python Readability Judge"));
    }

    #[tokio::test]
    async fn parses_score_and_keeps_raw_reply() {
        let reply = "Score: 7.5\nReasoning: tidy\nStrengths:\n- short\nWeaknesses: none";
        let fake = Arc::new(FakeGenerator::replying(reply));
        let eval = judge(Dimension::Readability, fake.clone())
            .evaluate("print(1)", Language::Python)
            .await
            .unwrap();
        assert_eq!(eval.dimension, Dimension::Readability);
        assert_eq!(eval.score, 7.5);
        assert_eq!(eval.reasoning, reply);
        assert_eq!(eval.strengths, vec!["short"]);
        assert_eq!(eval.weaknesses, vec!["none"]);
        assert_eq!(eval.suggestions, vec!["Suggestion 1", "Suggestion 2"]);
        assert_eq!(fake.call_count(), 1);
    }

    #[tokio::test]
    async fn missing_score_defaults_to_five() {
        let fake = Arc::new(FakeGenerator::replying("This code is lovely."));
        let eval = judge(Dimension::DocsEnjoyability, fake)
            .evaluate("x = 1", Language::Python)
            .await
            .unwrap();
        assert_eq!(eval.score, DEFAULT_SCORE);
        assert_eq!(eval.strengths, vec!["Strength 1", "Strength 2"]);
        assert_eq!(eval.weaknesses, vec!["Weakness 1", "Weakness 2"]);
    }

    #[tokio::test]
    async fn service_failure_is_not_a_score() {
        let fake = Arc::new(FakeGenerator::failing("down"));
        let err = judge(Dimension::Maintainability, fake)
            .evaluate("x = 1", Language::Python)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            EvaluationError::ServiceUnavailable {
                stage: Stage::Judge,
                language: Language::Python,
                dimension: Some(Dimension::Maintainability),
                ..
            }
        ));
    }

    #[tokio::test]
    async fn empty_code_is_still_sent() {
        let fake = Arc::new(FakeGenerator::replying("Score: 1"));
        let eval = judge(Dimension::LatestTools, fake.clone())
            .evaluate("", Language::Python)
            .await
            .unwrap();
        assert_eq!(eval.score, 1.0);
        assert!(fake.calls()[0].prompt.contains("```python\n\n```"));
    }
}
