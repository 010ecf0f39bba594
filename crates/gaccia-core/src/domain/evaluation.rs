//! Evaluation results: per-dimension verdicts and the full competition record.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::language::{Dimension, Language};

/// Score substituted when a judge reply carries no parseable `Score:` line.
pub const DEFAULT_SCORE: f64 = 5.0;

/// Lowest and highest score a judge can award.
pub const SCORE_RANGE: (f64, f64) = (0.0, 10.0);

/// One judge's verdict on one code sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailedEvaluation {
    pub dimension: Dimension,
    /// 0–10.
    pub score: f64,
    /// Full raw reply from the judge.
    pub reasoning: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub suggestions: Vec<String>,
}

/// Outcome of comparing the two totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Python,
    TypeScript,
    Tie,
}

impl Winner {
    /// The winning language, if there is one.
    pub fn language(self) -> Option<Language> {
        match self {
            Winner::Python => Some(Language::Python),
            Winner::TypeScript => Some(Language::TypeScript),
            Winner::Tie => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Winner::Python => "Python",
            Winner::TypeScript => "TypeScript",
            Winner::Tie => "Tie",
        }
    }
}

impl From<Language> for Winner {
    fn from(language: Language) -> Self {
        match language {
            Language::Python => Winner::Python,
            Language::TypeScript => Winner::TypeScript,
        }
    }
}

impl fmt::Display for Winner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The complete, immutable result of one competition.
///
/// Built once by the orchestrator; exposes read-only accessors. Serialized
/// for the report digest but never deserialized, so every value goes
/// through `compose`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitiveEvaluation {
    python_evaluations: Vec<DetailedEvaluation>,
    typescript_evaluations: Vec<DetailedEvaluation>,
    python_total_score: f64,
    typescript_total_score: f64,
    winner: Winner,
    python_snark: String,
    typescript_snark: String,
    summary: String,
}

impl CompetitiveEvaluation {
    /// Assemble the record and compose its summary text.
    ///
    /// Callers guarantee both scorecards are complete and canonical
    /// (enforced by [`crate::scoring::Scoreboard::tally`]).
    pub(crate) fn compose(
        python_evaluations: Vec<DetailedEvaluation>,
        typescript_evaluations: Vec<DetailedEvaluation>,
        python_total_score: f64,
        typescript_total_score: f64,
        winner: Winner,
        python_snark: String,
        typescript_snark: String,
    ) -> Self {
        let summary = compose_summary(
            python_total_score,
            typescript_total_score,
            winner,
            &python_snark,
            &typescript_snark,
        );
        Self {
            python_evaluations,
            typescript_evaluations,
            python_total_score,
            typescript_total_score,
            winner,
            python_snark,
            typescript_snark,
            summary,
        }
    }

    pub fn python_evaluations(&self) -> &[DetailedEvaluation] {
        &self.python_evaluations
    }

    pub fn typescript_evaluations(&self) -> &[DetailedEvaluation] {
        &self.typescript_evaluations
    }

    /// Scorecard for either language.
    pub fn evaluations(&self, language: Language) -> &[DetailedEvaluation] {
        match language {
            Language::Python => &self.python_evaluations,
            Language::TypeScript => &self.typescript_evaluations,
        }
    }

    pub fn python_total_score(&self) -> f64 {
        self.python_total_score
    }

    pub fn typescript_total_score(&self) -> f64 {
        self.typescript_total_score
    }

    pub fn total_score(&self, language: Language) -> f64 {
        match language {
            Language::Python => self.python_total_score,
            Language::TypeScript => self.typescript_total_score,
        }
    }

    pub fn winner(&self) -> Winner {
        self.winner
    }

    pub fn python_snark(&self) -> &str {
        &self.python_snark
    }

    pub fn typescript_snark(&self) -> &str {
        &self.typescript_snark
    }

    pub fn snark(&self, language: Language) -> &str {
        match language {
            Language::Python => &self.python_snark,
            Language::TypeScript => &self.typescript_snark,
        }
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }
}

fn compose_summary(
    python_total: f64,
    typescript_total: f64,
    winner: Winner,
    python_snark: &str,
    typescript_snark: &str,
) -> String {
    format!(
        "🏆 COMPETITIVE EVALUATION RESULTS 🏆\n\
         \n\
         Python Total Score: {python_total:.1}/10\n\
         TypeScript Total Score: {typescript_total:.1}/10\n\
         \n\
         Winner: {winner}\n\
         \n\
         🐍 Python's take: {python_snark}\n\
         📘 TypeScript's take: {typescript_snark}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(score: f64) -> Vec<DetailedEvaluation> {
        Dimension::CANONICAL
            .iter()
            .map(|d| DetailedEvaluation {
                dimension: *d,
                score,
                reasoning: "ok".to_string(),
                strengths: vec![],
                weaknesses: vec![],
                suggestions: vec![],
            })
            .collect()
    }

    #[test]
    fn summary_lists_totals_winner_and_snark() {
        let eval = CompetitiveEvaluation::compose(
            card(9.0),
            card(7.0),
            9.0,
            7.0,
            Winner::Python,
            "indentation is a lifestyle".to_string(),
            "types are love".to_string(),
        );
        let s = eval.summary();
        assert!(s.contains("Python Total Score: 9.0/10"));
        assert!(s.contains("TypeScript Total Score: 7.0/10"));
        assert!(s.contains("Winner: Python"));
        assert!(s.contains("Python's take: indentation is a lifestyle"));
        assert!(s.contains("TypeScript's take: types are love"));
    }

    #[test]
    fn per_language_accessors_match_fields() {
        let eval = CompetitiveEvaluation::compose(
            card(6.0),
            card(8.0),
            6.0,
            8.0,
            Winner::TypeScript,
            "a".to_string(),
            "b".to_string(),
        );
        assert_eq!(eval.total_score(Language::Python), 6.0);
        assert_eq!(eval.total_score(Language::TypeScript), 8.0);
        assert_eq!(eval.snark(Language::TypeScript), "b");
        assert_eq!(eval.evaluations(Language::Python).len(), 5);
    }

    #[test]
    fn winner_serializes_as_label() {
        assert_eq!(serde_json::to_string(&Winner::Tie).unwrap(), "\"Tie\"");
        assert_eq!(
            serde_json::to_string(&Winner::TypeScript).unwrap(),
            "\"TypeScript\""
        );
        assert_eq!(Winner::from(Language::Python), Winner::Python);
        assert_eq!(Winner::Tie.language(), None);
    }
}
