//! Score aggregation and winner determination.
//!
//! A [`Scoreboard`] is the checked intermediate between judging and
//! commentary: both scorecards validated against the canonical dimension
//! order, totals computed, winner decided.

use crate::domain::{
    CompetitiveEvaluation, DetailedEvaluation, Dimension, EvaluationError, Language, Result,
    Winner,
};

/// Unweighted mean of the scores on a scorecard. Empty cards average to 0.
pub fn mean_score(evaluations: &[DetailedEvaluation]) -> f64 {
    if evaluations.is_empty() {
        return 0.0;
    }
    evaluations.iter().map(|e| e.score).sum::<f64>() / evaluations.len() as f64
}

/// Compare two totals.
///
/// The strictly higher total wins. Totals whose distance is at most
/// `tie_tolerance` tie; with the default tolerance of `0.0` only exactly
/// equal totals tie.
pub fn decide_winner(python_total: f64, typescript_total: f64, tie_tolerance: f64) -> Winner {
    if (python_total - typescript_total).abs() <= tie_tolerance {
        Winner::Tie
    } else if python_total > typescript_total {
        Winner::Python
    } else if typescript_total > python_total {
        Winner::TypeScript
    } else {
        Winner::Tie
    }
}

/// Reject scorecards that are not exactly the five canonical dimensions in order.
pub fn validate_scorecard(language: Language, evaluations: &[DetailedEvaluation]) -> Result<()> {
    if evaluations.len() != Dimension::CANONICAL.len() {
        return Err(EvaluationError::InvalidScorecard {
            language,
            reason: format!(
                "expected {} evaluations, got {}",
                Dimension::CANONICAL.len(),
                evaluations.len()
            ),
        });
    }
    for (expected, got) in Dimension::CANONICAL.iter().zip(evaluations) {
        if *expected != got.dimension {
            return Err(EvaluationError::InvalidScorecard {
                language,
                reason: format!(
                    "expected {} at this position, got {}",
                    expected.label(),
                    got.dimension.label()
                ),
            });
        }
    }
    Ok(())
}

/// Both scorecards, their totals, and the decided winner.
#[derive(Debug, Clone, PartialEq)]
pub struct Scoreboard {
    python_evaluations: Vec<DetailedEvaluation>,
    typescript_evaluations: Vec<DetailedEvaluation>,
    python_total: f64,
    typescript_total: f64,
    winner: Winner,
}

impl Scoreboard {
    /// Validate both scorecards, aggregate, and decide the winner.
    pub fn tally(
        python_evaluations: Vec<DetailedEvaluation>,
        typescript_evaluations: Vec<DetailedEvaluation>,
        tie_tolerance: f64,
    ) -> Result<Self> {
        validate_scorecard(Language::Python, &python_evaluations)?;
        validate_scorecard(Language::TypeScript, &typescript_evaluations)?;

        let python_total = mean_score(&python_evaluations);
        let typescript_total = mean_score(&typescript_evaluations);
        let winner = decide_winner(python_total, typescript_total, tie_tolerance);

        Ok(Self {
            python_evaluations,
            typescript_evaluations,
            python_total,
            typescript_total,
            winner,
        })
    }

    pub fn total(&self, language: Language) -> f64 {
        match language {
            Language::Python => self.python_total,
            Language::TypeScript => self.typescript_total,
        }
    }

    pub fn winner(&self) -> Winner {
        self.winner
    }

    /// One-line context handed to a language's commentator.
    pub fn summary_line(&self, language: Language) -> String {
        format!(
            "{} scored {:.1}/10 overall",
            language.display_name(),
            self.total(language)
        )
    }

    /// Close the competition with both commentary strings.
    pub fn into_evaluation(self, python_snark: String, typescript_snark: String) -> CompetitiveEvaluation {
        CompetitiveEvaluation::compose(
            self.python_evaluations,
            self.typescript_evaluations,
            self.python_total,
            self.typescript_total,
            self.winner,
            python_snark,
            typescript_snark,
        )
    }
}
