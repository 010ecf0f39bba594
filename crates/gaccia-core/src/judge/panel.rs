use std::sync::Arc;

use gaccia_llm::TextGenerator;

use super::DimensionJudge;
use crate::domain::{Dimension, Language};

/// Five judges per language, built once and kept in canonical order.
#[derive(Debug, Clone)]
pub struct JudgePanel {
    python: Vec<DimensionJudge>,
    typescript: Vec<DimensionJudge>,
}

impl JudgePanel {
    pub fn new(model: &str, generator: Arc<dyn TextGenerator>) -> Self {
        let seat = |language: Language| -> Vec<DimensionJudge> {
            Dimension::CANONICAL
                .iter()
                .map(|&d| DimensionJudge::new(d, language, model, Arc::clone(&generator)))
                .collect()
        };
        Self {
            python: seat(Language::Python),
            typescript: seat(Language::TypeScript),
        }
    }

    /// The judges speaking for `language`, in canonical dimension order.
    pub fn judges(&self, language: Language) -> &[DimensionJudge] {
        match language {
            Language::Python => &self.python,
            Language::TypeScript => &self.typescript,
        }
    }
}
