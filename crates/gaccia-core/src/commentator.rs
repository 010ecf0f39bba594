//! Rival commentary ("snark").
//!
//! A [`RivalCommentator`] is loyal to its home language and pokes fun at
//! code framed as the rival's. One per language is owned by the
//! orchestrator; the CLI snark factory drives them directly.

use std::sync::Arc;

use gaccia_llm::{PersonaConfig, TextGenerator};
use tracing::instrument;

use crate::domain::{EvaluationError, Language, Result, Stage};
use crate::metrics::{Counter, METRICS};
use crate::obs;

/// Characters of code quoted in a commentary prompt.
pub const EXCERPT_CHARS: usize = 200;

fn personality(home: Language) -> &'static str {
    match home {
        Language::Python => {
            "You're a Python purist who finds TypeScript's build tooling and type \
             gymnastics endlessly amusing. You have strong feelings about indentation \
             versus braces."
        }
        Language::TypeScript => {
            "You're a TypeScript enthusiast who finds Python's runtime surprises and \
             duck-typing adventures endlessly amusing. You sleep better with a compiler \
             watching your back."
        }
    }
}

fn commentator_instructions(home: Language) -> String {
    format!(
        "You are an opinionated {home} developer in GACCIA with a friendly rivalry \
         against {rival}.\n\n\
         {personality}\n\n\
         Your comments are:\n\
         - Witty and playful, poking fun at the rival language's quirks\n\
         - Focused on programming culture and code, never on people\n\
         - Short: at most two sentences\n\
         - Never hostile or mean-spirited",
        home = home.display_name(),
        rival = home.rival().display_name(),
        personality = personality(home),
    )
}

/// First [`EXCERPT_CHARS`] characters of `code`, with `...` when cut.
pub fn excerpt(code: &str) -> String {
    match code.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &code[..cut]),
        None => code.to_string(),
    }
}

/// Generates short rival-language commentary from a home-language persona.
#[derive(Clone)]
pub struct RivalCommentator {
    home: Language,
    persona: PersonaConfig,
    generator: Arc<dyn TextGenerator>,
}

impl std::fmt::Debug for RivalCommentator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RivalCommentator")
            .field("home", &self.home)
            .field("model", &self.persona.model)
            .finish()
    }
}

impl RivalCommentator {
    pub fn new(home: Language, model: &str, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            home,
            persona: PersonaConfig::new(model, commentator_instructions(home)),
            generator,
        }
    }

    pub fn home(&self) -> Language {
        self.home
    }

    pub fn rival(&self) -> Language {
        self.home.rival()
    }

    pub fn persona(&self) -> &PersonaConfig {
        &self.persona
    }

    pub fn build_prompt(&self, code: &str, evaluation_summary: &str) -> String {
        format!(
            "Write a witty comment about this {rival} code from a {home} developer's \
             perspective:\n\n\
             Code: {code}\n\
             Quality summary: {evaluation_summary}\n\n\
             Keep it playful, not hostile, and no longer than 2 sentences.",
            rival = self.rival().display_name(),
            home = self.home.display_name(),
            code = excerpt(code),
        )
    }

    /// One commentary call. The reply is returned trimmed; failures propagate.
    #[instrument(skip_all, fields(home = %self.home))]
    pub async fn generate(&self, code: &str, evaluation_summary: &str) -> Result<String> {
        let prompt = self.build_prompt(code, evaluation_summary);
        METRICS.inc(Counter::CommentaryCalls);
        obs::emit_commentary_started(self.home);

        match self.generator.generate(&prompt, &self.persona).await {
            Ok(reply) => Ok(reply.trim().to_string()),
            Err(e) => {
                obs::emit_service_failure(Stage::Commentator, self.home, &e);
                Err(EvaluationError::commentator(self.home, e))
            }
        }
    }
}
