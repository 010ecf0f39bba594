//! The text-generation seam.
//!
//! Everything above this crate talks to a model through [`TextGenerator`];
//! production wires in [`crate::OpenAiChatClient`], tests wire in
//! [`crate::fakes`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Instruction appended to the system prompt when markdown replies are wanted.
pub const MARKDOWN_INSTRUCTION: &str = "Use markdown to format your answers.";

/// Per-call persona: which model answers, in what voice, in what format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// Model identifier forwarded to the service
    pub model: String,
    /// System instructions describing who the model is playing
    pub instructions: String,
    /// Whether structured markup (markdown) is allowed in the reply
    pub markdown: bool,
}

impl PersonaConfig {
    pub fn new(model: impl Into<String>, instructions: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            instructions: instructions.into(),
            markdown: true,
        }
    }

    /// Enable or disable markdown in replies.
    pub fn with_markdown(mut self, markdown: bool) -> Self {
        self.markdown = markdown;
        self
    }

    /// The system message actually sent to the service.
    pub fn system_message(&self) -> String {
        if self.markdown {
            format!("{}\n\n{}", self.instructions.trim_end(), MARKDOWN_INSTRUCTION)
        } else {
            self.instructions.trim_end().to_string()
        }
    }
}

/// A service that turns a prompt plus persona into free-form text.
///
/// Implementations must be safe to share across tasks; a single instance is
/// reused for every judge and commentator call of a run.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send one prompt, wait for one reply.
    async fn generate(&self, prompt: &str, persona: &PersonaConfig) -> Result<String>;
}
