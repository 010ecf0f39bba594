//! In-memory fake text generator (testing only)
//!
//! [`FakeGenerator`] answers from a small rule table instead of a network
//! service and records every call it receives, so tests can assert on the
//! prompts and personas a component produced.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::LlmError;
use crate::generator::{PersonaConfig, TextGenerator};
use crate::Result;

#[derive(Debug, Clone)]
enum Reply {
    Text(String),
    Fail(String),
}

#[derive(Debug, Clone)]
struct Rule {
    needle: String,
    reply: Reply,
}

/// A single call observed by the fake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub prompt: String,
    pub persona: PersonaConfig,
}

/// Deterministic generator driven by substring rules.
///
/// Rules are checked in insertion order against the prompt and the persona
/// instructions; the first match decides the reply. Unmatched calls get the
/// default reply.
#[derive(Debug)]
pub struct FakeGenerator {
    rules: Vec<Rule>,
    default: Reply,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeGenerator {
    /// Always answer with `text` unless a rule says otherwise.
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            default: Reply::Text(text.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with a 503 unless a rule says otherwise.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            default: Reply::Fail(message.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Answer with `text` when `needle` appears in the prompt or persona.
    pub fn when(mut self, needle: impl Into<String>, text: impl Into<String>) -> Self {
        self.rules.push(Rule {
            needle: needle.into(),
            reply: Reply::Text(text.into()),
        });
        self
    }

    /// Fail when `needle` appears in the prompt or persona.
    pub fn fail_when(mut self, needle: impl Into<String>) -> Self {
        let needle = needle.into();
        self.rules.push(Rule {
            reply: Reply::Fail(format!("scripted failure for '{needle}'")),
            needle,
        });
        self
    }

    /// Snapshot of all calls received so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.recorded().clone()
    }

    pub fn call_count(&self) -> usize {
        self.recorded().len()
    }

    fn recorded(&self) -> std::sync::MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn pick(&self, prompt: &str, persona: &PersonaConfig) -> &Reply {
        self.rules
            .iter()
            .find(|r| prompt.contains(&r.needle) || persona.instructions.contains(&r.needle))
            .map(|r| &r.reply)
            .unwrap_or(&self.default)
    }
}

#[async_trait]
impl TextGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str, persona: &PersonaConfig) -> Result<String> {
        self.recorded().push(RecordedCall {
            prompt: prompt.to_string(),
            persona: persona.clone(),
        });

        match self.pick(prompt, persona) {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail(message) => Err(LlmError::Api {
                status: 503,
                body: message.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn persona(instructions: &str) -> PersonaConfig {
        PersonaConfig::new("fake-model", instructions)
    }

    #[tokio::test]
    async fn default_reply_and_recording() {
        let fake = FakeGenerator::replying("Score: 8");
        let out = fake.generate("rate me", &persona("judge")).await.unwrap();
        assert_eq!(out, "Score: 8");
        assert_eq!(fake.call_count(), 1);
        assert_eq!(fake.calls()[0].prompt, "rate me");
        assert_eq!(fake.calls()[0].persona.instructions, "judge");
    }

    #[tokio::test]
    async fn first_matching_rule_wins() {
        let fake = FakeGenerator::replying("Score: 5")
            .when("Python", "Score: 9")
            .when("Py", "Score: 1");
        let out = fake
            .generate("x", &persona("You are a Python judge"))
            .await
            .unwrap();
        assert_eq!(out, "Score: 9");
    }

    #[tokio::test]
    async fn fail_rule_produces_api_error() {
        let fake = FakeGenerator::replying("ok").fail_when("Maintainability");
        let err = fake
            .generate("Evaluate on Maintainability", &persona("judge"))
            .await
            .unwrap_err();
        assert!(matches!(err, LlmError::Api { status: 503, .. }));
    }

    #[tokio::test]
    async fn failing_default() {
        let fake = FakeGenerator::failing("down");
        assert!(fake.generate("x", &persona("y")).await.is_err());
        assert_eq!(fake.call_count(), 1);
    }
}
