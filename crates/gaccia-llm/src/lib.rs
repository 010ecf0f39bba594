//! GACCIA LLM: text-generation service boundary
//!
//! This crate owns everything that touches a hosted model:
//! - [`TextGenerator`]: the async seam judges and commentators call through
//! - [`PersonaConfig`]: model id + system instructions + markdown flag
//! - [`ModelConfig`]: OpenAI / Koyeb endpoint selection from the environment
//! - [`OpenAiChatClient`]: `reqwest`-based chat completions client
//! - [`fakes`]: deterministic in-memory generator for tests

pub mod client;
pub mod config;
pub mod error;
pub mod fakes;
pub mod generator;

pub use client::OpenAiChatClient;
pub use config::{ModelConfig, ModelProvider, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS, OPENAI_BASE_URL};
pub use error::LlmError;
pub use generator::{PersonaConfig, TextGenerator, MARKDOWN_INSTRUCTION};

/// Result type for text-generation operations
pub type Result<T> = std::result::Result<T, LlmError>;
