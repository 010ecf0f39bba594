//! Model endpoint configuration
//!
//! Two OpenAI-compatible backends are supported:
//! - the public OpenAI API (`OPENAI_API_KEY`)
//! - a Koyeb-hosted deployment (`KOYEB_OPENAI_LIKE_BASE_URL`, optional `KOYEB_API_KEY`)

use crate::error::LlmError;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Model used when the caller does not pick one.
pub const DEFAULT_MODEL: &str = "gpt-4.1";

/// Public OpenAI API base URL.
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
const KOYEB_BASE_URL: &str = "KOYEB_OPENAI_LIKE_BASE_URL";
const KOYEB_API_KEY: &str = "KOYEB_API_KEY";

/// Which hosted backend serves the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelProvider {
    OpenAi,
    Koyeb,
}

/// Endpoint + credentials + model id for an OpenAI-compatible chat API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub provider: ModelProvider,
    /// Base URL without trailing slash (e.g. `https://api.openai.com/v1`)
    pub base_url: String,
    /// Bearer token sent with every request
    #[serde(skip_serializing, default)]
    pub api_key: String,
    /// Model identifier (e.g. `gpt-4.1`)
    pub model: String,
    /// Per-request timeout; `0` disables it
    pub timeout_secs: u64,
}

impl ModelConfig {
    /// Build a config from process environment variables.
    ///
    /// Fails with [`LlmError::MissingConfig`] when the selected provider's
    /// required variable is unset.
    pub fn from_env(model: &str, use_koyeb: bool) -> Result<Self> {
        Self::from_lookup(model, use_koyeb, |key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup (env, dotenv map, test fixture).
    pub fn from_lookup<F>(model: &str, use_koyeb: bool, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if use_koyeb {
            let base_url = non_empty(KOYEB_BASE_URL).ok_or_else(|| {
                LlmError::MissingConfig(format!(
                    "{KOYEB_BASE_URL} environment variable is required when using Koyeb"
                ))
            })?;
            // Koyeb deployments typically accept any token; "null" mirrors their examples.
            let api_key = non_empty(KOYEB_API_KEY).unwrap_or_else(|| "null".to_string());
            Ok(Self {
                provider: ModelProvider::Koyeb,
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key,
                model: model.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            })
        } else {
            let api_key = non_empty(OPENAI_API_KEY).ok_or_else(|| {
                LlmError::MissingConfig(format!(
                    "{OPENAI_API_KEY} environment variable is required when using OpenAI"
                ))
            })?;
            Ok(Self {
                provider: ModelProvider::OpenAi,
                base_url: OPENAI_BASE_URL.to_string(),
                api_key,
                model: model.to_string(),
                timeout_secs: DEFAULT_TIMEOUT_SECS,
            })
        }
    }

    /// Override the request timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Human-readable description of the active endpoint
    pub fn describe(&self) -> String {
        match self.provider {
            ModelProvider::OpenAi => format!("Using OpenAI endpoint: {}", self.base_url),
            ModelProvider::Koyeb => format!("Using Koyeb endpoint: {}", self.base_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn openai_requires_api_key() {
        let err = ModelConfig::from_lookup(DEFAULT_MODEL, false, lookup(&[])).unwrap_err();
        assert!(matches!(err, LlmError::MissingConfig(ref m) if m.contains("OPENAI_API_KEY")));
    }

    #[test]
    fn openai_config_uses_public_base_url() {
        let cfg =
            ModelConfig::from_lookup("gpt-4o", false, lookup(&[("OPENAI_API_KEY", "sk-test")]))
                .unwrap();
        assert_eq!(cfg.provider, ModelProvider::OpenAi);
        assert_eq!(cfg.base_url, OPENAI_BASE_URL);
        assert_eq!(cfg.api_key, "sk-test");
        assert_eq!(cfg.model, "gpt-4o");
        assert_eq!(cfg.describe(), "Using OpenAI endpoint: https://api.openai.com/v1");
    }

    #[test]
    fn koyeb_requires_base_url() {
        let err = ModelConfig::from_lookup(DEFAULT_MODEL, true, lookup(&[("KOYEB_API_KEY", "k")]))
            .unwrap_err();
        assert!(
            matches!(err, LlmError::MissingConfig(ref m) if m.contains("KOYEB_OPENAI_LIKE_BASE_URL"))
        );
    }

    #[test]
    fn koyeb_api_key_defaults_to_null_and_trims_slash() {
        let cfg = ModelConfig::from_lookup(
            DEFAULT_MODEL,
            true,
            lookup(&[("KOYEB_OPENAI_LIKE_BASE_URL", "https://llm.example.koyeb.app/v1/")]),
        )
        .unwrap();
        assert_eq!(cfg.provider, ModelProvider::Koyeb);
        assert_eq!(cfg.api_key, "null");
        assert_eq!(cfg.base_url, "https://llm.example.koyeb.app/v1");
        assert!(cfg.describe().starts_with("Using Koyeb endpoint"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let err =
            ModelConfig::from_lookup(DEFAULT_MODEL, false, lookup(&[("OPENAI_API_KEY", "  ")]))
                .unwrap_err();
        assert!(matches!(err, LlmError::MissingConfig(_)));
    }

    #[test]
    fn api_key_is_not_serialized() {
        let cfg =
            ModelConfig::from_lookup(DEFAULT_MODEL, false, lookup(&[("OPENAI_API_KEY", "sk-x")]))
                .unwrap();
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(!json.contains("sk-x"));
    }
}
