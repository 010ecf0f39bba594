//! OpenAI-compatible chat completions client
//!
//! Speaks the `/chat/completions` wire format, which both the public OpenAI
//! API and Koyeb-hosted deployments accept.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ModelConfig;
use crate::error::LlmError;
use crate::generator::{PersonaConfig, TextGenerator};
use crate::Result;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

fn build_request<'a>(
    prompt: &'a str,
    persona: &'a PersonaConfig,
    system: &'a str,
) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model: &persona.model,
        messages: vec![
            ChatMessage {
                role: "system",
                content: system,
            },
            ChatMessage {
                role: "user",
                content: prompt,
            },
        ],
    }
}

fn first_content(response: ChatCompletionResponse) -> Result<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(LlmError::EmptyResponse)
}

/// HTTP client for an OpenAI-compatible chat endpoint
#[derive(Clone)]
pub struct OpenAiChatClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl OpenAiChatClient {
    /// Create a client for the given endpoint.
    ///
    /// The model id in `config` is only a default for callers; each request
    /// carries the model of its [`PersonaConfig`].
    pub fn new(config: &ModelConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", config.api_key))
                .map_err(|_| LlmError::MissingConfig("API key is not a valid header value".into()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("gaccia-llm/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers);
        if config.timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.timeout_secs));
        }
        let http_client = builder.build()?;

        Ok(Self {
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl TextGenerator for OpenAiChatClient {
    async fn generate(&self, prompt: &str, persona: &PersonaConfig) -> Result<String> {
        let system = persona.system_message();
        let request = build_request(prompt, persona, &system);
        debug!(model = %persona.model, prompt_len = prompt.len(), "sending chat completion");

        let response = self
            .http_client
            .post(self.completions_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "chat completion rejected");
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        first_content(parsed)
    }
}
