use anyhow::{Context, Result};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::error::CompletionError;
use crate::schema::{ChatMessage, ChatRequest, ChatResponse};

/// Error bodies longer than this are cut before logging.
const MAX_ERROR_BODY: usize = 512;

/// Anything that can turn a prompt into a reply.
#[allow(async_fn_in_trait)]
pub trait CompletionService {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

#[derive(Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatClientConfig {
    pub endpoint: String,
    pub api_key: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub user_agent: String,
    pub request_timeout_secs: Option<u64>,
}

impl Default for ChatClientConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://api2.aigcbest.top/v1/chat/completions".to_string(),
            api_key: "APIKEY".to_string(),
            model: "gpt-4o".to_string(),
            temperature: 1.0,
            max_tokens: 400,
            user_agent: "Apifox/1.0.0 (https://apifox.com)".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl fmt::Debug for ChatClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChatClientConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Client for an OpenAI-style chat-completion endpoint.
#[derive(Clone)]
pub struct ChatClient {
    config: ChatClientConfig,
    client: reqwest::Client,
}

impl ChatClient {
    pub fn new(config: ChatClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self { config, client })
    }

    /// Send one prompt as a single user message and return the first
    /// choice's content, trimmed.
    pub async fn generate(&self, prompt: &str) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(&self.config.endpoint)
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("Bearer {}", self.config.api_key))
            .header(USER_AGENT, &self.config.user_agent)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .await
            .map_err(CompletionError::Transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(CompletionError::Decode)?;

        let choice = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or(CompletionError::EmptyChoices)?;

        Ok(choice.message.content.trim().to_string())
    }
}

impl CompletionService for ChatClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        self.generate(prompt).await
    }
}
