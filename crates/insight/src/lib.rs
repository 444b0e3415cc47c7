//! Insight gateway.
//!
//! A thin client for an OpenAI-compatible chat-completion endpoint. The
//! gateway never touches the store: callers build prompts from already
//! fetched data (see [`prompt`]) and get back plain text.

use std::time::Duration;

use reqwest::{Url, header};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod prompt;

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MAX_COMPLETION_TOKENS: u32 = 500;
const SAMPLING_TEMPERATURE: f32 = 0.7;

#[derive(Error, Debug)]
pub enum InsightError {
    #[error("invalid gateway configuration: {0}")]
    Config(String),
    #[error("completion provider error: {0}")]
    Provider(String),
    #[error(transparent)]
    Transport(#[from] reqwest::Error),
}

/// One chat message in provider wire format.
#[derive(Clone, Debug, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Clone, Debug)]
pub struct InsightClient {
    base_url: Url,
    model: String,
    http: reqwest::Client,
}

impl InsightClient {
    pub fn builder() -> InsightClientBuilder {
        InsightClientBuilder::default()
    }

    /// Sends one synchronous completion request and returns the text of
    /// the first choice.
    ///
    /// Timeouts, transport faults, non-success statuses and empty
    /// completions all surface as [`InsightError`]; the caller decides
    /// whether that becomes an HTTP error or a fallback reply.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, InsightError> {
        let endpoint = self
            .base_url
            .join("chat/completions")
            .map_err(|err| InsightError::Config(format!("invalid base url: {err}")))?;

        let request = CompletionRequest {
            model: &self.model,
            messages,
            max_tokens: MAX_COMPLETION_TOKENS,
            temperature: SAMPLING_TEMPERATURE,
        };

        tracing::debug!("requesting completion from {endpoint}");
        let res = self.http.post(endpoint).json(&request).send().await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(InsightError::Provider(format!(
                "provider returned {status}: {body}"
            )));
        }

        let body: CompletionResponse = res.json().await?;
        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| InsightError::Provider("completion had no content".to_string()))
    }
}

/// The builder for `InsightClient`.
pub struct InsightClientBuilder {
    base_url: String,
    model: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl Default for InsightClientBuilder {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            model: String::new(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl InsightClientBuilder {
    /// Provider root, e.g. `http://localhost:11434/v1`.
    pub fn base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.to_string();
        self
    }

    pub fn model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn api_key(mut self, api_key: Option<&str>) -> Self {
        self.api_key = api_key.map(str::to_string);
        self
    }

    /// Upper bound on one provider round-trip; expiry counts as a
    /// gateway failure.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn build(self) -> Result<InsightClient, InsightError> {
        if self.model.is_empty() {
            return Err(InsightError::Config("model must not be empty".to_string()));
        }

        // `Url::join` drops the last path segment without this.
        let mut raw = self.base_url;
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let base_url =
            Url::parse(&raw).map_err(|err| InsightError::Config(format!("invalid base url: {err}")))?;

        let mut headers = header::HeaderMap::new();
        if let Some(key) = &self.api_key {
            let mut auth = header::HeaderValue::try_from(format!("Bearer {key}"))
                .map_err(|err| InsightError::Config(format!("invalid api key: {err}")))?;
            auth.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, auth);
        }

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(self.timeout)
            .build()
            .map_err(InsightError::Transport)?;

        Ok(InsightClient {
            base_url,
            model: self.model,
            http,
        })
    }
}
