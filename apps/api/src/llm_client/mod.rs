/// LLM Client: the single point of entry for all chat-completion calls in the tutor API.
///
/// ARCHITECTURAL RULE: No other module may call the Groq API directly.
/// Handlers and the recommendation resolver receive a `CompletionBackend` by injection
/// (`AppState::llm`), so they can be exercised against stub backends in tests.
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;

const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Which configured model a call runs against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    /// Small instruction model used by the passthrough endpoints.
    Fast,
    /// Larger reasoning model used for course ranking.
    Ranking,
}

/// Sampling options for a single completion call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompletionOptions {
    pub tier: ModelTier,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
}

impl CompletionOptions {
    pub const GRADING: Self = Self::fast(1.0, 1024, 1.0);
    pub const QUIZ: Self = Self::fast(1.0, 1024, 1.0);
    pub const QUIZ_FEEDBACK: Self = Self::fast(1.0, 150, 1.0);
    /// Low temperature keeps the roadmap schema stable.
    pub const ROADMAP: Self = Self::fast(0.2, 4000, 0.9);
    pub const TAG_ASSIGNMENT: Self = Self::fast(0.5, 150, 1.0);
    pub const MODULE_SUGGESTIONS: Self = Self::fast(0.7, 1000, 1.0);
    pub const SIMILAR_COURSES: Self = Self::fast(0.3, 1000, 1.0);
    pub const COURSE_RANKING: Self = Self {
        tier: ModelTier::Ranking,
        temperature: 0.1,
        max_tokens: 500,
        top_p: 1.0,
    };

    const fn fast(temperature: f32, max_tokens: u32, top_p: f32) -> Self {
        Self {
            tier: ModelTier::Fast,
            temperature,
            max_tokens,
            top_p,
        }
    }
}

/// Anything that can turn a prompt into model text.
///
/// Implementations must request JSON-object output from the model; callers parse
/// the text with [`parse_json_output`].
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    async fn complete(&self, prompt: &str, options: &CompletionOptions)
        -> Result<String, LlmError>;
}

/// Calls the backend and deserializes the text response as JSON.
/// The prompt must instruct the model to return valid JSON.
pub async fn complete_json<T: DeserializeOwned>(
    backend: &dyn CompletionBackend,
    prompt: &str,
    options: &CompletionOptions,
) -> Result<T, LlmError> {
    let text = backend.complete(prompt, options).await?;
    parse_json_output(&text)
}

/// Parses raw model text as JSON after removing reasoning blocks and code fences.
pub fn parse_json_output<T: DeserializeOwned>(text: &str) -> Result<T, LlmError> {
    let text = strip_json_fences(strip_reasoning(text));
    serde_json::from_str(text).map_err(LlmError::Parse)
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    top_p: f32,
    stream: bool,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the message content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Groq chat-completions client (OpenAI-compatible wire format).
/// Wraps the API with retry logic and JSON-object response mode.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
    fast_model: String,
    ranking_model: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> Result<Self, LlmError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.llm_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            api_key: config.groq_api_key.clone(),
            api_url: config.groq_api_url.clone(),
            fast_model: config.fast_model.clone(),
            ranking_model: config.ranking_model.clone(),
        })
    }

    pub fn model_for(&self, tier: ModelTier) -> &str {
        match tier {
            ModelTier::Fast => &self.fast_model,
            ModelTier::Ranking => &self.ranking_model,
        }
    }

    /// Makes a raw call to the completions API, returning the full response object.
    /// Retries on network errors, 429 and 5xx with exponential backoff.
    pub async fn call(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = build_request(self.model_for(options.tier), prompt, options);

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat_response: ChatResponse = response.json().await?;

            if let Some(usage) = &chat_response.usage {
                debug!(
                    model = request_body.model,
                    "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                    usage.prompt_tokens,
                    usage.completion_tokens
                );
            }

            return Ok(chat_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl CompletionBackend for LlmClient {
    async fn complete(
        &self,
        prompt: &str,
        options: &CompletionOptions,
    ) -> Result<String, LlmError> {
        let response = self.call(prompt, options).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}

fn build_request<'a>(
    model: &'a str,
    prompt: &'a str,
    options: &CompletionOptions,
) -> ChatRequest<'a> {
    ChatRequest {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content: prompt,
        }],
        temperature: options.temperature,
        max_tokens: options.max_tokens,
        top_p: options.top_p,
        stream: false,
        response_format: ResponseFormat {
            kind: "json_object",
        },
    }
}

/// Drops a leading `<think>...</think>` block emitted by reasoning models.
fn strip_reasoning(text: &str) -> &str {
    let trimmed = text.trim_start();
    if trimmed.starts_with("<think>") {
        if let Some(end) = trimmed.find("</think>") {
            return &trimmed[end + "</think>".len()..];
        }
    }
    text
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
