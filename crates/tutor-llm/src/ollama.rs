//! [`OllamaClient`], the Ollama implementation of [`CompletionProvider`].
//!
//! All Ollama wire types are private to this module; callers only see
//! [`tutor_core::completion`] types.

use std::time::Duration;

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use tutor_core::completion::{
  ChatMessage, Completion, CompletionProvider, CompletionRequest,
};

use crate::{Error, Result};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Connection settings for an Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
  /// e.g. `http://localhost:11434`
  pub base_url: String,
  /// Upper bound for one completion round trip.
  pub timeout:  Duration,
}

impl Default for OllamaConfig {
  fn default() -> Self {
    Self {
      base_url: "http://localhost:11434".to_owned(),
      timeout:  Duration::from_secs(120),
    }
  }
}

// ─── Client ───────────────────────────────────────────────────────────────────

/// Async HTTP client for the Ollama chat API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Debug, Clone)]
pub struct OllamaClient {
  client:   Client,
  base_url: String,
}

impl OllamaClient {
  pub fn new(config: OllamaConfig) -> Result<Self> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self {
      client,
      base_url: config.base_url.trim_end_matches('/').to_owned(),
    })
  }

  fn url(&self, path: &str) -> String { format!("{}{path}", self.base_url) }
}

/// Turn a non-2xx response into [`Error::Status`], keeping the body text.
async fn check_status(resp: Response) -> Result<Response> {
  let status = resp.status();
  if status.is_success() {
    return Ok(resp);
  }
  let body = resp.text().await.unwrap_or_default();
  warn!(status = status.as_u16(), %body, "model server rejected request");
  Err(Error::Status { status: status.as_u16(), body })
}

// ─── CompletionProvider impl ─────────────────────────────────────────────────

impl CompletionProvider for OllamaClient {
  type Error = Error;

  async fn complete(&self, request: CompletionRequest) -> Result<Completion> {
    let payload = ChatRequest {
      model:    &request.model,
      messages: &request.messages,
      stream:   false,
    };
    debug!(
      model = %request.model,
      messages = request.messages.len(),
      "sending chat request"
    );

    let resp = self
      .client
      .post(self.url("/api/chat"))
      .json(&payload)
      .send()
      .await?;
    let parsed: ChatResponse = check_status(resp).await?.json().await?;

    let content = parsed
      .message
      .map(|m| m.content)
      .filter(|c| !c.trim().is_empty())
      .ok_or(Error::EmptyReply)?;

    debug!(reply_len = content.len(), "received chat reply");
    Ok(Completion { content })
  }

  async fn list_models(&self) -> Result<Vec<String>> {
    let resp = self.client.get(self.url("/api/tags")).send().await?;
    let parsed: TagsResponse = check_status(resp).await?.json().await?;
    Ok(parsed.models.into_iter().map(|m| m.name).collect())
  }
}

// ─── Private wire types ───────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
  model:    &'a str,
  messages: &'a [ChatMessage],
  stream:   bool,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
  message: Option<ReplyMessage>,
}

#[derive(Debug, Deserialize)]
struct ReplyMessage {
  content: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
  #[serde(default)]
  models: Vec<ModelTag>,
}

#[derive(Debug, Deserialize)]
struct ModelTag {
  name: String,
}
