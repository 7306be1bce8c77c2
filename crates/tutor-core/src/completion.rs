//! The completion capability, a black box that turns a transcript into a
//! single reply.
//!
//! Implemented by model backends (e.g. `tutor-llm`). Request handlers depend
//! on this abstraction, not on any concrete provider.

use std::future::Future;

use serde::{Deserialize, Serialize};

/// Model used when a chat request does not name one.
pub const DEFAULT_MODEL: &str = "llama3.1:8b";

/// Who authored a message in the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
  System,
  User,
  Assistant,
}

/// One role-tagged message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
  pub role:    Role,
  pub content: String,
}

impl ChatMessage {
  pub fn system(content: impl Into<String>) -> Self {
    Self { role: Role::System, content: content.into() }
  }

  pub fn user(content: impl Into<String>) -> Self {
    Self { role: Role::User, content: content.into() }
  }

  pub fn assistant(content: impl Into<String>) -> Self {
    Self { role: Role::Assistant, content: content.into() }
  }
}

/// Input to [`CompletionProvider::complete`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionRequest {
  pub model:    String,
  /// Ordered transcript, system prompt first.
  pub messages: Vec<ChatMessage>,
}

/// The generated reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
  pub content: String,
}

/// Abstraction over a model-serving backend.
///
/// One call is one round trip; retries and backoff are not part of the
/// contract.
pub trait CompletionProvider: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Generate a single reply for `request.messages` using `request.model`.
  fn complete(
    &self,
    request: CompletionRequest,
  ) -> impl Future<Output = Result<Completion, Self::Error>> + Send + '_;

  /// Names of the models the backend can serve.
  fn list_models(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
