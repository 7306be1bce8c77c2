//! Handlers for the model-facing endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/chat` | Body: [`ChatBody`]; returns `{"message":"...","model":"..."}` |
//! | `GET`  | `/models` | Models the completion backend can serve |

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{debug, error, warn};
use tutor_core::{
  completion::{ChatMessage, CompletionProvider, CompletionRequest},
  prompt::TutorCategory,
  store::SubjectStore,
  subject::SubjectId,
};

use crate::{AppState, error::ApiError};

// ─── Chat ─────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /chat`.
#[derive(Debug, Deserialize)]
pub struct ChatBody {
  /// The conversation so far, oldest first.
  pub messages:   Vec<ChatMessage>,
  /// Model id; the server default when absent or blank.
  pub model:      Option<String>,
  /// Category key choosing the system prompt, e.g. `"math"`.
  pub subject:    Option<String>,
  /// When set, the subject must exist and is marked active after a reply.
  pub subject_id: Option<SubjectId>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
  pub message: String,
  pub model:   String,
}

/// `POST /chat`: prepend the tutoring prompt and forward to the model.
pub async fn chat<S, C>(
  State(state): State<AppState<S, C>>,
  Json(body): Json<ChatBody>,
) -> Result<Json<ChatReply>, ApiError>
where
  S: SubjectStore,
  C: CompletionProvider,
{
  if body.messages.is_empty() {
    return Err(ApiError::BadRequest("messages must not be empty".into()));
  }

  if let Some(id) = body.subject_id {
    state
      .store
      .get_by_id(id)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?
      .ok_or_else(|| ApiError::NotFound(format!("subject {id} not found")))?;
  }

  let model = body
    .model
    .filter(|m| !m.trim().is_empty())
    .unwrap_or_else(|| state.default_model.to_string());
  let category = TutorCategory::from_key(body.subject.as_deref());

  let mut messages = Vec::with_capacity(body.messages.len() + 1);
  messages.push(ChatMessage::system(category.system_prompt()));
  messages.extend(body.messages);

  debug!(%model, %category, turns = messages.len(), "forwarding chat");
  let completion = state
    .completion
    .complete(CompletionRequest { model: model.clone(), messages })
    .await
    .map_err(|e| {
      error!(%model, error = %e, "completion failed");
      ApiError::Upstream(Box::new(e))
    })?;

  if let Some(id) = body.subject_id {
    let touched = state
      .store
      .touch_last_message(id)
      .await
      .map_err(|e| ApiError::Store(Box::new(e)))?;
    if touched.is_none() {
      warn!(id, "subject disappeared during chat");
    }
  }

  Ok(Json(ChatReply { message: completion.content, model }))
}

// ─── Models ───────────────────────────────────────────────────────────────────

/// `GET /models`
pub async fn models<S, C>(
  State(state): State<AppState<S, C>>,
) -> Result<Json<Value>, ApiError>
where
  S: SubjectStore,
  C: CompletionProvider,
{
  let models = state.completion.list_models().await.map_err(|e| {
    error!(error = %e, "listing models failed");
    ApiError::Upstream(Box::new(e))
  })?;
  Ok(Json(json!({ "models": models })))
}

// ─── Health ───────────────────────────────────────────────────────────────────

/// `GET /health`
pub async fn health() -> Json<Value> { Json(json!({ "status": "healthy" })) }
