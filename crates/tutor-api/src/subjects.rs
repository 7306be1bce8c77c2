//! Handlers for `/subjects` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/subjects` | Most recently active first |
//! | `POST`   | `/subjects` | Body: `{"name":"Algebra","icon":"🔢"}`; `icon` optional |
//! | `GET`    | `/subjects/{id}` | 404 if not found |
//! | `DELETE` | `/subjects/{id}` | 204, or 404 if not found |
//! | `PUT`    | `/subjects/{id}/progress` | Body: `{"progress":40,"touch_timestamp":true}` |
//! | `POST`   | `/subjects/{id}/touch` | Marks the subject as just talked about |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use tracing::info;
use tutor_core::{
  completion::CompletionProvider,
  store::SubjectStore,
  subject::{NewSubject, SubjectId, SubjectView},
};

use crate::{AppState, error::ApiError};

fn not_found(id: SubjectId) -> ApiError {
  ApiError::NotFound(format!("subject {id} not found"))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /subjects`
pub async fn list<S, C>(
  State(state): State<AppState<S, C>>,
) -> Result<Json<Vec<SubjectView>>, ApiError>
where
  S: SubjectStore,
  C: CompletionProvider,
{
  let subjects = state
    .store
    .list_all()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(subjects))
}

// ─── Create ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name: String,
  pub icon: Option<String>,
}

/// `POST /subjects`: returns 201 + the new [`SubjectView`].
pub async fn create<S, C>(
  State(state): State<AppState<S, C>>,
  Json(body): Json<CreateBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SubjectStore,
  C: CompletionProvider,
{
  let input = NewSubject::new(body.name, body.icon.as_deref())?;
  let subject = state
    .store
    .create(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  info!(id = subject.id, name = %subject.name, "subject created");
  Ok((StatusCode::CREATED, Json(subject)))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /subjects/{id}`
pub async fn get_one<S, C>(
  State(state): State<AppState<S, C>>,
  Path(id): Path<SubjectId>,
) -> Result<Json<SubjectView>, ApiError>
where
  S: SubjectStore,
  C: CompletionProvider,
{
  let subject = state
    .store
    .get_by_id(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(subject))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /subjects/{id}`
pub async fn delete_one<S, C>(
  State(state): State<AppState<S, C>>,
  Path(id): Path<SubjectId>,
) -> Result<StatusCode, ApiError>
where
  S: SubjectStore,
  C: CompletionProvider,
{
  let removed = state
    .store
    .delete(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  if !removed {
    return Err(not_found(id));
  }
  info!(id, "subject deleted");
  Ok(StatusCode::NO_CONTENT)
}

// ─── Progress ─────────────────────────────────────────────────────────────────

fn default_touch() -> bool { true }

#[derive(Debug, Deserialize)]
pub struct ProgressBody {
  /// Clamped to `[0, 100]` by the store.
  pub progress:        i64,
  #[serde(default = "default_touch")]
  pub touch_timestamp: bool,
}

/// `PUT /subjects/{id}/progress`
pub async fn update_progress<S, C>(
  State(state): State<AppState<S, C>>,
  Path(id): Path<SubjectId>,
  Json(body): Json<ProgressBody>,
) -> Result<Json<SubjectView>, ApiError>
where
  S: SubjectStore,
  C: CompletionProvider,
{
  let subject = state
    .store
    .update_progress(id, body.progress, body.touch_timestamp)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(subject))
}

// ─── Touch ────────────────────────────────────────────────────────────────────

/// `POST /subjects/{id}/touch`
pub async fn touch<S, C>(
  State(state): State<AppState<S, C>>,
  Path(id): Path<SubjectId>,
) -> Result<Json<SubjectView>, ApiError>
where
  S: SubjectStore,
  C: CompletionProvider,
{
  let subject = state
    .store
    .touch_last_message(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(subject))
}
