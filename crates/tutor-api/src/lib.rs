//! JSON REST API for the tutoring backend.
//!
//! Exposes an axum [`Router`] backed by any [`SubjectStore`] and any
//! [`CompletionProvider`]. TLS, CORS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = tutor_api::api_router(state).layer(TraceLayer::new_for_http());
//! ```

pub mod chat;
pub mod error;
pub mod subjects;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use tutor_core::{completion::CompletionProvider, store::SubjectStore};

pub use error::ApiError;

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, C> {
  pub store:         Arc<S>,
  pub completion:    Arc<C>,
  /// Model used for chats that do not name one.
  pub default_model: Arc<str>,
}

// Manual impl: cloning only bumps the `Arc`s, so `S` and `C` need not be
// `Clone` themselves.
impl<S, C> Clone for AppState<S, C> {
  fn clone(&self) -> Self {
    Self {
      store:         Arc::clone(&self.store),
      completion:    Arc::clone(&self.completion),
      default_model: Arc::clone(&self.default_model),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, C>(state: AppState<S, C>) -> Router<()>
where
  S: SubjectStore + 'static,
  C: CompletionProvider + 'static,
{
  Router::new()
    .route("/health", get(chat::health))
    // Model proxy
    .route("/models", get(chat::models::<S, C>))
    .route("/chat", post(chat::chat::<S, C>))
    // Subjects
    .route("/subjects", get(subjects::list::<S, C>).post(subjects::create::<S, C>))
    .route(
      "/subjects/{id}",
      get(subjects::get_one::<S, C>).delete(subjects::delete_one::<S, C>),
    )
    .route("/subjects/{id}/progress", put(subjects::update_progress::<S, C>))
    .route("/subjects/{id}/touch", post(subjects::touch::<S, C>))
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
