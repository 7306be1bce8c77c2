//! Ollama-backed [`CompletionProvider`](tutor_core::completion::CompletionProvider).
//!
//! Talks to a locally hosted Ollama server over its native JSON API:
//! `POST /api/chat` (non-streaming) and `GET /api/tags`.

mod ollama;

pub mod error;

pub use error::{Error, Result};
pub use ollama::{OllamaClient, OllamaConfig};
