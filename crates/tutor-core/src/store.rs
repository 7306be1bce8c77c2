//! The `SubjectStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `tutor-store-sqlite`).
//! Request handlers depend on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::subject::{NewSubject, SubjectId, SubjectView};

/// Abstraction over a subject store backend.
///
/// Every operation is atomic: it either commits completely or leaves no trace.
/// An unknown id is reported as `None` (or `false` for [`Self::delete`]),
/// never as an error.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait SubjectStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Ensure the schema exists. Idempotent; safe on every process start.
  fn initialize(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Persist a new subject with zero progress and return its view.
  fn create(
    &self,
    input: NewSubject,
  ) -> impl Future<Output = Result<SubjectView, Self::Error>> + Send + '_;

  /// All subjects, most recently active first; never-active subjects last,
  /// newer before older.
  fn list_all(
    &self,
  ) -> impl Future<Output = Result<Vec<SubjectView>, Self::Error>> + Send + '_;

  /// Retrieve one subject. Returns `None` if not found.
  fn get_by_id(
    &self,
    id: SubjectId,
  ) -> impl Future<Output = Result<Option<SubjectView>, Self::Error>> + Send + '_;

  /// Set progress, clamped to `[0, 100]`. When `touch_timestamp` is set the
  /// last-message time also moves to now.
  fn update_progress(
    &self,
    id: SubjectId,
    progress: i64,
    touch_timestamp: bool,
  ) -> impl Future<Output = Result<Option<SubjectView>, Self::Error>> + Send + '_;

  /// Set the last-message time to now, leaving progress alone.
  fn touch_last_message(
    &self,
    id: SubjectId,
  ) -> impl Future<Output = Result<Option<SubjectView>, Self::Error>> + Send + '_;

  /// Hard-delete a subject. Returns whether a row was removed.
  fn delete(
    &self,
    id: SubjectId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
