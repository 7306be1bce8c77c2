//! Error types for `tutor-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("subject name must not be empty")]
  EmptyName,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
