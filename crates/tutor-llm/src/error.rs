//! Error type for `tutor-llm`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The server answered, but not with a success status.
  #[error("model server returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("model server returned an empty reply")]
  EmptyReply,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
