//! Error types for `salmon-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("entry has no p=<digits> reply target")]
  MissingReplyTarget,

  #[error("user directory error: {0}")]
  Directory(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
