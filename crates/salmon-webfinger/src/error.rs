//! Error types for WebFinger discovery.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid acct URI: {0:?}")]
  InvalidAcct(String),

  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("discovery endpoint returned {0}")]
  Status(reqwest::StatusCode),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
