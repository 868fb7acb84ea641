//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("malformed entry: {0}")]
  Malformed(#[from] salmon_atom::Error),
  #[error("entry does not reference a post")]
  MissingReplyTarget,
  #[error("signature did not validate")]
  SignatureInvalid,
  #[error("registration required")]
  RegistrationRequired,
  #[error("request body too large")]
  PayloadTooLarge,
  #[error("user directory error: {0}")]
  Directory(#[source] Box<dyn std::error::Error + Send + Sync>),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<salmon_core::Error> for Error {
  fn from(e: salmon_core::Error) -> Self {
    match e {
      salmon_core::Error::MissingReplyTarget => Error::MissingReplyTarget,
      salmon_core::Error::Directory(e) => Error::Directory(e),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::SignatureInvalid => (
        StatusCode::FORBIDDEN,
        "The posted Salmon entry's signature did not validate.",
      )
        .into_response(),
      Error::RegistrationRequired => (
        StatusCode::FORBIDDEN,
        "The blog settings only allow registered users to post comments.",
      )
        .into_response(),
      Error::Malformed(_) | Error::MissingReplyTarget => {
        (StatusCode::BAD_REQUEST, "The posted Salmon entry was malformed.")
          .into_response()
      }
      Error::PayloadTooLarge => {
        (StatusCode::PAYLOAD_TOO_LARGE, "request body too large").into_response()
      }
      Error::Directory(e) | Error::Store(e) => {
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
      }
    }
  }
}
