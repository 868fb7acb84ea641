//! POST handler: ingest one Salmon entry as a blog comment.
//!
//! parse + resolve → signature policy → map → registration policy → store.
//! Parse and mapping failures short-circuit before anything is stored.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use salmon_core::{
  comment::CommentId,
  mapper,
  store::{AccountResolver, CommentStore, UserDirectory},
};

use crate::{AppState, error::Error};

pub async fn handler<R, S>(
  state: &AppState<R, S>,
  body: &[u8],
) -> Result<Response, Error>
where
  R: AccountResolver + Clone + 'static,
  S: UserDirectory + CommentStore + Clone + 'static,
{
  ingest(state, body).await?;
  Ok((StatusCode::CREATED, "The Salmon entry was posted.").into_response())
}

/// Run the full pipeline and return the id the store assigned.
pub async fn ingest<R, S>(
  state: &AppState<R, S>,
  body: &[u8],
) -> Result<CommentId, Error>
where
  R: AccountResolver + Clone + 'static,
  S: UserDirectory + CommentStore + Clone + 'static,
{
  let entry = salmon_atom::from_atom(body, state.resolver.as_ref()).await?;

  if state.config.enforce_signature && !state.validator.validate(&entry) {
    tracing::warn!(id = entry.id().unwrap_or(""), "rejecting unsigned entry");
    return Err(Error::SignatureInvalid);
  }

  let submission = mapper::to_submission(&entry, state.store.as_ref()).await?;

  if submission.local_identity.is_none() && state.config.require_registration {
    tracing::warn!(
      author = entry.author_uri().unwrap_or(""),
      "rejecting comment from unregistered author"
    );
    return Err(Error::RegistrationRequired);
  }

  let post_id = submission.post_id;
  let user_id = submission.user_id();
  let id = state
    .store
    .submit_comment(submission)
    .await
    .map_err(|e| Error::Store(Box::new(e)))?;

  tracing::info!(%id, post_id, ?user_id, "salmon comment stored");
  Ok(id)
}
