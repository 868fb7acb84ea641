//! Collaborator traits consumed by the Salmon pipeline.
//!
//! Implemented by the WebFinger client, the blog's user table and the
//! comment datastore. The pipeline depends on these abstractions only.

use std::future::Future;

use crate::{
  comment::{CommentId, CommentSubmission, LocalUserProfile},
  entry::Account,
};

/// Identity discovery for `acct:` URIs.
///
/// Implementations must fail closed: transport errors, timeouts and
/// malformed identifiers all yield [`Account::Unresolved`].
pub trait AccountResolver: Send + Sync {
  fn resolve<'a>(
    &'a self,
    acct_uri: &'a str,
  ) -> impl Future<Output = Account> + Send + 'a;
}

/// Lookup of registered users by contact address.
pub trait UserDirectory: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the profile of the account registered with `email`, if any.
  fn find_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<LocalUserProfile>, Self::Error>> + Send + 'a;
}

/// The datastore that persists accepted comments.
pub trait CommentStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn submit_comment(
    &self,
    comment: CommentSubmission,
  ) -> impl Future<Output = Result<CommentId, Self::Error>> + Send + '_;
}
