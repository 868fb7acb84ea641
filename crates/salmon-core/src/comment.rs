//! The comment record handed to the storage collaborator.

use std::fmt;

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier assigned by a [`CommentStore`](crate::store::CommentStore).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommentId(pub Uuid);

impl CommentId {
  pub fn new() -> Self { Self(Uuid::new_v4()) }
}

impl Default for CommentId {
  fn default() -> Self { Self::new() }
}

impl fmt::Display for CommentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

/// A registered account on this site.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalUserProfile {
  pub id:           u64,
  pub display_name: String,
  pub url:          String,
  pub email:        String,
}

/// Local account fields attached when the author matched a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalIdentity {
  pub user_id:        u64,
  /// The discovered address that matched the local account.
  pub verified_email: String,
}

/// A normalised comment ready for storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentSubmission {
  pub post_id:        u64,
  pub author:         Option<String>,
  pub author_url:     Option<String>,
  pub content:        Option<String>,
  /// Submission time in the offset the entry was written in.
  pub date:           DateTime<FixedOffset>,
  /// The same instant as `date`, normalised to UTC.
  pub date_gmt:       DateTime<Utc>,
  pub local_identity: Option<LocalIdentity>,
}

impl CommentSubmission {
  pub fn user_id(&self) -> Option<u64> {
    self.local_identity.as_ref().map(|l| l.user_id)
  }
}
