//! In-memory [`UserDirectory`] and [`CommentStore`].
//!
//! Stands in for the blog datastore in the server binary and in tests.

use std::{
  collections::HashMap,
  convert::Infallible,
  future::{Future, ready},
  sync::{Arc, PoisonError, RwLock},
};

use crate::{
  comment::{CommentId, CommentSubmission, LocalUserProfile},
  store::{CommentStore, UserDirectory},
};

/// Cloning is cheap; clones share the same users and comments.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
  users:    Arc<RwLock<Vec<LocalUserProfile>>>,
  comments: Arc<RwLock<HashMap<CommentId, CommentSubmission>>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  pub fn with_users(users: Vec<LocalUserProfile>) -> Self {
    Self {
      users: Arc::new(RwLock::new(users)),
      ..Self::default()
    }
  }

  pub fn add_user(&self, user: LocalUserProfile) {
    self
      .users
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .push(user);
  }

  pub fn comment(&self, id: CommentId) -> Option<CommentSubmission> {
    self
      .comments
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .get(&id)
      .cloned()
  }

  pub fn comments(&self) -> Vec<(CommentId, CommentSubmission)> {
    self
      .comments
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .iter()
      .map(|(id, c)| (*id, c.clone()))
      .collect()
  }
}

impl UserDirectory for MemoryStore {
  type Error = Infallible;

  fn find_user_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<Option<LocalUserProfile>, Self::Error>> + Send + 'a
  {
    let found = self
      .users
      .read()
      .unwrap_or_else(PoisonError::into_inner)
      .iter()
      .find(|u| u.email.eq_ignore_ascii_case(email))
      .cloned();
    ready(Ok(found))
  }
}

impl CommentStore for MemoryStore {
  type Error = Infallible;

  fn submit_comment(
    &self,
    comment: CommentSubmission,
  ) -> impl Future<Output = Result<CommentId, Self::Error>> + Send + '_ {
    let id = CommentId::new();
    self
      .comments
      .write()
      .unwrap_or_else(PoisonError::into_inner)
      .insert(id, comment);
    ready(Ok(id))
  }
}
