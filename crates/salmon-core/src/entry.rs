//! A single Salmon entry and the account its author resolved to.
//!
//! [`EntryFields`] is the raw output of the Atom decoder. [`SalmonEntry`]
//! pairs it with the result of identity discovery; it is built once per
//! inbound request and never mutated afterwards.

use serde::{Deserialize, Serialize};

/// Recognised elements of an Atom `<entry>`. Every field is optional;
/// absence is a valid parse outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
  pub id:               Option<String>,
  /// `<author><name>`
  pub author_name:      Option<String>,
  /// `<author><uri>`, normally an `acct:` URI.
  pub author_uri:       Option<String>,
  pub thr_in_reply_to:  Option<String>,
  pub content:          Option<String>,
  pub title:            Option<String>,
  pub updated:          Option<String>,
  /// Opaque `<sal:signature>` blob.
  pub salmon_signature: Option<String>,
}

/// What identity discovery learned about an `acct:` URI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountDescriptor {
  /// The `acct:` subject the descriptor was issued for.
  pub subject:          String,
  /// Contact address used to match local accounts.
  pub email:            String,
  pub profile_page:     Option<String>,
  /// `magic-public-key` link, kept for signature verification.
  pub magic_public_key: Option<String>,
}

/// Outcome of identity discovery. Failures of any kind collapse into
/// [`Account::Unresolved`]; there is no partially populated descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Account {
  #[default]
  Unresolved,
  Resolved(AccountDescriptor),
}

impl Account {
  pub fn descriptor(&self) -> Option<&AccountDescriptor> {
    match self {
      Account::Resolved(d) => Some(d),
      Account::Unresolved => None,
    }
  }

  pub fn is_resolved(&self) -> bool { matches!(self, Account::Resolved(_)) }
}

/// A parsed entry together with its resolved author account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalmonEntry {
  fields:  EntryFields,
  account: Account,
}

impl SalmonEntry {
  pub fn new(fields: EntryFields, account: Account) -> Self {
    Self { fields, account }
  }

  pub fn fields(&self) -> &EntryFields { &self.fields }

  pub fn account(&self) -> &Account { &self.account }

  pub fn id(&self) -> Option<&str> { self.fields.id.as_deref() }

  pub fn author_name(&self) -> Option<&str> {
    self.fields.author_name.as_deref()
  }

  pub fn author_uri(&self) -> Option<&str> { self.fields.author_uri.as_deref() }

  pub fn thr_in_reply_to(&self) -> Option<&str> {
    self.fields.thr_in_reply_to.as_deref()
  }

  pub fn content(&self) -> Option<&str> { self.fields.content.as_deref() }

  pub fn title(&self) -> Option<&str> { self.fields.title.as_deref() }

  pub fn updated(&self) -> Option<&str> { self.fields.updated.as_deref() }

  pub fn salmon_signature(&self) -> Option<&str> {
    self.fields.salmon_signature.as_deref()
  }
}
