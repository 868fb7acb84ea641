//! Signature policy for inbound entries.
//!
//! Nobody signs Salmon entries with verifiable keys yet, so the only policy
//! shipped is [`AlwaysReject`]. A real verifier checks
//! [`SalmonEntry::salmon_signature`] against the author's
//! `magic-public-key` and plugs in through the same trait.

use crate::entry::SalmonEntry;

pub trait SignatureValidator: Send + Sync {
  /// Whether the entry's signature verifies.
  fn validate(&self, entry: &SalmonEntry) -> bool;
}

/// Treats every entry as unsigned.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysReject;

impl SignatureValidator for AlwaysReject {
  fn validate(&self, entry: &SalmonEntry) -> bool {
    tracing::debug!(
      has_signature = entry.salmon_signature().is_some(),
      "signature verification unavailable, rejecting entry"
    );
    false
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::entry::{Account, AccountDescriptor, EntryFields};

  #[test]
  fn rejects_unsigned_entry() {
    let entry = SalmonEntry::new(EntryFields::default(), Account::Unresolved);
    assert!(!AlwaysReject.validate(&entry));
  }

  #[test]
  fn rejects_entry_with_signature_blob() {
    let fields = EntryFields {
      salmon_signature: Some("EvGSD2vi8qYcveHnb-rrlok07qnCXjn8YSeCDDXlbhILSabgvNsPpbe76up8w63i2fWHvLKJzeGLKfyHg8ZomQ".into()),
      author_uri: Some("acct:alice@example.com".into()),
      ..Default::default()
    };
    let account = Account::Resolved(AccountDescriptor {
      subject:          "acct:alice@example.com".into(),
      email:            "alice@example.com".into(),
      profile_page:     None,
      magic_public_key: Some("data:application/magic-public-key,RSA.mVgY.AQAB".into()),
    });
    assert!(!AlwaysReject.validate(&SalmonEntry::new(fields, account)));
  }
}
