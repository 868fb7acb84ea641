//! Conversion of a [`SalmonEntry`] into a [`CommentSubmission`].
//!
//! When the author's account resolved and its contact address belongs to a
//! registered user, the local profile replaces the name and URL the entry
//! claimed. The discovery result is trusted as-is; nothing here binds it to
//! the entry's signature.

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::{
  comment::{CommentSubmission, LocalIdentity},
  entry::SalmonEntry,
  error::{Error, Result},
  store::UserDirectory,
};

/// Map `entry` to a comment, merging in the matching local account if any.
pub async fn to_submission<U>(
  entry: &SalmonEntry,
  users: &U,
) -> Result<CommentSubmission>
where
  U: UserDirectory,
{
  let post_id = entry
    .thr_in_reply_to()
    .and_then(reply_target)
    .ok_or(Error::MissingReplyTarget)?;

  let date = entry
    .updated()
    .and_then(parse_timestamp)
    .unwrap_or_else(|| Utc::now().fixed_offset());

  let mut submission = CommentSubmission {
    post_id,
    author: entry.author_name().map(str::to_owned),
    author_url: entry.author_uri().map(str::to_owned),
    content: entry.content().map(str::to_owned),
    date,
    date_gmt: date.with_timezone(&Utc),
    local_identity: None,
  };

  let Some(account) = entry.account().descriptor() else {
    return Ok(submission);
  };

  let profile = users
    .find_user_by_email(&account.email)
    .await
    .map_err(|e| Error::Directory(Box::new(e)))?;

  match profile {
    Some(user) => {
      tracing::debug!(user_id = user.id, "author matched a local account");
      submission.author = Some(user.display_name);
      submission.author_url = Some(user.url);
      submission.local_identity = Some(LocalIdentity {
        user_id:        user.id,
        verified_email: account.email.clone(),
      });
    }
    None => {
      tracing::debug!(email = %account.email, "no local account for author");
    }
  }

  Ok(submission)
}

/// Extract the post id from the first `p=<digits>` in a reply reference.
pub fn reply_target(reference: &str) -> Option<u64> {
  reference.match_indices("p=").find_map(|(i, _)| {
    let rest = &reference[i + 2..];
    let end = rest
      .find(|c: char| !c.is_ascii_digit())
      .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
      return None;
    }
    match digits.parse() {
      Ok(id) => Some(id),
      Err(e) => {
        tracing::debug!(digits, error = %e, "ignoring out-of-range post id");
        None
      }
    }
  })
}

/// Parse an Atom `<updated>` value.
///
/// Accepts RFC 3339, RFC 2822, and offset-less `YYYY-MM-DD[T ]HH:MM:SS`
/// (read as UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
  let value = value.trim();
  if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
    return Some(dt);
  }
  if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
    return Some(dt);
  }
  ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    .map(|naive| naive.and_utc().fixed_offset())
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Timelike};

  use super::*;
  use crate::{
    comment::LocalUserProfile,
    entry::{Account, AccountDescriptor, EntryFields},
    memory::MemoryStore,
  };

  fn alice_fields() -> EntryFields {
    EntryFields {
      author_name: Some("Alice".into()),
      author_uri: Some("acct:alice@example.com".into()),
      thr_in_reply_to: Some("tag:blog,p=7".into()),
      content: Some("Hi".into()),
      updated: Some("2023-01-01T00:00:00Z".into()),
      ..Default::default()
    }
  }

  fn resolved(email: &str) -> Account {
    Account::Resolved(AccountDescriptor {
      subject:          "acct:alice@example.com".into(),
      email:            email.into(),
      profile_page:     None,
      magic_public_key: None,
    })
  }

  fn local_alice() -> LocalUserProfile {
    LocalUserProfile {
      id:           9,
      display_name: "Alice R.".into(),
      url:          "https://blog.example.org/~alice".into(),
      email:        "alice@example.com".into(),
    }
  }

  #[test]
  fn reply_target_finds_first_post_id() {
    assert_eq!(reply_target("p=42"), Some(42));
    assert_eq!(reply_target("tag:blog,p=7"), Some(7));
    assert_eq!(reply_target("http://blog/?p=12&p=13"), Some(12));
    assert_eq!(reply_target("http://blog/?p=&p=5"), Some(5));
  }

  #[test]
  fn reply_target_requires_digits() {
    assert_eq!(reply_target(""), None);
    assert_eq!(reply_target("tag:blog,post=abc"), None);
    assert_eq!(reply_target("p=x"), None);
  }

  #[test]
  fn out_of_range_post_id_is_skipped() {
    assert_eq!(reply_target("tag:blog,p=123456789012345678901234"), None);
    assert_eq!(reply_target("p=123456789012345678901234&p=4"), Some(4));
  }

  #[test]
  fn parses_timestamps_with_offsets() {
    let dt = parse_timestamp("2023-01-01T02:00:00+02:00").unwrap();
    assert_eq!(dt.offset().local_minus_utc(), 7200);
    assert_eq!(
      dt.with_timezone(&Utc),
      Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap()
    );
  }

  #[test]
  fn parses_offsetless_timestamp_as_utc() {
    let dt = parse_timestamp("2023-01-01 05:30:00").unwrap();
    assert_eq!(dt.offset().local_minus_utc(), 0);
    assert_eq!(dt.hour(), 5);
    assert!(parse_timestamp("yesterday").is_none());
  }

  #[tokio::test]
  async fn unresolved_author_keeps_entry_fields() {
    let entry = SalmonEntry::new(alice_fields(), Account::Unresolved);
    let users = MemoryStore::with_users(vec![local_alice()]);

    let sub = to_submission(&entry, &users).await.unwrap();
    assert_eq!(sub.post_id, 7);
    assert_eq!(sub.author.as_deref(), Some("Alice"));
    assert_eq!(sub.author_url.as_deref(), Some("acct:alice@example.com"));
    assert_eq!(sub.content.as_deref(), Some("Hi"));
    assert_eq!(sub.date_gmt, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
    assert_eq!(sub.date, sub.date_gmt);
    assert!(sub.local_identity.is_none());
  }

  #[tokio::test]
  async fn matching_local_account_overrides_author() {
    let entry = SalmonEntry::new(alice_fields(), resolved("alice@example.com"));
    let users = MemoryStore::with_users(vec![local_alice()]);

    let sub = to_submission(&entry, &users).await.unwrap();
    assert_eq!(sub.author.as_deref(), Some("Alice R."));
    assert_eq!(sub.author_url.as_deref(), Some("https://blog.example.org/~alice"));
    assert_eq!(sub.user_id(), Some(9));
    assert_eq!(
      sub.local_identity.unwrap().verified_email,
      "alice@example.com"
    );
  }

  #[tokio::test]
  async fn resolved_but_unknown_account_stays_anonymous() {
    let entry = SalmonEntry::new(alice_fields(), resolved("stranger@example.net"));
    let users = MemoryStore::with_users(vec![local_alice()]);

    let sub = to_submission(&entry, &users).await.unwrap();
    assert_eq!(sub.author.as_deref(), Some("Alice"));
    assert!(sub.local_identity.is_none());
  }

  #[tokio::test]
  async fn missing_reply_target_fails() {
    let fields = EntryFields {
      thr_in_reply_to: Some("tag:blog,post-7".into()),
      ..alice_fields()
    };
    let entry = SalmonEntry::new(fields, Account::Unresolved);
    let err = to_submission(&entry, &MemoryStore::new()).await.unwrap_err();
    assert!(matches!(err, Error::MissingReplyTarget));

    let entry = SalmonEntry::new(EntryFields::default(), Account::Unresolved);
    let err = to_submission(&entry, &MemoryStore::new()).await.unwrap_err();
    assert!(matches!(err, Error::MissingReplyTarget));
  }

  #[tokio::test]
  async fn unparseable_updated_falls_back_to_now() {
    let fields = EntryFields {
      updated: Some("not a date".into()),
      ..alice_fields()
    };
    let before = Utc::now();
    let entry = SalmonEntry::new(fields, Account::Unresolved);
    let sub = to_submission(&entry, &MemoryStore::new()).await.unwrap();
    assert!(sub.date_gmt >= before);
  }
}
