//! Atom entry decoder for Salmon notifications.
//!
//! Turns a raw POST body into [`EntryFields`] and, through
//! [`from_atom`], into a [`SalmonEntry`] whose author has been run through
//! identity discovery. Parsing itself is pure and synchronous.
//!
//! ```no_run
//! let xml = b"<entry><author><name>Alice</name></author></entry>";
//! let fields = salmon_atom::parse(xml).unwrap();
//! assert_eq!(fields.author_name.as_deref(), Some("Alice"));
//! ```

pub mod error;
mod parse;

pub use error::{Error, Result};
use salmon_core::{
  entry::{Account, EntryFields, SalmonEntry},
  store::AccountResolver,
};

/// Decode the first `<entry>` in `input`.
pub fn parse(input: &[u8]) -> Result<EntryFields> { parse::parse_entry(input) }

/// Decode `input` and resolve its author exactly once.
///
/// An empty `<author><uri>` skips discovery and leaves the account
/// unresolved.
pub async fn from_atom<R>(input: &[u8], resolver: &R) -> Result<SalmonEntry>
where
  R: AccountResolver,
{
  let fields = parse(input)?;

  let acct = fields
    .author_uri
    .as_deref()
    .map(str::trim)
    .filter(|uri| !uri.is_empty());

  let account = match acct {
    Some(uri) => resolver.resolve(uri).await,
    None => Account::Unresolved,
  };

  tracing::debug!(
    id = fields.id.as_deref().unwrap_or(""),
    resolved = account.is_resolved(),
    "decoded salmon entry"
  );

  Ok(SalmonEntry::new(fields, account))
}
