//! `acct:` URI parsing.

use std::fmt;

use crate::error::{Error, Result};

/// A parsed `acct:user@host` identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcctUri {
  pub user: String,
  /// Host, possibly with a `:port` suffix.
  pub host: String,
}

impl AcctUri {
  /// Parse `acct:user@host` or a bare `user@host`.
  pub fn parse(input: &str) -> Result<Self> {
    let invalid = || Error::InvalidAcct(input.to_string());
    let trimmed = input.trim();

    let rest = match trimmed.get(..5) {
      Some(scheme) if scheme.eq_ignore_ascii_case("acct:") => &trimmed[5..],
      _ => trimmed,
    };

    let (user, host) = rest.rsplit_once('@').ok_or_else(invalid)?;
    if user.is_empty() || host.is_empty() {
      return Err(invalid());
    }
    let bad = |c: char| c.is_whitespace() || matches!(c, '/' | '?' | '#');
    if rest.contains(bad) {
      return Err(invalid());
    }

    Ok(Self {
      user: user.to_string(),
      host: host.to_string(),
    })
  }

  /// `user@host`, the form used as a contact address.
  pub fn address(&self) -> String { format!("{}@{}", self.user, self.host) }
}

impl fmt::Display for AcctUri {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "acct:{}@{}", self.user, self.host)
  }
}
