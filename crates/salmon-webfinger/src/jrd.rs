//! JSON Resource Descriptor (RFC 7033) documents.

use salmon_core::entry::AccountDescriptor;
use serde::Deserialize;

use crate::acct::AcctUri;

pub const REL_PROFILE_PAGE: &str = "http://webfinger.net/rel/profile-page";
pub const REL_MAGIC_PUBLIC_KEY: &str = "magic-public-key";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Jrd {
  pub subject: Option<String>,
  #[serde(default)]
  pub aliases: Vec<String>,
  #[serde(default)]
  pub links:   Vec<Link>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Link {
  pub rel:        Option<String>,
  pub href:       Option<String>,
  #[serde(rename = "type")]
  pub media_type: Option<String>,
}

impl Jrd {
  fn link_href(&self, rel: &str) -> Option<&str> {
    self
      .links
      .iter()
      .find(|l| l.rel.as_deref() == Some(rel))
      .and_then(|l| l.href.as_deref())
  }

  /// First `mailto:` address on `host` among the aliases and link hrefs.
  fn mailto(&self, host: &str) -> Option<&str> {
    self
      .aliases
      .iter()
      .map(String::as_str)
      .chain(self.links.iter().filter_map(|l| l.href.as_deref()))
      .find_map(|uri| {
        let scheme = uri.get(..7)?;
        if !scheme.eq_ignore_ascii_case("mailto:") {
          return None;
        }
        let addr = &uri[7..];
        let (user, domain) = addr.rsplit_once('@')?;
        (!user.is_empty() && domain.eq_ignore_ascii_case(host)).then_some(addr)
      })
  }

  /// Build the descriptor for `queried`.
  ///
  /// A host only speaks for its own domain: a `subject` or `mailto:`
  /// address on any other host is ignored. The contact address is the
  /// first such `mailto:` URI, then the `acct:` subject, then the queried
  /// identifier itself.
  pub fn into_descriptor(self, queried: &AcctUri) -> AccountDescriptor {
    let subject_acct = self
      .subject
      .as_deref()
      .and_then(|s| AcctUri::parse(s).ok())
      .filter(|acct| acct.host.eq_ignore_ascii_case(&queried.host));

    let email = match self.mailto(&queried.host) {
      Some(addr) => addr.to_string(),
      None => subject_acct
        .as_ref()
        .unwrap_or(queried)
        .address(),
    };

    AccountDescriptor {
      subject: subject_acct.unwrap_or_else(|| queried.clone()).to_string(),
      email,
      profile_page: self.link_href(REL_PROFILE_PAGE).map(str::to_owned),
      magic_public_key: self
        .link_href(REL_MAGIC_PUBLIC_KEY)
        .map(str::to_owned),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn queried() -> AcctUri { AcctUri::parse("acct:alice@example.com").unwrap() }

  #[test]
  fn reads_profile_and_key_links() {
    let jrd: Jrd = serde_json::from_str(
      r#"{
        "subject": "acct:alice@example.com",
        "aliases": ["https://example.com/alice"],
        "links": [
          {"rel": "http://webfinger.net/rel/profile-page", "type": "text/html", "href": "https://example.com/alice"},
          {"rel": "magic-public-key", "href": "data:application/magic-public-key,RSA.mVgY.AQAB"}
        ]
      }"#,
    )
    .unwrap();

    let d = jrd.into_descriptor(&queried());
    assert_eq!(d.subject, "acct:alice@example.com");
    assert_eq!(d.email, "alice@example.com");
    assert_eq!(d.profile_page.as_deref(), Some("https://example.com/alice"));
    assert_eq!(
      d.magic_public_key.as_deref(),
      Some("data:application/magic-public-key,RSA.mVgY.AQAB")
    );
  }

  #[test]
  fn mailto_alias_wins_over_subject() {
    let jrd: Jrd = serde_json::from_str(
      r#"{"subject": "acct:alice@example.com", "aliases": ["mailto:alice.r@EXAMPLE.com"]}"#,
    )
    .unwrap();
    assert_eq!(jrd.into_descriptor(&queried()).email, "alice.r@EXAMPLE.com");
  }

  #[test]
  fn cross_host_mailto_is_ignored() {
    let jrd: Jrd = serde_json::from_str(
      r#"{"subject": "acct:alice@example.com", "aliases": ["mailto:admin@blog.example.org"]}"#,
    )
    .unwrap();
    assert_eq!(jrd.into_descriptor(&queried()).email, "alice@example.com");
  }

  #[test]
  fn canonical_subject_on_same_host_is_kept() {
    let jrd: Jrd =
      serde_json::from_str(r#"{"subject": "acct:Alice.Smith@Example.com"}"#).unwrap();
    let d = jrd.into_descriptor(&queried());
    assert_eq!(d.email, "Alice.Smith@Example.com");
    assert_eq!(d.subject, "acct:Alice.Smith@Example.com");
  }

  #[test]
  fn cross_host_subject_is_ignored() {
    let mallory = AcctUri::parse("acct:mallory@attacker.example").unwrap();
    let jrd: Jrd =
      serde_json::from_str(r#"{"subject": "acct:admin@blog.example.org"}"#).unwrap();
    let d = jrd.into_descriptor(&mallory);
    assert_eq!(d.subject, "acct:mallory@attacker.example");
    assert_eq!(d.email, "mallory@attacker.example");
  }

  #[test]
  fn empty_document_falls_back_to_query() {
    let jrd: Jrd = serde_json::from_str("{}").unwrap();
    let d = jrd.into_descriptor(&queried());
    assert_eq!(d.subject, "acct:alice@example.com");
    assert_eq!(d.email, "alice@example.com");
    assert_eq!(d.profile_page, None);
  }
}
