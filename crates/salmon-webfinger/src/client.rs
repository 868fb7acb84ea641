//! HTTP client for `/.well-known/webfinger`.

use std::{future::Future, time::Duration};

use reqwest::{Client, header};
use salmon_core::{
  entry::{Account, AccountDescriptor},
  store::AccountResolver,
};
use serde::Deserialize;

use crate::{
  acct::AcctUri,
  error::{Error, Result},
  jrd::Jrd,
};

fn default_timeout_secs() -> u64 { 10 }

/// Discovery settings, deserialised from the `[webfinger]` config table.
#[derive(Debug, Clone, Deserialize)]
pub struct WebFingerConfig {
  #[serde(default = "default_timeout_secs")]
  pub timeout_secs: u64,
  /// Query hosts over plain `http://`. Only useful against local test
  /// servers.
  #[serde(default)]
  pub allow_http:   bool,
}

impl Default for WebFingerConfig {
  fn default() -> Self {
    Self {
      timeout_secs: default_timeout_secs(),
      allow_http:   false,
    }
  }
}

/// Resolves `acct:` URIs against the account's host.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct WebFingerClient {
  client: Client,
  scheme: &'static str,
}

impl WebFingerClient {
  pub fn new(config: &WebFingerConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(config.timeout_secs))
      .build()?;
    let scheme = if config.allow_http { "http" } else { "https" };
    Ok(Self { client, scheme })
  }

  fn endpoint(&self, acct: &AcctUri) -> String {
    format!("{}://{}/.well-known/webfinger", self.scheme, acct.host)
  }

  /// Fetch and interpret the JRD for `acct_uri`.
  pub async fn lookup(&self, acct_uri: &str) -> Result<AccountDescriptor> {
    let acct = AcctUri::parse(acct_uri)?;

    let resp = self
      .client
      .get(self.endpoint(&acct))
      .query(&[("resource", acct.to_string())])
      .header(header::ACCEPT, "application/jrd+json, application/json")
      .send()
      .await?;

    if !resp.status().is_success() {
      return Err(Error::Status(resp.status()));
    }

    let jrd: Jrd = resp.json().await?;
    Ok(jrd.into_descriptor(&acct))
  }
}

impl AccountResolver for WebFingerClient {
  fn resolve<'a>(
    &'a self,
    acct_uri: &'a str,
  ) -> impl Future<Output = Account> + Send + 'a {
    async move {
      match self.lookup(acct_uri).await {
        Ok(descriptor) => {
          tracing::debug!(acct = acct_uri, email = %descriptor.email, "resolved account");
          Account::Resolved(descriptor)
        }
        Err(e) => {
          tracing::warn!(acct = acct_uri, error = %e, "webfinger discovery failed");
          Account::Unresolved
        }
      }
    }
  }
}
