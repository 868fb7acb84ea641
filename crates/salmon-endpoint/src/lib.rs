//! HTTP endpoint for the Salmon protocol.
//!
//! Exposes an axum [`Router`] that accepts Atom-encoded Salmon entries and
//! files them as comments through any [`CommentStore`], resolving authors
//! with an [`AccountResolver`] and matching them against a
//! [`UserDirectory`].

pub mod error;
pub mod handlers;

pub use error::Error;

use std::sync::Arc;

use axum::{
  Router,
  body::Body,
  extract::{Request, State},
  http::StatusCode,
  response::{IntoResponse, Response},
  routing::any,
};
use bytes::Bytes;
use salmon_core::{
  comment::LocalUserProfile,
  signature::SignatureValidator,
  store::{AccountResolver, CommentStore, UserDirectory},
};
use salmon_webfinger::WebFingerConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use handlers::{options, post};

// ─── Configuration ────────────────────────────────────────────────────────────

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }
fn default_base_url() -> String { "http://localhost:8080".to_string() }
fn default_max_body_bytes() -> usize { 1024 * 1024 }

/// Runtime server configuration, deserialised from `config.toml` and
/// `SALMON_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  #[serde(default = "default_base_url")]
  pub base_url:             String,
  /// Reject entries whose signature does not validate.
  #[serde(default)]
  pub enforce_signature:    bool,
  /// Reject comments whose author is not a registered user.
  #[serde(default)]
  pub require_registration: bool,
  #[serde(default = "default_max_body_bytes")]
  pub max_body_bytes:       usize,
  #[serde(default)]
  pub webfinger:            WebFingerConfig,
  /// Registered users loaded into the in-memory directory.
  #[serde(default)]
  pub users:                Vec<LocalUserProfile>,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:                 default_host(),
      port:                 default_port(),
      base_url:             default_base_url(),
      enforce_signature:    false,
      require_registration: false,
      max_body_bytes:       default_max_body_bytes(),
      webfinger:            WebFingerConfig::default(),
      users:                Vec::new(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<R, S> {
  pub resolver:  Arc<R>,
  pub store:     Arc<S>,
  pub validator: Arc<dyn SignatureValidator>,
  pub config:    Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build an axum [`Router`] serving the Salmon endpoint at `/salmon`.
pub fn router<R, S>(state: AppState<R, S>) -> Router
where
  R: AccountResolver + Clone + 'static,
  S: UserDirectory + CommentStore + Clone + 'static,
{
  Router::new()
    .route("/salmon",         any(salmon_handler::<R, S>))
    .route("/salmon/",        any(salmon_handler::<R, S>))
    .route("/salmon/{*rest}", any(salmon_handler::<R, S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

async fn collect_body(req: Request<Body>, limit: usize) -> Result<Bytes, Error> {
  axum::body::to_bytes(req.into_body(), limit)
    .await
    .map_err(|_| Error::PayloadTooLarge)
}

async fn salmon_handler<R, S>(
  State(state): State<AppState<R, S>>,
  req: Request<Body>,
) -> Response
where
  R: AccountResolver + Clone + 'static,
  S: UserDirectory + CommentStore + Clone + 'static,
{
  let method = req.method().clone();
  match method.as_str() {
    "OPTIONS" => options::handler(req.headers()),
    "POST" => {
      let body = match collect_body(req, state.config.max_body_bytes).await {
        Ok(b) => b,
        Err(e) => return e.into_response(),
      };
      post::handler(&state, &body).await.into_response_or_err()
    }
    _ => StatusCode::METHOD_NOT_ALLOWED.into_response(),
  }
}

// ─── Helper trait ────────────────────────────────────────────────────────────

trait IntoResponseOrErr {
  fn into_response_or_err(self) -> Response;
}

impl IntoResponseOrErr for Result<Response, Error> {
  fn into_response_or_err(self) -> Response {
    match self {
      Ok(r) => r,
      Err(e) => {
        tracing::debug!(error = %e, "salmon request failed");
        e.into_response()
      }
    }
  }
}

// ─── Integration tests ────────────────────────────────────────────────────────
