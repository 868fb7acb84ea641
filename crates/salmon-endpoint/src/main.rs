//! salmon-endpoint server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `SALMON_*`
//! environment overrides, then serves the Salmon endpoint over HTTP with
//! WebFinger discovery and an in-memory comment store.
//!
//! ```toml
//! port = 8080
//! require_registration = false
//!
//! [webfinger]
//! timeout_secs = 10
//!
//! [[users]]
//! id = 1
//! display_name = "Alice"
//! url = "https://blog.example.org/~alice"
//! email = "alice@example.com"
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use salmon_core::{memory::MemoryStore, signature::AlwaysReject};
use salmon_endpoint::{AppState, ServerConfig};
use salmon_webfinger::WebFingerClient;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Salmon comment endpoint")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SALMON"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let resolver = WebFingerClient::new(&server_cfg.webfinger)
    .context("failed to build WebFinger client")?;
  let store = MemoryStore::with_users(server_cfg.users.clone());

  if server_cfg.enforce_signature {
    tracing::warn!("signature enforcement is on; no entry can currently validate");
  }

  let state = AppState {
    resolver:  Arc::new(resolver),
    store:     Arc::new(store),
    validator: Arc::new(AlwaysReject),
    config:    Arc::new(server_cfg.clone()),
  };

  let app = salmon_endpoint::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!(
    "Listening on http://{address}, advertised as {}/salmon",
    server_cfg.base_url.trim_end_matches('/')
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
