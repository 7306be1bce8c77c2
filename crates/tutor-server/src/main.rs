//! tutor-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite subject store, and serves the JSON API over HTTP, forwarding chats
//! to a local Ollama server.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use tutor_server::{ServerConfig, app, build_state};

#[derive(Parser)]
#[command(author, version, about = "Tutoring backend server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let server_cfg = ServerConfig::load(&cli.config)?;

  let state = build_state(&server_cfg).await?;
  tracing::info!(
    store = %server_cfg.store_path.display(),
    ollama = %server_cfg.ollama_url,
    model = %server_cfg.default_model,
    "subject store ready"
  );

  let app = app(state, &server_cfg);
  let address = server_cfg.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
