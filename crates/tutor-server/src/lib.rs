//! Process wiring for the tutoring backend: configuration, state
//! construction, and the HTTP middleware stack around [`tutor_api`].

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use axum::Router;
use serde::Deserialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tutor_api::AppState;
use tutor_core::completion::DEFAULT_MODEL;
use tutor_llm::{OllamaClient, OllamaConfig};
use tutor_store_sqlite::SqliteStore;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `TUTOR_*` environment variables. Every key has a default.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                 String,
  #[serde(default = "default_port")]
  pub port:                 u16,
  #[serde(default = "default_store_path")]
  pub store_path:           PathBuf,
  #[serde(default = "default_ollama_url")]
  pub ollama_url:           String,
  #[serde(default = "default_model")]
  pub default_model:        String,
  #[serde(default = "default_timeout")]
  pub request_timeout_secs: u64,
  /// Allow any origin; the mobile client talks to the server directly.
  #[serde(default = "default_cors")]
  pub cors_permissive:      bool,
}

fn default_host() -> String { "0.0.0.0".to_owned() }
fn default_port() -> u16 { 8000 }
fn default_store_path() -> PathBuf { PathBuf::from("tutor.db") }
fn default_ollama_url() -> String { OllamaConfig::default().base_url }
fn default_model() -> String { DEFAULT_MODEL.to_owned() }
fn default_timeout() -> u64 { OllamaConfig::default().timeout.as_secs() }
fn default_cors() -> bool { true }

impl ServerConfig {
  /// Layer the optional TOML file at `path` under `TUTOR_*` environment
  /// variables.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("TUTOR").try_parsing(true))
      .build()
      .context("failed to read config file")?;

    settings
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── State ────────────────────────────────────────────────────────────────────

/// Open the SQLite store and build the Ollama client described by `config`.
pub async fn build_state(
  config: &ServerConfig,
) -> anyhow::Result<AppState<SqliteStore, OllamaClient>> {
  let store_path = expand_tilde(&config.store_path);
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let completion = OllamaClient::new(OllamaConfig {
    base_url: config.ollama_url.clone(),
    timeout:  Duration::from_secs(config.request_timeout_secs),
  })
  .context("failed to build model client")?;

  Ok(AppState {
    store:         Arc::new(store),
    completion:    Arc::new(completion),
    default_model: Arc::from(config.default_model.as_str()),
  })
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The API router wrapped in request tracing and, when enabled, permissive
/// CORS.
pub fn app(state: AppState<SqliteStore, OllamaClient>, config: &ServerConfig) -> Router {
  let router = tutor_api::api_router(state).layer(TraceLayer::new_for_http());
  if config.cors_permissive {
    router.layer(CorsLayer::permissive())
  } else {
    router
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use config::FileFormat;
  use tower::ServiceExt as _;

  use super::*;

  fn from_toml(toml: &str) -> ServerConfig {
    config::Config::builder()
      .add_source(config::File::from_str(toml, FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap()
  }

  #[test]
  fn empty_config_uses_defaults() {
    let cfg = from_toml("");
    assert_eq!(cfg.address(), "0.0.0.0:8000");
    assert_eq!(cfg.store_path, PathBuf::from("tutor.db"));
    assert_eq!(cfg.ollama_url, "http://localhost:11434");
    assert_eq!(cfg.default_model, "llama3.1:8b");
    assert_eq!(cfg.request_timeout_secs, 120);
    assert!(cfg.cors_permissive);
  }

  #[test]
  fn file_values_override_defaults() {
    let cfg = from_toml(
      r#"
        host = "127.0.0.1"
        port = 9100
        default_model = "mistral:latest"
        cors_permissive = false
      "#,
    );
    assert_eq!(cfg.address(), "127.0.0.1:9100");
    assert_eq!(cfg.default_model, "mistral:latest");
    assert!(!cfg.cors_permissive);
    assert_eq!(cfg.request_timeout_secs, 120);
  }

  #[test]
  fn missing_config_file_is_not_an_error() {
    let dir = std::env::temp_dir().join("tutor-server-no-such-dir");
    let cfg = ServerConfig::load(&dir.join("config.toml")).unwrap();
    assert!(!cfg.default_model.is_empty());
  }

  #[test]
  fn tilde_is_expanded_only_at_the_front() {
    let plain = PathBuf::from("data/tutor.db");
    assert_eq!(expand_tilde(&plain), plain);

    let odd = PathBuf::from("data/~/tutor.db");
    assert_eq!(expand_tilde(&odd), odd);

    if let Ok(home) = std::env::var("HOME") {
      let expanded = expand_tilde(Path::new("~/tutor.db"));
      assert_eq!(expanded, PathBuf::from(home).join("tutor.db"));
    }
  }

  #[tokio::test]
  async fn app_serves_health_with_cors() {
    let cfg = from_toml("");
    let state = AppState {
      store:         Arc::new(SqliteStore::open_in_memory().await.unwrap()),
      completion:    Arc::new(OllamaClient::new(OllamaConfig::default()).unwrap()),
      default_model: Arc::from(cfg.default_model.as_str()),
    };

    let req = Request::builder()
      .uri("/health")
      .header(header::ORIGIN, "http://localhost:8081")
      .body(Body::empty())
      .unwrap();
    let resp = app(state, &cfg).oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "healthy");
  }
}
