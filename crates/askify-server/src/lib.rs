//! HTTP server assembly for Askify.
//!
//! Loads [`ServerConfig`], and builds the top-level [`Router`]: the JSON API
//! under `/api`, a `/health` probe, and per-request tracing.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use askify_core::store::AskifyStore;
use axum::{Router, routing::get};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration.
///
/// Layered from built-in defaults, then the optional TOML file, then
/// `ASKIFY_*` environment variables (e.g. `ASKIFY_PORT=8080`).
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl ServerConfig {
  pub fn load(file: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 3000)?
      .set_default("store_path", "askify.db")?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix("ASKIFY"))
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }

  /// `store_path` with a leading `~` expanded to the user's home directory.
  pub fn resolved_store_path(&self) -> PathBuf { expand_tilde(&self.store_path) }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: AskifyStore + 'static,
{
  Router::new()
    .route("/health", get(health))
    .nest("/api", askify_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str { "ok" }

#[cfg(test)]
mod tests {
  use super::*;

  use askify_store_sqlite::SqliteStore;
  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    router(Arc::new(store))
  }

  #[tokio::test]
  async fn health_returns_ok() {
    let resp = app()
      .await
      .oneshot(Request::get("/health").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&bytes[..], b"ok");
  }

  #[tokio::test]
  async fn api_is_nested() {
    let app = app().await;

    let resp = app
      .clone()
      .oneshot(Request::get("/api/events").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
      .oneshot(Request::get("/events").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[test]
  fn config_file_overrides_defaults() {
    let path = std::env::temp_dir().join(format!("askify-{}.toml", uuid::Uuid::new_v4()));
    std::fs::write(&path, "port = 8088\nstore_path = \"/var/lib/askify/data.db\"\n").unwrap();

    let cfg = ServerConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 8088);
    assert_eq!(cfg.store_path, PathBuf::from("/var/lib/askify/data.db"));
    assert_eq!(cfg.address(), "127.0.0.1:8088");
  }

  #[test]
  fn missing_config_file_uses_defaults() {
    let path = std::env::temp_dir().join(format!("absent-{}.toml", uuid::Uuid::new_v4()));
    let cfg = ServerConfig::load(&path).unwrap();
    assert_eq!(cfg.port, 3000);
    assert_eq!(cfg.store_path, PathBuf::from("askify.db"));
  }

  #[test]
  fn tilde_expands_to_home() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(
      expand_tilde(Path::new("~/askify.db")),
      PathBuf::from(home).join("askify.db")
    );
    assert_eq!(expand_tilde(Path::new("/tmp/a.db")), PathBuf::from("/tmp/a.db"));
  }
}
