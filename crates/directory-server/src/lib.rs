//! HTTP server wiring for the supplier directory.
//!
//! Loads [`ServerConfig`], opens the SQLite store, seeds sample suppliers on
//! first run and mounts the JSON API under `/api` with request tracing and
//! CORS.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use axum::Router;
use directory_core::store::SupplierStore;
use directory_store_sqlite::{SqliteStore, seed::sample_suppliers};
use serde::Deserialize;
use tower_http::{
  cors::{Any, CorsLayer},
  trace::TraceLayer,
};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Environment variable prefix, e.g. `DIRECTORY_PORT=8080`.
pub const ENV_PREFIX: &str = "DIRECTORY";

/// Runtime server configuration.
///
/// Sources, later ones winning: built-in defaults, the TOML file, `DIRECTORY_*`
/// environment variables, then the `--port` flag.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:                  String,
  pub port:                  u16,
  pub store_path:            PathBuf,
  /// Insert the sample suppliers when the table is empty.
  pub seed_sample_data:      bool,
  /// Answer CORS preflights for any origin so a browser client can call in.
  pub cors_allow_any_origin: bool,
}

impl ServerConfig {
  pub fn load(file: &Path, port_override: Option<u16>) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "127.0.0.1")?
      .set_default("port", 5000_i64)?
      .set_default("store_path", "database.sqlite")?
      .set_default("seed_sample_data", true)?
      .set_default("cors_allow_any_origin", true)?
      .add_source(config::File::from(file).required(false))
      .add_source(config::Environment::with_prefix(ENV_PREFIX))
      .set_override_option("port", port_override.map(i64::from))?
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Store lifecycle ──────────────────────────────────────────────────────────

/// Open the store named by `config` and seed it if configured to.
pub async fn open_store(config: &ServerConfig) -> anyhow::Result<SqliteStore> {
  let path = expand_tilde(&config.store_path);

  let store = SqliteStore::open(&path)
    .await
    .with_context(|| format!("failed to open store at {path:?}"))?;
  tracing::info!(path = %path.display(), "store opened");

  if config.seed_sample_data {
    let inserted = store
      .seed_if_empty(&sample_suppliers())
      .await
      .context("failed to seed sample suppliers")?;
    if inserted > 0 {
      tracing::info!(inserted, "inserted sample suppliers");
    }
  }

  let suppliers = store
    .count_suppliers()
    .await
    .context("failed to count suppliers")?;
  tracing::info!(suppliers, "store ready");

  Ok(store)
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: the API under `/api`, request tracing,
/// and CORS when enabled.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Router
where
  S: SupplierStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let app = Router::new()
    .nest("/api", directory_api::api_router(store))
    .layer(TraceLayer::new_for_http());

  if config.cors_allow_any_origin {
    app.layer(
      CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any),
    )
  } else {
    app
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
  use tower::ServiceExt as _;

  use super::*;

  fn test_config(cors: bool) -> ServerConfig {
    ServerConfig {
      host:                  "127.0.0.1".into(),
      port:                  0,
      store_path:            ":memory:".into(),
      seed_sample_data:      true,
      cors_allow_any_origin: cors,
    }
  }

  async fn seeded_store() -> Arc<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store.seed_if_empty(&sample_suppliers()).await.unwrap();
    Arc::new(store)
  }

  fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("directory-server-{}-{name}", std::process::id()))
  }

  #[test]
  fn missing_file_yields_defaults() {
    let cfg = ServerConfig::load(&temp_path("absent.toml"), None).unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.store_path, PathBuf::from("database.sqlite"));
    assert!(cfg.seed_sample_data);
    assert!(cfg.cors_allow_any_origin);
  }

  #[test]
  fn file_values_and_port_override() {
    let path = temp_path("config.toml");
    std::fs::write(
      &path,
      "host = \"0.0.0.0\"\nport = 7000\nseed_sample_data = false\n",
    )
    .unwrap();

    let cfg = ServerConfig::load(&path, None).unwrap();
    assert_eq!(cfg.address(), "0.0.0.0:7000");
    assert!(!cfg.seed_sample_data);

    let cfg = ServerConfig::load(&path, Some(8123)).unwrap();
    assert_eq!(cfg.port, 8123);

    std::fs::remove_file(&path).ok();
  }

  #[test]
  fn tilde_expands_to_home() {
    let home = std::env::var("HOME").unwrap_or_default();
    if home.is_empty() {
      return;
    }
    assert_eq!(
      expand_tilde(Path::new("~/dir/db.sqlite")),
      PathBuf::from(home).join("dir/db.sqlite")
    );
    assert_eq!(expand_tilde(Path::new("/abs/db")), PathBuf::from("/abs/db"));
  }

  #[tokio::test]
  async fn api_is_mounted_under_api_prefix() {
    let app = router(seeded_store().await, &test_config(true));

    let resp = app
      .clone()
      .oneshot(Request::get("/api/suppliers").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let rows: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 3);

    let resp = app
      .oneshot(Request::get("/suppliers").body(Body::empty()).unwrap())
      .await
      .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn cors_headers_follow_config() {
    let request = || {
      Request::get("/api/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap()
    };

    let resp = router(seeded_store().await, &test_config(true))
      .oneshot(request())
      .await
      .unwrap();
    assert_eq!(
      resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
      "*"
    );

    let resp = router(seeded_store().await, &test_config(false))
      .oneshot(request())
      .await
      .unwrap();
    assert!(!resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
  }

  #[tokio::test]
  async fn open_store_seeds_once() {
    let path = temp_path("seed.sqlite");
    let mut cfg = test_config(true);
    cfg.store_path = path.clone();

    let store = open_store(&cfg).await.unwrap();
    assert_eq!(store.count_suppliers().await.unwrap(), 3);
    store.close().await.unwrap();

    let store = open_store(&cfg).await.unwrap();
    assert_eq!(store.count_suppliers().await.unwrap(), 3);
    store.close().await.unwrap();

    for suffix in ["", "-wal", "-shm"] {
      std::fs::remove_file(format!("{}{suffix}", path.display())).ok();
    }
  }

  #[tokio::test]
  async fn open_store_without_seeding_starts_empty() {
    let path = temp_path("noseed.sqlite");
    let mut cfg = test_config(true);
    cfg.store_path = path.clone();
    cfg.seed_sample_data = false;

    let store = open_store(&cfg).await.unwrap();
    assert_eq!(store.count_suppliers().await.unwrap(), 0);
    store.close().await.unwrap();

    for suffix in ["", "-wal", "-shm"] {
      std::fs::remove_file(format!("{}{suffix}", path.display())).ok();
    }
  }
}
