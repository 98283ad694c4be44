//! Handler for `GET /health`.

use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Health {
  pub status: &'static str,
  pub time:   DateTime<Utc>,
}

/// `GET /health` — liveness only; the store is not consulted.
pub async fn handler() -> Json<Health> {
  Json(Health { status: "ok", time: Utc::now() })
}
