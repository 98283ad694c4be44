//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Store failures are logged with their cause and reported to the caller
//! only by a fixed per-operation message.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("{message}: {source}")]
  Store {
    message: &'static str,
    #[source]
    source:  BoxError,
  },
}

impl ApiError {
  pub fn supplier_not_found() -> Self { Self::NotFound("Supplier not found".into()) }

  /// Adapter for `map_err` that wraps a store error under `message`.
  pub fn store<E>(message: &'static str) -> impl FnOnce(E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    move |e| Self::Store { message, source: Box::new(e) }
  }
}

impl From<directory_core::Error> for ApiError {
  fn from(e: directory_core::Error) -> Self {
    match e {
      directory_core::Error::NameRequired => Self::BadRequest("Name required".into()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
      ApiError::Store { message, source } => {
        tracing::error!(error = %source, "{message}");
        (StatusCode::INTERNAL_SERVER_ERROR, message.to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
