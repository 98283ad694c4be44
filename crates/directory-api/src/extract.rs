//! Request extractors whose rejections use the API's `{"error": ...}` shape.
//!
//! axum's stock `Json` and `Path` extractors answer malformed input with a
//! plain-text body. These wrappers turn every rejection into
//! [`ApiError::BadRequest`].

use axum::{
  Json,
  body::Bytes,
  extract::{
    FromRequest, FromRequestParts, Path, Request,
    rejection::{BytesRejection, JsonRejection, PathRejection},
  },
  http::request::Parts,
};
use directory_core::supplier::SupplierId;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    Self::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
  }
}

impl From<BytesRejection> for ApiError {
  fn from(rejection: BytesRejection) -> Self {
    Self::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
  }
}

impl From<PathRejection> for ApiError {
  fn from(_: PathRejection) -> Self { Self::BadRequest("Invalid supplier id".into()) }
}

// ─── JSON bodies ──────────────────────────────────────────────────────────────

/// A JSON request body. Requires `Content-Type: application/json`.
#[derive(Debug)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
  S: Send + Sync,
  T: DeserializeOwned,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<T>::from_request(req, state).await?;
    Ok(Self(value))
  }
}

/// A JSON request body in which every field is optional.
///
/// An empty body (or one made only of whitespace) yields `T::default()`,
/// whatever the `Content-Type`. Anything else must parse as JSON.
#[derive(Debug)]
pub struct JsonBodyOrDefault<T>(pub T);

impl<S, T> FromRequest<S> for JsonBodyOrDefault<T>
where
  S: Send + Sync,
  T: DeserializeOwned + Default,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let bytes = Bytes::from_request(req, state).await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
      return Ok(Self(T::default()));
    }
    let Json(value) = Json::<T>::from_bytes(&bytes)?;
    Ok(Self(value))
  }
}

// ─── Path ─────────────────────────────────────────────────────────────────────

/// The `{id}` segment of a `/suppliers/{id}` route.
#[derive(Debug, Clone, Copy)]
pub struct SupplierIdPath(pub SupplierId);

impl<S> FromRequestParts<S> for SupplierIdPath
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    let Path(id) = Path::<SupplierId>::from_request_parts(parts, state).await?;
    Ok(Self(id))
  }
}
