//! Handlers for `/suppliers` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/suppliers` | Optional `?search=...&category=...` |
//! | `GET`    | `/suppliers/:id` | 404 if not found |
//! | `POST`   | `/suppliers` | Body: [`SupplierInput`]; 400 without `name`; 201 + record |
//! | `PUT`    | `/suppliers/:id` | Full replace; 404 if not found |
//! | `DELETE` | `/suppliers/:id` | Always `{"success":true}` |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use directory_core::{
  query::SupplierQuery,
  store::SupplierStore,
  supplier::{Supplier, SupplierInput},
};
use serde::Serialize;

use crate::{
  error::ApiError,
  extract::{JsonBody, SupplierIdPath},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /suppliers[?search=<text>][&category=<category>]`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  Query(query): Query<SupplierQuery>,
) -> Result<Json<Vec<Supplier>>, ApiError>
where
  S: SupplierStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let suppliers = store
    .list_suppliers(&query)
    .await
    .map_err(ApiError::store("Failed to load suppliers"))?;
  Ok(Json(suppliers))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /suppliers/:id`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  SupplierIdPath(id): SupplierIdPath,
) -> Result<Json<Supplier>, ApiError>
where
  S: SupplierStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let supplier = store
    .get_supplier(id)
    .await
    .map_err(ApiError::store("Failed to fetch supplier"))?
    .ok_or_else(ApiError::supplier_not_found)?;
  Ok(Json(supplier))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /suppliers` — returns 201 + the stored [`Supplier`].
///
/// The payload is validated before the store is touched.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  JsonBody(body): JsonBody<SupplierInput>,
) -> Result<impl IntoResponse, ApiError>
where
  S: SupplierStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = body.validate()?;
  let supplier = store
    .create_supplier(input)
    .await
    .map_err(ApiError::store("Failed to create supplier"))?;

  tracing::info!(id = supplier.id, name = %supplier.name, "supplier created");
  Ok((StatusCode::CREATED, Json(supplier)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /suppliers/:id` — overwrites every mutable field.
///
/// Existence is checked first, so an unknown id is a 404 even when the body
/// is invalid.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  SupplierIdPath(id): SupplierIdPath,
  JsonBody(body): JsonBody<SupplierInput>,
) -> Result<Json<Supplier>, ApiError>
where
  S: SupplierStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  const FAILED: &str = "Failed to update supplier";

  if !store.supplier_exists(id).await.map_err(ApiError::store(FAILED))? {
    return Err(ApiError::supplier_not_found());
  }

  let input = body.validate()?;
  let supplier = store
    .update_supplier(id, input)
    .await
    .map_err(ApiError::store(FAILED))?
    // Deleted between the check and the write.
    .ok_or_else(ApiError::supplier_not_found)?;

  tracing::info!(id, "supplier updated");
  Ok(Json(supplier))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Deleted {
  pub success: bool,
}

/// `DELETE /suppliers/:id` — succeeds whether or not the row existed.
pub async fn delete_one<S>(
  State(store): State<Arc<S>>,
  SupplierIdPath(id): SupplierIdPath,
) -> Result<Json<Deleted>, ApiError>
where
  S: SupplierStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let removed = store
    .delete_supplier(id)
    .await
    .map_err(ApiError::store("Failed to delete supplier"))?;

  tracing::info!(id, removed, "supplier delete");
  Ok(Json(Deleted { success: true }))
}
