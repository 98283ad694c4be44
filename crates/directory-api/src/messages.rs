//! Handlers for the per-supplier message sub-resource.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/suppliers/:id/contact` | Body: [`ContactInput`]; 404 if supplier unknown |
//! | `GET`  | `/suppliers/:id/messages` | Newest first; empty for unknown ids |
//!
//! Contacting a supplier only records the intent. Nothing is sent.

use std::sync::Arc;

use axum::{Json, extract::State};
use directory_core::{
  message::{ContactInput, ContactReceipt, Message},
  store::SupplierStore,
};

use crate::{
  error::ApiError,
  extract::{JsonBodyOrDefault, SupplierIdPath},
};

// ─── Contact ──────────────────────────────────────────────────────────────────

/// `POST /suppliers/:id/contact` — body: `{"method":"whatsapp","message":"hi"}`
/// (both optional; an empty body records an `email` message with no text).
pub async fn contact<S>(
  State(store): State<Arc<S>>,
  SupplierIdPath(id): SupplierIdPath,
  JsonBodyOrDefault(body): JsonBodyOrDefault<ContactInput>,
) -> Result<Json<ContactReceipt>, ApiError>
where
  S: SupplierStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  const FAILED: &str = "Failed to send message";

  if !store.supplier_exists(id).await.map_err(ApiError::store(FAILED))? {
    return Err(ApiError::supplier_not_found());
  }

  let message = store
    .record_message(body.for_supplier(id))
    .await
    .map_err(ApiError::store(FAILED))?;

  tracing::info!(supplier_id = id, method = %message.method, "contact recorded");
  Ok(Json(ContactReceipt::saved(message)))
}

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /suppliers/:id/messages`
pub async fn list<S>(
  State(store): State<Arc<S>>,
  SupplierIdPath(id): SupplierIdPath,
) -> Result<Json<Vec<Message>>, ApiError>
where
  S: SupplierStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let messages = store
    .list_messages(id)
    .await
    .map_err(ApiError::store("Failed to load messages"))?;
  Ok(Json(messages))
}
