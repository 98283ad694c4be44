//! JSON REST API for the supplier directory.
//!
//! Exposes an axum [`Router`] backed by any
//! [`directory_core::store::SupplierStore`]. CORS, tracing and transport
//! concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", directory_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod extract;
pub mod health;
pub mod messages;
pub mod suppliers;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use directory_core::store::SupplierStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: SupplierStore + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/health", get(health::handler))
    // Suppliers
    .route("/suppliers", get(suppliers::list::<S>).post(suppliers::create::<S>))
    .route(
      "/suppliers/{id}",
      get(suppliers::get_one::<S>)
        .put(suppliers::update::<S>)
        .delete(suppliers::delete_one::<S>),
    )
    // Messages
    .route("/suppliers/{id}/contact", post(messages::contact::<S>))
    .route("/suppliers/{id}/messages", get(messages::list::<S>))
    .with_state(store)
}
