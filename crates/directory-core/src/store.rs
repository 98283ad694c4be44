//! The `SupplierStore` trait.
//!
//! Implemented by storage backends (e.g. `directory-store-sqlite`). The JSON
//! API depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  message::{Message, NewMessage},
  query::SupplierQuery,
  supplier::{NewSupplier, Supplier, SupplierId},
};

/// Abstraction over a supplier directory backend.
///
/// Every method is a single store round-trip with no retries. Messages are
/// owned by their supplier: deleting a supplier deletes its messages in the
/// same statement.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait SupplierStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Suppliers ─────────────────────────────────────────────────────────

  /// Suppliers matching `query`, ordered by rating descending then name
  /// ascending. Never paginated.
  fn list_suppliers<'a>(
    &'a self,
    query: &'a SupplierQuery,
  ) -> impl Future<Output = Result<Vec<Supplier>, Self::Error>> + Send + 'a;

  /// Retrieve a supplier by id. Returns `None` if not found.
  fn get_supplier(
    &self,
    id: SupplierId,
  ) -> impl Future<Output = Result<Option<Supplier>, Self::Error>> + Send + '_;

  fn supplier_exists(
    &self,
    id: SupplierId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn count_suppliers(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Insert a supplier; the store assigns `id` and `created_at`.
  fn create_supplier(
    &self,
    input: NewSupplier,
  ) -> impl Future<Output = Result<Supplier, Self::Error>> + Send + '_;

  /// Overwrite every mutable field of `id`. Returns `None` if the row does
  /// not exist.
  fn update_supplier(
    &self,
    id: SupplierId,
    input: NewSupplier,
  ) -> impl Future<Output = Result<Option<Supplier>, Self::Error>> + Send + '_;

  /// Delete a supplier and, by cascade, all of its messages. Returns whether
  /// a row was removed; callers treat both outcomes as success.
  fn delete_supplier(
    &self,
    id: SupplierId,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Insert `rows` only if the supplier table is empty. Returns how many rows
  /// were inserted.
  fn seed_if_empty<'a>(
    &'a self,
    rows: &'a [NewSupplier],
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + 'a;

  // ── Messages ──────────────────────────────────────────────────────────

  /// Record a contact message. The owning supplier must exist; backends
  /// report a store error otherwise.
  fn record_message(
    &self,
    input: NewMessage,
  ) -> impl Future<Output = Result<Message, Self::Error>> + Send + '_;

  /// Messages owned by `supplier_id`, newest first. Unknown ids yield an
  /// empty list.
  fn list_messages(
    &self,
    supplier_id: SupplierId,
  ) -> impl Future<Output = Result<Vec<Message>, Self::Error>> + Send + '_;
}
