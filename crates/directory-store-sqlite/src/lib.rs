//! SQLite backend for the supplier directory.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on one dedicated
//! connection thread without blocking the async runtime.

mod encode;
mod filter;
mod schema;
mod store;

pub mod error;
pub mod seed;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
