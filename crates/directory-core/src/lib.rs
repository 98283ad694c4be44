//! Core types and trait definitions for the supplier directory.
//!
//! This crate carries no HTTP or database dependencies. The store backend,
//! the JSON API and the terminal client all depend on it.

pub mod error;
pub mod message;
pub mod query;
pub mod store;
pub mod supplier;

pub use error::{Error, Result};
