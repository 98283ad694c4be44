//! Error types for `directory-core`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// A supplier payload arrived without a usable `name`.
  #[error("name required")]
  NameRequired,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
