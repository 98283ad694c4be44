//! Supplier — a directory entry for a business contact.
//!
//! Three shapes travel through the system:
//!
//! - [`SupplierInput`] is what a client sends. Every field is optional.
//! - [`NewSupplier`] is a validated input with defaults filled in. It is the
//!   only thing a store will insert or write over an existing row.
//! - [`Supplier`] is a persisted row, carrying the store-assigned identifier
//!   and creation timestamp.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Store-assigned supplier identifier.
pub type SupplierId = i64;

/// Rating given to a supplier when the payload does not carry one.
pub const DEFAULT_RATING: f64 = 4.0;

// ─── Persisted row ───────────────────────────────────────────────────────────

/// A supplier as stored. `id` and `created_at` never change after insert.
///
/// `rating` is not range-checked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
  pub id:         SupplierId,
  pub name:       String,
  pub category:   Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
  pub whatsapp:   Option<String>,
  pub location:   Option<String>,
  pub rating:     f64,
  pub products:   String,
  pub notes:      String,
  pub created_at: DateTime<Utc>,
}

// ─── Validated write ─────────────────────────────────────────────────────────

/// Every mutable supplier field, validated and defaulted.
///
/// Used both for inserts and for full-replace updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSupplier {
  pub name:     String,
  pub category: Option<String>,
  pub email:    Option<String>,
  pub phone:    Option<String>,
  pub whatsapp: Option<String>,
  pub location: Option<String>,
  pub rating:   f64,
  pub products: String,
  pub notes:    String,
}

impl NewSupplier {
  /// A supplier with only a name and every other field defaulted.
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name:     name.into(),
      category: None,
      email:    None,
      phone:    None,
      whatsapp: None,
      location: None,
      rating:   DEFAULT_RATING,
      products: String::new(),
      notes:    String::new(),
    }
  }

  pub fn with_category(mut self, category: impl Into<String>) -> Self {
    self.category = Some(category.into());
    self
  }

  pub fn with_products(mut self, products: impl Into<String>) -> Self {
    self.products = products.into();
    self
  }

  pub fn with_rating(mut self, rating: f64) -> Self {
    self.rating = rating;
    self
  }
}

// ─── Client payload ──────────────────────────────────────────────────────────

/// Body of `POST /suppliers` and `PUT /suppliers/{id}`.
///
/// Omitted fields take their defaults on both create and update: rating
/// [`DEFAULT_RATING`], empty `products` and `notes`, no category or contact
/// details.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SupplierInput {
  pub name:     Option<String>,
  pub category: Option<String>,
  pub email:    Option<String>,
  pub phone:    Option<String>,
  pub whatsapp: Option<String>,
  pub location: Option<String>,
  pub rating:   Option<f64>,
  pub products: Option<String>,
  pub notes:    Option<String>,
}

impl SupplierInput {
  /// Check presence of `name` and fill in defaults.
  ///
  /// A name made only of whitespace counts as missing.
  pub fn validate(self) -> Result<NewSupplier> {
    let name = match self.name {
      Some(name) if !name.trim().is_empty() => name,
      _ => return Err(Error::NameRequired),
    };

    Ok(NewSupplier {
      name,
      category: self.category,
      email:    self.email,
      phone:    self.phone,
      whatsapp: self.whatsapp,
      location: self.location,
      rating:   self.rating.unwrap_or(DEFAULT_RATING),
      products: self.products.unwrap_or_default(),
      notes:    self.notes.unwrap_or_default(),
    })
  }
}

impl TryFrom<SupplierInput> for NewSupplier {
  type Error = Error;

  fn try_from(input: SupplierInput) -> Result<Self> { input.validate() }
}

impl From<Supplier> for SupplierInput {
  /// Start an edit from an existing record.
  fn from(s: Supplier) -> Self {
    Self {
      name:     Some(s.name),
      category: s.category,
      email:    s.email,
      phone:    s.phone,
      whatsapp: s.whatsapp,
      location: s.location,
      rating:   Some(s.rating),
      products: Some(s.products),
      notes:    Some(s.notes),
    }
  }
}
