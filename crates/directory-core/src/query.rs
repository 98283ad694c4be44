//! List query parameters and the filter they resolve to.
//!
//! A list request carries an optional free-text search and an optional
//! category. [`SupplierQuery::filter`] folds the two into one of four
//! [`SupplierFilter`] branches; store backends render each branch and always
//! order the result by rating (descending) then name (ascending).

use serde::{Deserialize, Serialize};

/// Category sentinel meaning "do not filter by category".
pub const ALL_CATEGORIES: &str = "All";

/// Parameters for [`SupplierStore::list_suppliers`](crate::store::SupplierStore::list_suppliers).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierQuery {
  /// Case-insensitive substring matched against name, products and location.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub search:   Option<String>,
  /// Exact category match. [`ALL_CATEGORIES`] disables the filter.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub category: Option<String>,
}

/// The resolved shape of a [`SupplierQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierFilter<'a> {
  /// No filter; every supplier.
  Everything,
  /// Name, products or location contain the term.
  Search(&'a str),
  /// Category equals the value exactly.
  Category(&'a str),
  /// Both of the above must hold.
  SearchInCategory { search: &'a str, category: &'a str },
}

impl SupplierQuery {
  pub fn new(search: Option<String>, category: Option<String>) -> Self {
    Self { search, category }
  }

  pub fn search(term: impl Into<String>) -> Self {
    Self { search: Some(term.into()), category: None }
  }

  pub fn category(category: impl Into<String>) -> Self {
    Self { search: None, category: Some(category.into()) }
  }

  /// The search term, if it is non-empty.
  pub fn search_term(&self) -> Option<&str> {
    self.search.as_deref().filter(|s| !s.is_empty())
  }

  /// The category to match, unless absent, empty or [`ALL_CATEGORIES`].
  pub fn category_filter(&self) -> Option<&str> {
    self
      .category
      .as_deref()
      .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
  }

  pub fn filter(&self) -> SupplierFilter<'_> {
    match (self.search_term(), self.category_filter()) {
      (Some(search), Some(category)) => {
        SupplierFilter::SearchInCategory { search, category }
      }
      (Some(search), None) => SupplierFilter::Search(search),
      (None, Some(category)) => SupplierFilter::Category(category),
      (None, None) => SupplierFilter::Everything,
    }
  }
}
