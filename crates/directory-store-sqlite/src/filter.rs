//! Rendering of [`SupplierFilter`] into a parameterised SQL `WHERE` clause.
//!
//! The three searchable columns share a single `?1` pattern. `LIKE` in
//! SQLite is case-insensitive for ASCII, which gives the contains-filter its
//! case folding. `%` and `_` in the user's term are escaped so they match
//! literally.

use directory_core::query::SupplierFilter;

use crate::encode::SUPPLIER_COLUMNS;

const SEARCH_CLAUSE: &str = "(name LIKE ?1 ESCAPE '\\' \
                             OR products LIKE ?1 ESCAPE '\\' \
                             OR location LIKE ?1 ESCAPE '\\')";

/// Fixed result order for every list query.
pub const ORDER_BY: &str = "ORDER BY rating DESC, name ASC";

/// A `WHERE` clause (possibly empty) and the values bound to it, in order.
#[derive(Debug, PartialEq, Eq)]
pub struct SqlFilter {
  pub clause: String,
  pub params: Vec<String>,
}

impl SqlFilter {
  pub fn render(filter: SupplierFilter<'_>) -> Self {
    match filter {
      SupplierFilter::Everything => Self {
        clause: String::new(),
        params: vec![],
      },
      SupplierFilter::Search(search) => Self {
        clause: format!("WHERE {SEARCH_CLAUSE}"),
        params: vec![contains_pattern(search)],
      },
      SupplierFilter::Category(category) => Self {
        clause: "WHERE category = ?1".to_owned(),
        params: vec![category.to_owned()],
      },
      SupplierFilter::SearchInCategory { search, category } => Self {
        clause: format!("WHERE {SEARCH_CLAUSE} AND category = ?2"),
        params: vec![contains_pattern(search), category.to_owned()],
      },
    }
  }

  /// The complete list statement for this filter.
  pub fn list_sql(&self) -> String {
    format!(
      "SELECT {SUPPLIER_COLUMNS} FROM suppliers {} {ORDER_BY}",
      self.clause
    )
  }
}

/// `%term%` with `LIKE` metacharacters in `term` escaped.
fn contains_pattern(term: &str) -> String {
  let mut pattern = String::with_capacity(term.len() + 2);
  pattern.push('%');
  for ch in term.chars() {
    if matches!(ch, '%' | '_' | '\\') {
      pattern.push('\\');
    }
    pattern.push(ch);
  }
  pattern.push('%');
  pattern
}
