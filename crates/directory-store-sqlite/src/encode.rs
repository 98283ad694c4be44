//! Encoding and decoding helpers between domain types and SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings with a fixed microsecond
//! precision so that lexical order in SQL matches chronological order.

use chrono::{DateTime, SecondsFormat, SubsecRound as _, Utc};
use directory_core::{message::Message, supplier::Supplier};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

/// The current time, truncated to what survives a round-trip through
/// [`encode_dt`].
pub fn now() -> DateTime<Utc> { Utc::now().trunc_subsecs(6) }

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Suppliers ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawSupplier::from_row`].
pub const SUPPLIER_COLUMNS: &str = "id, name, category, email, phone, whatsapp, \
                                    location, rating, products, notes, created_at";

/// Raw values read directly from a `suppliers` row.
pub struct RawSupplier {
  pub id:         i64,
  pub name:       String,
  pub category:   Option<String>,
  pub email:      Option<String>,
  pub phone:      Option<String>,
  pub whatsapp:   Option<String>,
  pub location:   Option<String>,
  pub rating:     f64,
  pub products:   String,
  pub notes:      String,
  pub created_at: String,
}

impl RawSupplier {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      name:       row.get(1)?,
      category:   row.get(2)?,
      email:      row.get(3)?,
      phone:      row.get(4)?,
      whatsapp:   row.get(5)?,
      location:   row.get(6)?,
      rating:     row.get(7)?,
      products:   row.get(8)?,
      notes:      row.get(9)?,
      created_at: row.get(10)?,
    })
  }

  pub fn into_supplier(self) -> Result<Supplier> {
    Ok(Supplier {
      id:         self.id,
      name:       self.name,
      category:   self.category,
      email:      self.email,
      phone:      self.phone,
      whatsapp:   self.whatsapp,
      location:   self.location,
      rating:     self.rating,
      products:   self.products,
      notes:      self.notes,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

// ─── Messages ────────────────────────────────────────────────────────────────

pub const MESSAGE_COLUMNS: &str = "id, supplier_id, method, message, created_at";

/// Raw values read directly from a `messages` row.
pub struct RawMessage {
  pub id:          i64,
  pub supplier_id: i64,
  pub method:      String,
  pub message:     String,
  pub created_at:  String,
}

impl RawMessage {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:          row.get(0)?,
      supplier_id: row.get(1)?,
      method:      row.get(2)?,
      message:     row.get(3)?,
      created_at:  row.get(4)?,
    })
  }

  pub fn into_message(self) -> Result<Message> {
    Ok(Message {
      id:          self.id,
      supplier_id: self.supplier_id,
      method:      self.method,
      message:     self.message,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}
