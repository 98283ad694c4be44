//! [`SqliteStore`] — the SQLite implementation of [`SupplierStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use directory_core::{
  message::{Message, NewMessage},
  query::SupplierQuery,
  store::SupplierStore,
  supplier::{NewSupplier, Supplier, SupplierId},
};

use crate::{
  encode::{MESSAGE_COLUMNS, RawMessage, RawSupplier, SUPPLIER_COLUMNS, encode_dt, now},
  filter::SqlFilter,
  schema::SCHEMA,
  Error, Result,
};

const INSERT_SUPPLIER: &str = "
  INSERT INTO suppliers (
    name, category, email, phone, whatsapp, location,
    rating, products, notes, created_at
  ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A supplier directory backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted. Every clone
/// talks to the same connection, which serialises all statements.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Close the underlying connection. Other clones of this store fail
  /// afterwards.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    Ok(())
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Bind a [`NewSupplier`] to [`INSERT_SUPPLIER`].
fn insert_supplier(
  conn: &rusqlite::Connection,
  s: &NewSupplier,
  created_at: &str,
) -> rusqlite::Result<i64> {
  let mut stmt = conn.prepare_cached(INSERT_SUPPLIER)?;
  stmt.execute(rusqlite::params![
    s.name, s.category, s.email, s.phone, s.whatsapp, s.location,
    s.rating, s.products, s.notes, created_at,
  ])?;
  Ok(conn.last_insert_rowid())
}

// ─── SupplierStore impl ──────────────────────────────────────────────────────

impl SupplierStore for SqliteStore {
  type Error = Error;

  // ── Suppliers ─────────────────────────────────────────────────────────────

  async fn list_suppliers(&self, query: &SupplierQuery) -> Result<Vec<Supplier>> {
    let filter = SqlFilter::render(query.filter());

    let raws: Vec<RawSupplier> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&filter.list_sql())?;
        let rows = stmt
          .query_map(
            rusqlite::params_from_iter(filter.params.iter()),
            RawSupplier::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSupplier::into_supplier).collect()
  }

  async fn get_supplier(&self, id: SupplierId) -> Result<Option<Supplier>> {
    let raw: Option<RawSupplier> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = ?1"),
            rusqlite::params![id],
            RawSupplier::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSupplier::into_supplier).transpose()
  }

  async fn supplier_exists(&self, id: SupplierId) -> Result<bool> {
    let exists = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT 1 FROM suppliers WHERE id = ?1",
            rusqlite::params![id],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false))
      })
      .await?;
    Ok(exists)
  }

  async fn count_suppliers(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM suppliers", [], |r| r.get(0))?)
      })
      .await?;
    Ok(count.max(0) as u64)
  }

  async fn create_supplier(&self, input: NewSupplier) -> Result<Supplier> {
    let created_at = now();
    let at_str = encode_dt(created_at);
    let row = input.clone();

    let id = self
      .conn
      .call(move |conn| Ok(insert_supplier(conn, &row, &at_str)?))
      .await?;

    Ok(Supplier {
      id,
      name: input.name,
      category: input.category,
      email: input.email,
      phone: input.phone,
      whatsapp: input.whatsapp,
      location: input.location,
      rating: input.rating,
      products: input.products,
      notes: input.notes,
      created_at,
    })
  }

  async fn update_supplier(
    &self,
    id:    SupplierId,
    input: NewSupplier,
  ) -> Result<Option<Supplier>> {
    let raw: Option<RawSupplier> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(
          "UPDATE suppliers
             SET name = ?1, category = ?2, email = ?3, phone = ?4,
                 whatsapp = ?5, location = ?6, rating = ?7,
                 products = ?8, notes = ?9
           WHERE id = ?10",
          rusqlite::params![
            input.name, input.category, input.email, input.phone,
            input.whatsapp, input.location, input.rating,
            input.products, input.notes, id,
          ],
        )?;

        if changed == 0 {
          return Ok(None);
        }

        Ok(conn
          .query_row(
            &format!("SELECT {SUPPLIER_COLUMNS} FROM suppliers WHERE id = ?1"),
            rusqlite::params![id],
            RawSupplier::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSupplier::into_supplier).transpose()
  }

  async fn delete_supplier(&self, id: SupplierId) -> Result<bool> {
    // Messages go with it through `ON DELETE CASCADE`.
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM suppliers WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(removed > 0)
  }

  async fn seed_if_empty(&self, rows: &[NewSupplier]) -> Result<usize> {
    let rows = rows.to_vec();
    let at_str = encode_dt(now());

    let inserted = self
      .conn
      .call(move |conn| {
        let count: i64 =
          conn.query_row("SELECT COUNT(*) FROM suppliers", [], |r| r.get(0))?;
        if count > 0 {
          return Ok(0);
        }
        for row in &rows {
          insert_supplier(conn, row, &at_str)?;
        }
        Ok(rows.len())
      })
      .await?;
    Ok(inserted)
  }

  // ── Messages ──────────────────────────────────────────────────────────────

  async fn record_message(&self, input: NewMessage) -> Result<Message> {
    let created_at = now();
    let at_str = encode_dt(created_at);
    let (supplier_id, method, message) =
      (input.supplier_id, input.method.clone(), input.message.clone());

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO messages (supplier_id, method, message, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![supplier_id, method, message, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Message {
      id,
      supplier_id: input.supplier_id,
      method: input.method,
      message: input.message,
      created_at,
    })
  }

  async fn list_messages(&self, supplier_id: SupplierId) -> Result<Vec<Message>> {
    let raws: Vec<RawMessage> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {MESSAGE_COLUMNS} FROM messages
           WHERE supplier_id = ?1
           ORDER BY created_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![supplier_id], RawMessage::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawMessage::into_message).collect()
  }
}
