//! SQL schema for the supplier directory store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// `foreign_keys` is a per-connection setting. The store holds exactly one
/// connection, so enabling it here covers every statement.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS suppliers (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    name        TEXT NOT NULL,
    category    TEXT,
    email       TEXT,
    phone       TEXT,
    whatsapp    TEXT,
    location    TEXT,
    rating      REAL NOT NULL DEFAULT 4.0,  -- unbounded
    products    TEXT NOT NULL DEFAULT '',
    notes       TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL               -- RFC 3339 UTC; store-assigned
);

-- Contact intents. Never updated; removed only with their supplier.
CREATE TABLE IF NOT EXISTS messages (
    id          INTEGER PRIMARY KEY AUTOINCREMENT,
    supplier_id INTEGER NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
    method      TEXT NOT NULL DEFAULT 'email',
    message     TEXT NOT NULL DEFAULT '',
    created_at  TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS suppliers_category_idx ON suppliers(category);
CREATE INDEX IF NOT EXISTS messages_supplier_idx  ON messages(supplier_id, created_at);

PRAGMA user_version = 1;
";
