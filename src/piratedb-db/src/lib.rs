//! SQLite storage for piratedb
//!
//! Writes the records produced by [`piratedb::aggregate::collect`] into the
//! relational layout consumed by the wiki and lookup tools, along with the
//! English locale strings their name columns point at.
//!
//! # Example
//!
//! ```no_run
//! use piratedb::Records;
//! use piratedb_db::{LocaleTable, SqliteDb};
//!
//! let records = Records::default();
//! let locale = LocaleTable::load("locale_en.json").unwrap();
//!
//! let mut db = SqliteDb::open("items.db").unwrap();
//! db.init().unwrap();
//! db.write_locale(&locale).unwrap();
//! db.write_records(&records).unwrap();
//! ```

pub mod locale;
pub mod schema;
pub mod sqlite;

pub use locale::LocaleTable;
pub use sqlite::{SqliteDb, TableCount, DEFAULT_DB_PATH};

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Locale parse error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for storage operations
pub type DbResult<T> = Result<T, DbError>;
