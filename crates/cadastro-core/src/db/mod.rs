//! Database layer for cadastro.

mod patients;
mod schema;
mod vehicles;

pub use schema::*;

use rusqlite::Connection;
use std::path::Path;
use thiserror::Error;

/// Database errors.
#[derive(Error, Debug)]
pub enum DbError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Constraint violation: {0}")]
    Constraint(String),
}

pub type DbResult<T> = Result<T, DbError>;

/// Database connection wrapper.
///
/// Opened once at process start and passed by reference into every
/// operation; rusqlite autocommit gives one commit per mutating statement.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open database at path, creating the schema if needed.
    pub fn open<P: AsRef<Path>>(path: P) -> DbResult<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    /// Create in-memory database (for testing).
    pub fn open_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.initialize()?;
        Ok(db)
    }

    fn initialize(&self) -> DbResult<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Get raw connection (for dynamic projection queries).
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Whether a table holds at least one row.
    pub fn table_has_rows(&self, table: &'static str) -> DbResult<bool> {
        let sql = format!("SELECT 1 FROM {table} LIMIT 1");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        Ok(rows.next()?.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory();
        assert!(db.is_ok());
    }

    #[test]
    fn test_schema_initialized() {
        let db = Database::open_in_memory().unwrap();

        let tables: Vec<String> = db
            .conn()
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"T_VEICULOS".to_string()));
        assert!(tables.contains(&"T_PACIENTE".to_string()));
    }

    #[test]
    fn test_table_has_rows_on_empty_table() {
        let db = Database::open_in_memory().unwrap();
        assert!(!db.table_has_rows("T_VEICULOS").unwrap());
        assert!(!db.table_has_rows("T_PACIENTE").unwrap());
    }
}
