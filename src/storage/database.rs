//! SQLite Database
//!
//! Embedded database backing the vector store, using rusqlite with r2d2
//! connection pooling. One database file per store directory.

use std::path::{Path, PathBuf};
use std::time::Duration;

use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;

use crate::utils::error::{AppError, AppResult};
use crate::utils::paths::{database_path, ensure_dir};

/// Type alias for the connection pool
pub type DbPool = Pool<SqliteConnectionManager>;

/// Type alias for a pooled connection
pub type DbConnection = r2d2::PooledConnection<SqliteConnectionManager>;

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database service for the collection and record tables
#[derive(Clone)]
pub struct Database {
    pool: DbPool,
    path: Option<PathBuf>,
}

impl Database {
    /// Create an in-memory database for testing.
    ///
    /// Every in-memory connection is a separate database, so the pool is
    /// limited to a single connection.
    pub fn new_in_memory() -> AppResult<Self> {
        let manager = SqliteConnectionManager::memory().with_init(configure_connection);
        let pool = Pool::builder()
            .max_size(1)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self { pool, path: None };
        db.init_schema()?;
        Ok(db)
    }

    /// Open (creating if needed) the database inside `data_dir`
    pub fn open(data_dir: &Path) -> AppResult<Self> {
        ensure_dir(data_dir)?;
        let db_path = database_path(data_dir);

        let manager = SqliteConnectionManager::file(&db_path).with_init(configure_connection);
        let pool = Pool::builder()
            .max_size(4)
            .connection_timeout(BUSY_TIMEOUT)
            .build(manager)
            .map_err(|e| AppError::database(format!("Failed to create connection pool: {}", e)))?;

        let db = Self {
            pool,
            path: Some(db_path),
        };
        db.init_schema()?;

        tracing::debug!(path = ?db.path, "opened memory database");
        Ok(db)
    }

    /// Get a connection from the pool
    pub fn get_connection(&self) -> AppResult<DbConnection> {
        self.pool
            .get()
            .map_err(|e| AppError::database(format!("Failed to get connection: {}", e)))
    }

    /// Initialize the database schema
    fn init_schema(&self) -> AppResult<()> {
        let conn = self.get_connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS collections (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                metadata TEXT NOT NULL DEFAULT '{}',
                created_at TEXT DEFAULT CURRENT_TIMESTAMP
            )",
            [],
        )?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS records (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                collection_id INTEGER NOT NULL,
                id TEXT NOT NULL,
                document TEXT NOT NULL,
                metadata TEXT NOT NULL DEFAULT '{}',
                created_at TEXT DEFAULT CURRENT_TIMESTAMP,
                UNIQUE (collection_id, id),
                FOREIGN KEY (collection_id) REFERENCES collections(id) ON DELETE CASCADE
            )",
            [],
        )?;

        // Listing and stats scan one collection in insertion order
        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_records_collection_seq ON records(collection_id, seq)",
            [],
        )?;

        Ok(())
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").field("path", &self.path).finish()
    }
}

fn configure_connection(conn: &mut rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")
}
