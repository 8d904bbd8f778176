//! # Database Module
//!
//! This module handles all database operations for the registry backend.
//! Everything lives in a single SQLite file:
//!
//! - Multisig records (the groups themselves)
//! - Vault records (addresses owned by a multisig)
//! - Member records (signers of a multisig)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      DATABASE LAYER                              │
//! │                                                                  │
//! │  ┌──────────────────────────────────────────────────────────┐   │
//! │  │                   Connection Pool                         │   │
//! │  │                   (sqlx SqlitePool)                       │   │
//! │  └──────────────────────────────────────────────────────────┘   │
//! │                              │                                   │
//! │         ┌────────────────────┼────────────────────┐             │
//! │         ▼                    ▼                    ▼             │
//! │  ┌────────────┐      ┌────────────┐       ┌────────────┐       │
//! │  │ Multisigs  │      │   Vaults   │       │  Members   │       │
//! │  │   Table    │      │   Table    │       │   Table    │       │
//! │  └────────────┘      └────────────┘       └────────────┘       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Vaults and members point at their multisig through `multisig_address`.
//! That column is not a foreign key; the link is resolved at query time.

pub mod models;
pub mod queries;

use std::path::Path;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use thiserror::Error;
use tracing::{debug, error, info};

/// Schema applied on every start. All statements are `IF NOT EXISTS`.
const INITIAL_SCHEMA: &str = include_str!("../../migrations/001_initial_schema.sql");

/// Database-related errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to connect to the database
    #[error("Database connection failed: {0}")]
    ConnectionError(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    /// Migration failed
    #[error("Migration failed: {0}")]
    MigrationError(String),

    /// The `sort` parameter could not be turned into an ORDER BY clause
    #[error("Invalid sort: {0}")]
    InvalidSort(String),

    /// Record not found
    #[error("Record not found: {0}")]
    NotFound(String),
}

/// Database connection wrapper.
///
/// This struct wraps the connection pool and provides
/// methods for common database operations.
///
/// ## Usage
///
/// ```rust,ignore
/// let db = Database::connect("squads.db", 5).await?;
/// db.run_migrations().await?;
/// let multisig = queries::get_record::<Multisig>(db.pool(), 1).await?;
/// ```
#[derive(Clone)]
pub struct Database {
    /// The connection pool
    pool: SqlitePool,
}

impl Database {
    /// Open (or create) the SQLite database at `path`.
    ///
    /// The file is created if missing and opened in WAL mode so that
    /// readers do not block the writer.
    ///
    /// ## Arguments
    ///
    /// * `path` - Location of the database file
    /// * `max_connections` - Pool size
    pub async fn connect(
        path: impl AsRef<Path>,
        max_connections: u32,
    ) -> Result<Self, DatabaseError> {
        info!("Connecting to database at {}...", path.as_ref().display());

        let options = SqliteConnectOptions::new()
            .filename(path.as_ref())
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        // Simple query to verify connection
        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        info!("Database connection established");

        Ok(Self { pool })
    }

    /// Open a private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` gets its own empty database,
    /// so the pool is pinned to a single connection that is never recycled.
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self, DatabaseError> {
        let options = SqliteConnectOptions::new().in_memory(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| DatabaseError::ConnectionError(e.to_string()))?;

        debug!("In-memory database opened");

        Ok(Self { pool })
    }

    /// Create the tables and indexes if they do not exist yet.
    ///
    /// Safe to run on every start.
    pub async fn run_migrations(&self) -> Result<(), DatabaseError> {
        info!("Running database migrations...");
        debug!("Executing migration SQL ({} bytes)", INITIAL_SCHEMA.len());

        sqlx::raw_sql(INITIAL_SCHEMA)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Migration execution error: {}", e);
                DatabaseError::MigrationError(e.to_string())
            })?;

        info!("Migrations completed successfully");
        Ok(())
    }

    /// Get a reference to the connection pool.
    ///
    /// Use this when you need direct access to the pool
    /// for custom queries.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

// Re-export commonly used items
pub use models::*;

#[cfg(test)]
mod tests {
    use super::*;

    async fn table_names(db: &Database) -> Vec<String> {
        sqlx::query_scalar::<_, String>(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
        )
        .fetch_all(db.pool())
        .await
        .unwrap()
    }

    #[actix_web::test]
    async fn test_migrations_create_tables() {
        let db = Database::in_memory().await.unwrap();
        db.run_migrations().await.unwrap();

        assert_eq!(table_names(&db).await, vec!["members", "multisigs", "vaults"]);
    }

    #[actix_web::test]
    async fn test_migrations_are_idempotent() {
        let db = Database::in_memory().await.unwrap();
        db.run_migrations().await.unwrap();
        db.run_migrations().await.unwrap();

        assert_eq!(table_names(&db).await.len(), 3);
    }

    #[actix_web::test]
    async fn test_connect_creates_database_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.db");
        assert!(!path.exists());

        let db = Database::connect(&path, 2).await.unwrap();
        db.run_migrations().await.unwrap();

        assert!(path.exists());
        assert_eq!(table_names(&db).await.len(), 3);
    }

    #[actix_web::test]
    async fn test_data_survives_reconnect() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.db");

        {
            let db = Database::connect(&path, 1).await.unwrap();
            db.run_migrations().await.unwrap();
            queries::insert_multisig(
                db.pool(),
                &crate::models::CreateMultisigRequest {
                    multisig_address: "addr1".to_string(),
                    name: "Treasury".to_string(),
                    description: String::new(),
                },
            )
            .await
            .unwrap();
            db.pool().close().await;
        }

        let db = Database::connect(&path, 1).await.unwrap();
        db.run_migrations().await.unwrap();
        let found = queries::get_record::<Multisig>(db.pool(), 1).await.unwrap();
        assert_eq!(found.map(|m| m.name), Some("Treasury".to_string()));
    }
}
