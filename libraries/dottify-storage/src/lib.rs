//! Dottify Storage
//!
//! `SQLite` persistence for the Dottify music catalog.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each entity owns its own queries and row mapping
//! - **Constraints in the schema**: Uniqueness, ranges and cascades are
//!   declared in the migrations, so a racing writer is still rejected
//! - **Trait-backed**: [`SqliteCatalog`] implements
//!   [`dottify_core::CatalogStore`] for the server
//!
//! # Example
//!
//! ```rust,no_run
//! use dottify_storage::{create_pool, run_migrations, SqliteCatalog};
//! use dottify_core::CatalogStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://dottify.db").await?;
//! run_migrations(&pool).await?;
//!
//! let catalog = SqliteCatalog::new(pool);
//! let albums = catalog.get_all_albums().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;

// Vertical slices
pub mod accounts;
pub mod albums;
pub mod comments;
pub mod playlists;
pub mod profiles;
pub mod ratings;
pub mod songs;
pub mod statistics;

pub use context::SqliteCatalog;
pub use error::StorageError;

/// The catalog backend the server runs on
pub type Database = SqliteCatalog;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// Foreign keys are switched on for every connection; the cascade rules of
/// the schema depend on it. An in-memory URL gets a single connection so
/// that every query sees the same database.
///
/// # Errors
///
/// Returns an error if the URL is malformed or the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!(url = %database_url, "Creating SQLite pool");

    let in_memory = database_url.contains(":memory:");

    let mut options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));
    if !in_memory {
        options = options.journal_mode(SqliteJournalMode::Wal);
    }

    let pool = SqlitePoolOptions::new()
        .max_connections(if in_memory { 1 } else { 5 })
        .connect_with(options)
        .await?;

    tracing::info!("SQLite pool ready");

    Ok(pool)
}
