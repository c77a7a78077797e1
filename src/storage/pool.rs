//! Pooled database handle.
//!
//! Uses r2d2 with r2d2_sqlite. Every connection gets the same pragmas, so
//! foreign-key enforcement and the busy timeout are uniform across the pool.

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use std::path::Path;
use std::time::Duration;

use super::error::StorageError;
use super::schema::{apply_pragmas, initialize_schema};
use super::{LinkPolicy, StorageConfig};

/// Process-wide database handle.
///
/// Cloning is cheap; clones share the pool. Hand a connection from
/// [`Database::get`] to a repository for the duration of one operation.
#[derive(Clone)]
pub struct Database {
    pool: Pool<SqliteConnectionManager>,
    config: StorageConfig,
}

impl Database {
    /// Open (or create) the database file and initialize the schema.
    ///
    /// # Errors
    ///
    /// Returns an error if the pool cannot be built or the schema cannot be
    /// created. Callers should treat either as fatal.
    pub fn open<P: AsRef<Path>>(db_path: P, config: StorageConfig) -> Result<Self, StorageError> {
        let manager = SqliteConnectionManager::file(db_path);
        let pool = Pool::builder()
            .max_size(config.pool_size)
            .connection_customizer(Box::new(PragmaCustomizer::from(&config)))
            .build(manager)?;

        Self::initialize(pool, config)
    }

    /// Private in-memory database, mainly for tests.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to one connection that is never recycled.
    pub fn open_in_memory(config: StorageConfig) -> Result<Self, StorageError> {
        let pool = Pool::builder()
            .max_size(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connection_customizer(Box::new(PragmaCustomizer::from(&config)))
            .build(SqliteConnectionManager::memory())?;

        Self::initialize(pool, config)
    }

    fn initialize(
        pool: Pool<SqliteConnectionManager>,
        config: StorageConfig,
    ) -> Result<Self, StorageError> {
        {
            let conn = pool.get()?;
            initialize_schema(&conn)?;
        }
        tracing::info!(
            pool_size = config.pool_size,
            enforce_foreign_keys = config.enforce_foreign_keys,
            link_policy = ?config.link_policy,
            "Database ready"
        );
        Ok(Self { pool, config })
    }

    /// Get a connection from the pool.
    pub fn get(&self) -> Result<PooledConnection<SqliteConnectionManager>, StorageError> {
        Ok(self.pool.get()?)
    }

    /// Duplicate-link policy for relationship repositories.
    pub fn link_policy(&self) -> LinkPolicy {
        self.config.link_policy
    }

    /// Settings the pool was built with.
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    /// Get the current pool state for monitoring.
    pub fn state(&self) -> r2d2::State {
        self.pool.state()
    }
}

/// Connection customizer that applies the storage pragmas.
#[derive(Debug)]
struct PragmaCustomizer {
    enforce_foreign_keys: bool,
    busy_timeout: Duration,
}

impl From<&StorageConfig> for PragmaCustomizer {
    fn from(config: &StorageConfig) -> Self {
        Self {
            enforce_foreign_keys: config.enforce_foreign_keys,
            busy_timeout: config.busy_timeout,
        }
    }
}

impl r2d2::CustomizeConnection<rusqlite::Connection, rusqlite::Error> for PragmaCustomizer {
    fn on_acquire(&self, conn: &mut rusqlite::Connection) -> Result<(), rusqlite::Error> {
        apply_pragmas(conn, self.enforce_foreign_keys, self.busy_timeout)
    }
}
