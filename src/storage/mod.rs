//! SQLite storage layer for picnic planning.
//!
//! Provides:
//! - Schema initialization and connection pragmas
//! - A pooled [`Database`] handle shared process-wide
//! - One repository per entity, plus the user/picnic relationship joins
//!
//! Repositories borrow a single connection for their lifetime and run every
//! mutation in its own short `IMMEDIATE` transaction. Write serialization is
//! left to SQLite; contending writers wait up to the configured busy timeout.

pub mod contributions;
pub mod error;
pub mod food_items;
pub mod picnics;
pub mod pool;
pub mod relations;
pub mod schema;
pub mod users;

pub use contributions::ContributionRepository;
pub use error::StorageError;
pub use food_items::FoodItemRepository;
pub use picnics::PicnicRepository;
pub use pool::Database;
pub use relations::RelationshipRepository;
pub use users::UserRepository;

use rusqlite::{Connection, Transaction, TransactionBehavior};
use std::time::Duration;

/// What to do when a user is linked to a picnic they are already linked to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LinkPolicy {
    /// Insert another association row; joins then report the user twice.
    #[default]
    Allow,
    /// Refuse with [`StorageError::DuplicateLink`].
    Reject,
}

/// Storage settings applied to every pooled connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorageConfig {
    /// Maximum number of pooled connections.
    pub pool_size: u32,
    /// How long a connection waits on a locked database before failing.
    pub busy_timeout: Duration,
    /// Value written to `PRAGMA foreign_keys` on every connection. The
    /// bundled SQLite build enables it unless told otherwise.
    pub enforce_foreign_keys: bool,
    pub link_policy: LinkPolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            pool_size: 8,
            busy_timeout: Duration::from_millis(5000),
            enforce_foreign_keys: false,
            link_policy: LinkPolicy::Allow,
        }
    }
}

/// Run `op` inside an immediate transaction and commit it.
///
/// The transaction rolls back when `op` fails or the commit does.
pub(crate) fn write<T>(
    conn: &Connection,
    op: impl FnOnce(&Transaction<'_>) -> rusqlite::Result<T>,
) -> Result<T, StorageError> {
    let tx = Transaction::new_unchecked(conn, TransactionBehavior::Immediate)?;
    let value = op(&tx)?;
    tx.commit()?;
    Ok(value)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::schema::{apply_pragmas, initialize_schema};
    use super::StorageConfig;
    use rusqlite::Connection;

    /// Fresh in-memory database with the schema and default pragmas applied.
    pub fn memory_db() -> Connection {
        let config = StorageConfig::default();
        let conn = Connection::open_in_memory().unwrap();
        apply_pragmas(&conn, config.enforce_foreign_keys, config.busy_timeout).unwrap();
        initialize_schema(&conn).unwrap();
        conn
    }
}
