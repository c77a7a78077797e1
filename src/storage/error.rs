//! Error type for storage operations.

use rusqlite::ErrorCode;
use thiserror::Error;

/// Error returned by every repository operation.
///
/// Not-found is never an error; lookups return `Ok(None)` instead.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("User {user_id} is already linked to picnic {picnic_id}")]
    DuplicateLink { user_id: i64, picnic_id: i64 },
}

impl StorageError {
    /// True for UNIQUE, NOT NULL and FOREIGN KEY violations.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            Self::Database(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_unique_violation_is_constraint_violation() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (name TEXT UNIQUE); INSERT INTO t VALUES ('a');")
            .unwrap();

        let err: StorageError = conn
            .execute("INSERT INTO t VALUES ('a')", [])
            .unwrap_err()
            .into();
        assert!(err.is_constraint_violation());
    }

    #[test]
    fn test_other_errors_are_not_constraint_violations() {
        let conn = Connection::open_in_memory().unwrap();
        let err: StorageError = conn
            .execute("INSERT INTO missing VALUES (1)", [])
            .unwrap_err()
            .into();
        assert!(!err.is_constraint_violation());

        let dup = StorageError::DuplicateLink {
            user_id: 1,
            picnic_id: 2,
        };
        assert!(!dup.is_constraint_violation());
        assert_eq!(dup.to_string(), "User 1 is already linked to picnic 2");
    }
}
