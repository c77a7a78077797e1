//! User repository. Users have no delete operation.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{write, StorageError};
use crate::model::User;

pub(crate) fn user_from_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
    })
}

/// CRUD over the `users` table.
pub struct UserRepository<'a> {
    conn: &'a Connection,
}

impl<'a> UserRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a user and return its id.
    ///
    /// Fails with a constraint violation if the name is taken.
    pub fn create(&self, user: &User) -> Result<i64, StorageError> {
        let id = write(self.conn, |tx| {
            tx.execute("INSERT INTO users (name) VALUES (?1)", [&user.name])?;
            Ok(tx.last_insert_rowid())
        })?;

        tracing::debug!(user_id = id, name = %user.name, "User created");
        Ok(id)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<User>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name FROM users WHERE id = ?1")?;
        Ok(stmt.query_row([id], user_from_row).optional()?)
    }

    /// Look a user up by their unique name.
    pub fn get_by_name(&self, name: &str) -> Result<Option<User>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name FROM users WHERE name = ?1")?;
        Ok(stmt.query_row([name], user_from_row).optional()?)
    }

    pub fn get_all(&self) -> Result<Vec<User>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name FROM users ORDER BY id")?;
        let users = stmt
            .query_map([], user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Rename user `id`. An unknown id is `Ok(0)`.
    pub fn update(&self, user: &User, id: i64) -> Result<usize, StorageError> {
        let changed = write(self.conn, |tx| {
            tx.execute(
                "UPDATE users SET name = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
                params![user.name, id],
            )
        })?;

        tracing::debug!(user_id = id, changed, "User updated");
        Ok(changed)
    }
}
