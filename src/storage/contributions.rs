//! Contribution repository.
//!
//! A contribution can be read either by its own id or by the (user, picnic)
//! pair it belongs to. The pair lookup returns at most one row even though
//! a user may contribute several times to the same picnic.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{write, StorageError};
use crate::model::Contribution;

const SELECT_CONTRIBUTION: &str =
    "SELECT id, user_id, picnic_id, food_item_id, quantity FROM contributions";

pub(crate) fn contribution_from_row(row: &Row<'_>) -> rusqlite::Result<Contribution> {
    Ok(Contribution {
        id: row.get(0)?,
        user_id: row.get(1)?,
        picnic_id: row.get(2)?,
        food_item_id: row.get(3)?,
        quantity: row.get(4)?,
    })
}

pub struct ContributionRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ContributionRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a contribution and return its id.
    ///
    /// The referenced user, picnic and food item are only checked when
    /// foreign keys are enforced.
    pub fn create(&self, contribution: &Contribution) -> Result<i64, StorageError> {
        let id = write(self.conn, |tx| {
            tx.execute(
                "INSERT INTO contributions (user_id, picnic_id, food_item_id, quantity)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    contribution.user_id,
                    contribution.picnic_id,
                    contribution.food_item_id,
                    contribution.quantity
                ],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        tracing::debug!(
            contribution_id = id,
            user_id = contribution.user_id,
            picnic_id = contribution.picnic_id,
            quantity = contribution.quantity,
            "Contribution created"
        );
        Ok(id)
    }

    /// Primary-key lookup.
    pub fn get_by_id(&self, id: i64) -> Result<Option<Contribution>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{SELECT_CONTRIBUTION} WHERE id = ?1"))?;
        Ok(stmt.query_row([id], contribution_from_row).optional()?)
    }

    /// First contribution (lowest id) of `user_id` to `picnic_id`.
    pub fn get_of_user_to_picnic(
        &self,
        user_id: i64,
        picnic_id: i64,
    ) -> Result<Option<Contribution>, StorageError> {
        let mut stmt = self.conn.prepare_cached(&format!(
            "{SELECT_CONTRIBUTION} WHERE user_id = ?1 AND picnic_id = ?2 ORDER BY id LIMIT 1"
        ))?;
        Ok(stmt
            .query_row([user_id, picnic_id], contribution_from_row)
            .optional()?)
    }

    pub fn get_all(&self) -> Result<Vec<Contribution>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{SELECT_CONTRIBUTION} ORDER BY id"))?;
        let contributions = stmt
            .query_map([], contribution_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(contributions)
    }

    /// Overwrite every column but the id. An unknown id is `Ok(0)`.
    pub fn update(&self, contribution: &Contribution, id: i64) -> Result<usize, StorageError> {
        let changed = write(self.conn, |tx| {
            tx.execute(
                "UPDATE contributions
                 SET user_id = ?1, picnic_id = ?2, food_item_id = ?3, quantity = ?4
                 WHERE id = ?5",
                params![
                    contribution.user_id,
                    contribution.picnic_id,
                    contribution.food_item_id,
                    contribution.quantity,
                    id
                ],
            )
        })?;

        tracing::debug!(contribution_id = id, changed, "Contribution updated");
        Ok(changed)
    }

    /// Delete contribution `id`. An unknown id is `Ok(0)`.
    pub fn delete(&self, id: i64) -> Result<usize, StorageError> {
        let removed = write(self.conn, |tx| {
            tx.execute("DELETE FROM contributions WHERE id = ?1", [id])
        })?;

        tracing::debug!(contribution_id = id, removed, "Contribution deleted");
        Ok(removed)
    }
}
