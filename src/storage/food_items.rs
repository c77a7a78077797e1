//! Food item repository. Food items have no delete operation.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{write, StorageError};
use crate::model::FoodItem;

fn food_item_from_row(row: &Row<'_>) -> rusqlite::Result<FoodItem> {
    Ok(FoodItem {
        id: row.get(0)?,
        name: row.get(1)?,
        measure: row.get(2)?,
        url: row.get(3)?,
    })
}

pub struct FoodItemRepository<'a> {
    conn: &'a Connection,
}

impl<'a> FoodItemRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, item: &FoodItem) -> Result<i64, StorageError> {
        let id = write(self.conn, |tx| {
            tx.execute(
                "INSERT INTO food_items (name, measure, url) VALUES (?1, ?2, ?3)",
                params![item.name, item.measure, item.url],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        tracing::debug!(food_item_id = id, name = %item.name, "Food item created");
        Ok(id)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<FoodItem>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name, measure, url FROM food_items WHERE id = ?1")?;
        Ok(stmt.query_row([id], food_item_from_row).optional()?)
    }

    pub fn get_all(&self) -> Result<Vec<FoodItem>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached("SELECT id, name, measure, url FROM food_items ORDER BY id")?;
        let items = stmt
            .query_map([], food_item_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(items)
    }

    /// Overwrite name, measure and url. An unknown id is `Ok(0)`.
    pub fn update(&self, item: &FoodItem, id: i64) -> Result<usize, StorageError> {
        let changed = write(self.conn, |tx| {
            tx.execute(
                "UPDATE food_items
                 SET name = ?1, measure = ?2, url = ?3, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?4",
                params![item.name, item.measure, item.url, id],
            )
        })?;

        tracing::debug!(food_item_id = id, changed, "Food item updated");
        Ok(changed)
    }
}
