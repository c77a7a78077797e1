//! Picnic repository.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{write, StorageError};
use crate::model::Picnic;

const SELECT_PICNIC: &str = "SELECT id, name, location, date FROM picnics";

/// Map a `id, name, location, date` row.
pub(crate) fn picnic_from_row(row: &Row<'_>) -> rusqlite::Result<Picnic> {
    Ok(Picnic {
        id: row.get(0)?,
        name: row.get(1)?,
        location: row.get(2)?,
        date: row.get(3)?,
    })
}

/// CRUD over the `picnics` table.
pub struct PicnicRepository<'a> {
    conn: &'a Connection,
}

impl<'a> PicnicRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a picnic and return its id. `picnic.id` is ignored.
    pub fn create(&self, picnic: &Picnic) -> Result<i64, StorageError> {
        let id = write(self.conn, |tx| {
            tx.execute(
                "INSERT INTO picnics (name, location, date) VALUES (?1, ?2, ?3)",
                params![picnic.name, picnic.location, picnic.date],
            )?;
            Ok(tx.last_insert_rowid())
        })?;

        tracing::debug!(picnic_id = id, name = %picnic.name, "Picnic created");
        Ok(id)
    }

    pub fn get_by_id(&self, id: i64) -> Result<Option<Picnic>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{SELECT_PICNIC} WHERE id = ?1"))?;
        Ok(stmt.query_row([id], picnic_from_row).optional()?)
    }

    /// All picnics ordered by id.
    pub fn get_all(&self) -> Result<Vec<Picnic>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{SELECT_PICNIC} ORDER BY id"))?;
        let picnics = stmt
            .query_map([], picnic_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(picnics)
    }

    /// Overwrite name, location and date of picnic `id`.
    ///
    /// Returns the number of rows changed; an unknown id is `Ok(0)`.
    pub fn update(&self, picnic: &Picnic, id: i64) -> Result<usize, StorageError> {
        let changed = write(self.conn, |tx| {
            tx.execute(
                "UPDATE picnics
                 SET name = ?1, location = ?2, date = ?3, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?4",
                params![picnic.name, picnic.location, picnic.date, id],
            )
        })?;

        tracing::debug!(picnic_id = id, changed, "Picnic updated");
        Ok(changed)
    }

    /// Delete picnic `id`. Links and contributions that reference it stay.
    ///
    /// Returns the number of rows removed; an unknown id is `Ok(0)`.
    pub fn delete(&self, id: i64) -> Result<usize, StorageError> {
        let removed = write(self.conn, |tx| {
            tx.execute("DELETE FROM picnics WHERE id = ?1", [id])
        })?;

        tracing::debug!(picnic_id = id, removed, "Picnic deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_support::memory_db;

    fn summer_bash() -> Picnic {
        Picnic {
            id: 0,
            name: "Summer Bash".into(),
            location: "Park".into(),
            date: "2024-07-01".into(),
        }
    }

    #[test]
    fn test_create_then_get() {
        let conn = memory_db();
        let repo = PicnicRepository::new(&conn);

        let id = repo.create(&summer_bash()).unwrap();
        assert_eq!(id, 1);

        let picnic = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(
            picnic,
            Picnic {
                id: 1,
                ..summer_bash()
            }
        );
    }

    #[test]
    fn test_create_ignores_supplied_id() {
        let conn = memory_db();
        let repo = PicnicRepository::new(&conn);

        let id = repo
            .create(&Picnic {
                id: 42,
                ..summer_bash()
            })
            .unwrap();
        assert_eq!(id, 1);
        assert!(repo.get_by_id(42).unwrap().is_none());
    }

    #[test]
    fn test_get_missing_is_none() {
        let conn = memory_db();
        let repo = PicnicRepository::new(&conn);

        let found = repo.get_by_id(7).unwrap();
        assert!(found.is_none());
        assert_eq!(found.unwrap_or_default(), Picnic::default());
    }

    #[test]
    fn test_get_all_empty() {
        let conn = memory_db();
        assert!(PicnicRepository::new(&conn).get_all().unwrap().is_empty());
    }

    #[test]
    fn test_get_all_in_id_order() {
        let conn = memory_db();
        let repo = PicnicRepository::new(&conn);
        repo.create(&summer_bash()).unwrap();
        repo.create(&Picnic {
            name: "Autumn Leaves".into(),
            ..summer_bash()
        })
        .unwrap();

        let names: Vec<String> = repo.get_all().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Summer Bash", "Autumn Leaves"]);
    }

    #[test]
    fn test_update_overwrites_every_column() {
        let conn = memory_db();
        let repo = PicnicRepository::new(&conn);
        let id = repo.create(&summer_bash()).unwrap();

        let changed = repo
            .update(
                &Picnic {
                    id: 0,
                    name: "Winter Bash".into(),
                    location: "Lodge".into(),
                    date: "2024-12-21".into(),
                },
                id,
            )
            .unwrap();
        assert_eq!(changed, 1);

        let picnic = repo.get_by_id(id).unwrap().unwrap();
        assert_eq!(picnic.name, "Winter Bash");
        assert_eq!(picnic.location, "Lodge");
        assert_eq!(picnic.date, "2024-12-21");
    }

    #[test]
    fn test_update_missing_id_succeeds() {
        let conn = memory_db();
        let changed = PicnicRepository::new(&conn)
            .update(&summer_bash(), 99)
            .unwrap();
        assert_eq!(changed, 0);
    }

    #[test]
    fn test_delete() {
        let conn = memory_db();
        let repo = PicnicRepository::new(&conn);
        let id = repo.create(&summer_bash()).unwrap();

        assert_eq!(repo.delete(id).unwrap(), 1);
        assert!(repo.get_by_id(id).unwrap().is_none());
        assert_eq!(repo.delete(id).unwrap(), 0);
    }

    #[test]
    fn test_ids_are_not_reused_after_delete() {
        let conn = memory_db();
        let repo = PicnicRepository::new(&conn);
        let first = repo.create(&summer_bash()).unwrap();
        repo.delete(first).unwrap();

        let second = repo.create(&summer_bash()).unwrap();
        assert!(second > first);
    }

    #[test]
    fn test_empty_name_is_stored() {
        let conn = memory_db();
        let repo = PicnicRepository::new(&conn);
        let id = repo
            .create(&Picnic {
                name: String::new(),
                ..summer_bash()
            })
            .unwrap();

        // Found, even though the zero-record convention would call it missing.
        let picnic = repo.get_by_id(id).unwrap();
        assert!(picnic.is_some());
    }
}
