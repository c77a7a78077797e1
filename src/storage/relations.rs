//! User/picnic association and join queries.
//!
//! The association table has no uniqueness constraint. Whether linking the
//! same pair twice is allowed is decided by [`LinkPolicy`]. There is no
//! unlink operation.

use rusqlite::{params, Connection, OptionalExtension, Row};

use super::contributions::contribution_from_row;
use super::picnics::picnic_from_row;
use super::users::user_from_row;
use super::{write, LinkPolicy, StorageError};
use crate::model::{ContributionDetails, FoodItem, Picnic, User};

const SELECT_DETAILS: &str = "
    SELECT c.id, c.user_id, c.picnic_id, c.food_item_id, c.quantity,
           u.id, u.name,
           p.id, p.name, p.location, p.date,
           f.id, f.name, f.measure, f.url
    FROM contributions c
    INNER JOIN users u ON u.id = c.user_id
    INNER JOIN picnics p ON p.id = c.picnic_id
    INNER JOIN food_items f ON f.id = c.food_item_id";

fn details_from_row(row: &Row<'_>) -> rusqlite::Result<ContributionDetails> {
    Ok(ContributionDetails {
        contribution: contribution_from_row(row)?,
        user: User {
            id: row.get(5)?,
            name: row.get(6)?,
        },
        picnic: Picnic {
            id: row.get(7)?,
            name: row.get(8)?,
            location: row.get(9)?,
            date: row.get(10)?,
        },
        food_item: FoodItem {
            id: row.get(11)?,
            name: row.get(12)?,
            measure: row.get(13)?,
            url: row.get(14)?,
        },
    })
}

/// Relationship queries across users, picnics and contributions.
pub struct RelationshipRepository<'a> {
    conn: &'a Connection,
    link_policy: LinkPolicy,
}

impl<'a> RelationshipRepository<'a> {
    /// Repository with the default [`LinkPolicy::Allow`].
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            link_policy: LinkPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_link_policy(mut self, link_policy: LinkPolicy) -> Self {
        self.link_policy = link_policy;
        self
    }

    /// Link a user to a picnic and return the association id.
    ///
    /// # Errors
    ///
    /// [`StorageError::DuplicateLink`] under [`LinkPolicy::Reject`] when the
    /// pair is already linked. A constraint violation when foreign keys are
    /// enforced and either side does not exist.
    pub fn link_user_to_picnic(&self, user_id: i64, picnic_id: i64) -> Result<i64, StorageError> {
        let policy = self.link_policy;
        let linked = write(self.conn, |tx| {
            if policy == LinkPolicy::Reject {
                let existing: Option<i64> = tx
                    .query_row(
                        "SELECT id FROM users_picnics WHERE user_id = ?1 AND picnic_id = ?2",
                        [user_id, picnic_id],
                        |row| row.get(0),
                    )
                    .optional()?;
                if existing.is_some() {
                    return Ok(None);
                }
            }

            tx.execute(
                "INSERT INTO users_picnics (user_id, picnic_id) VALUES (?1, ?2)",
                params![user_id, picnic_id],
            )?;
            Ok(Some(tx.last_insert_rowid()))
        })?;

        let id = linked.ok_or(StorageError::DuplicateLink { user_id, picnic_id })?;
        tracing::debug!(link_id = id, user_id, picnic_id, "User linked to picnic");
        Ok(id)
    }

    /// Users linked to a picnic, once per link, in link order.
    pub fn users_of_picnic(&self, picnic_id: i64) -> Result<Vec<User>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT users.id, users.name
             FROM users
             INNER JOIN users_picnics ON users.id = users_picnics.user_id
             WHERE users_picnics.picnic_id = ?1
             ORDER BY users_picnics.id",
        )?;
        let users = stmt
            .query_map([picnic_id], user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    /// Picnics a user is linked to, once per link, in link order.
    pub fn picnics_of_user(&self, user_id: i64) -> Result<Vec<Picnic>, StorageError> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT picnics.id, picnics.name, picnics.location, picnics.date
             FROM picnics
             INNER JOIN users_picnics ON picnics.id = users_picnics.picnic_id
             WHERE users_picnics.user_id = ?1
             ORDER BY users_picnics.id",
        )?;
        let picnics = stmt
            .query_map([user_id], picnic_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(picnics)
    }

    /// A contribution with its user, picnic and food item.
    ///
    /// `None` if the contribution does not exist or points at a missing row.
    pub fn contribution_details(
        &self,
        contribution_id: i64,
    ) -> Result<Option<ContributionDetails>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{SELECT_DETAILS} WHERE c.id = ?1"))?;
        Ok(stmt
            .query_row([contribution_id], details_from_row)
            .optional()?)
    }

    /// Every resolvable contribution to a picnic, by contribution id.
    pub fn contributions_to_picnic(
        &self,
        picnic_id: i64,
    ) -> Result<Vec<ContributionDetails>, StorageError> {
        let mut stmt = self
            .conn
            .prepare_cached(&format!("{SELECT_DETAILS} WHERE c.picnic_id = ?1 ORDER BY c.id"))?;
        let details = stmt
            .query_map([picnic_id], details_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Contribution;
    use crate::storage::test_support::memory_db;
    use crate::storage::{
        ContributionRepository, FoodItemRepository, PicnicRepository, UserRepository,
    };

    fn seed(conn: &Connection) -> (i64, i64, i64) {
        let picnic = PicnicRepository::new(conn)
            .create(&Picnic {
                id: 0,
                name: "Summer Bash".into(),
                location: "Park".into(),
                date: "2024-07-01".into(),
            })
            .unwrap();
        let user = UserRepository::new(conn)
            .create(&User {
                id: 0,
                name: "Ann".into(),
            })
            .unwrap();
        let item = FoodItemRepository::new(conn)
            .create(&FoodItem {
                id: 0,
                name: "Lemonade".into(),
                measure: "liters".into(),
                url: "https://example.com/lemonade".into(),
            })
            .unwrap();
        (picnic, user, item)
    }

    #[test]
    fn test_link_and_join_both_ways() {
        let conn = memory_db();
        let (picnic, user, _) = seed(&conn);
        let repo = RelationshipRepository::new(&conn);

        repo.link_user_to_picnic(user, picnic).unwrap();

        assert_eq!(
            repo.users_of_picnic(picnic).unwrap(),
            vec![User {
                id: 1,
                name: "Ann".into()
            }]
        );
        assert_eq!(
            repo.picnics_of_user(user).unwrap(),
            vec![Picnic {
                id: 1,
                name: "Summer Bash".into(),
                location: "Park".into(),
                date: "2024-07-01".into(),
            }]
        );
    }

    #[test]
    fn test_duplicate_links_allowed_by_default() {
        let conn = memory_db();
        let (picnic, user, _) = seed(&conn);
        let repo = RelationshipRepository::new(&conn);

        let first = repo.link_user_to_picnic(user, picnic).unwrap();
        let second = repo.link_user_to_picnic(user, picnic).unwrap();
        assert_ne!(first, second);

        let users = repo.users_of_picnic(picnic).unwrap();
        assert_eq!(users.len(), 2);
        assert!(users.iter().all(|u| u.id == user));
    }

    #[test]
    fn test_duplicate_links_rejected_by_policy() {
        let conn = memory_db();
        let (picnic, user, _) = seed(&conn);
        let repo = RelationshipRepository::new(&conn).with_link_policy(LinkPolicy::Reject);

        repo.link_user_to_picnic(user, picnic).unwrap();
        let err = repo.link_user_to_picnic(user, picnic).unwrap_err();
        assert!(matches!(
            err,
            StorageError::DuplicateLink { user_id, picnic_id } if user_id == user && picnic_id == picnic
        ));
        assert_eq!(repo.users_of_picnic(picnic).unwrap().len(), 1);
    }

    #[test]
    fn test_links_to_missing_rows_are_accepted_without_foreign_keys() {
        let conn = memory_db();
        let repo = RelationshipRepository::new(&conn);

        repo.link_user_to_picnic(40, 41).unwrap();
        // Inner join drops the dangling link.
        assert!(repo.users_of_picnic(41).unwrap().is_empty());
    }

    #[test]
    fn test_links_to_missing_rows_fail_with_foreign_keys() {
        let conn = memory_db();
        conn.pragma_update(None, "foreign_keys", true).unwrap();
        let (picnic, _, _) = seed(&conn);

        let err = RelationshipRepository::new(&conn)
            .link_user_to_picnic(99, picnic)
            .unwrap_err();
        assert!(err.is_constraint_violation());
    }

    #[test]
    fn test_empty_joins() {
        let conn = memory_db();
        let repo = RelationshipRepository::new(&conn);
        assert!(repo.users_of_picnic(1).unwrap().is_empty());
        assert!(repo.picnics_of_user(1).unwrap().is_empty());
        assert!(repo.contributions_to_picnic(1).unwrap().is_empty());
    }

    #[test]
    fn test_deleted_picnic_disappears_from_joins() {
        let conn = memory_db();
        let (picnic, user, _) = seed(&conn);
        let repo = RelationshipRepository::new(&conn);
        repo.link_user_to_picnic(user, picnic).unwrap();

        PicnicRepository::new(&conn).delete(picnic).unwrap();

        assert!(repo.picnics_of_user(user).unwrap().is_empty());
        let links: i64 = conn
            .query_row("SELECT COUNT(*) FROM users_picnics", [], |row| row.get(0))
            .unwrap();
        assert_eq!(links, 1, "deletes do not cascade");
    }

    #[test]
    fn test_contribution_details() {
        let conn = memory_db();
        let (picnic, user, item) = seed(&conn);
        let id = ContributionRepository::new(&conn)
            .create(&Contribution {
                id: 0,
                user_id: user,
                picnic_id: picnic,
                food_item_id: item,
                quantity: 3,
            })
            .unwrap();
        let repo = RelationshipRepository::new(&conn);

        let details = repo.contribution_details(id).unwrap().unwrap();
        assert_eq!(details.contribution.quantity, 3);
        assert_eq!(details.user.name, "Ann");
        assert_eq!(details.picnic.location, "Park");
        assert_eq!(details.food_item.measure, "liters");

        assert_eq!(repo.contributions_to_picnic(picnic).unwrap(), vec![details]);
        assert!(repo.contribution_details(id + 1).unwrap().is_none());
    }

    #[test]
    fn test_contribution_details_skips_dangling_rows() {
        let conn = memory_db();
        let (picnic, user, _) = seed(&conn);
        let id = ContributionRepository::new(&conn)
            .create(&Contribution {
                id: 0,
                user_id: user,
                picnic_id: picnic,
                food_item_id: 77,
                quantity: 1,
            })
            .unwrap();

        let repo = RelationshipRepository::new(&conn);
        assert!(repo.contribution_details(id).unwrap().is_none());
        assert!(repo.contributions_to_picnic(picnic).unwrap().is_empty());
    }
}
