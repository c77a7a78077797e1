//! Entity records shared by the storage layer and its adapters.
//!
//! Records are plain values. Relations between them are carried as foreign-key
//! integers and resolved on demand by
//! [`RelationshipRepository`](crate::storage::relations::RelationshipRepository).
//!
//! Every record derives `Default`; the default value is the "zero record"
//! (empty strings, zero ids) that older callers used as a not-found marker.

use serde::{Deserialize, Serialize};

/// A scheduled picnic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picnic {
    /// Assigned by storage; ignored on create and update.
    #[serde(default)]
    pub id: i64,
    pub name: String,
    pub location: String,
    /// Date/time string, stored verbatim.
    pub date: String,
}

/// A person who can attend picnics. Names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

/// Row of the user/picnic association table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPicnic {
    #[serde(default)]
    pub id: i64,
    pub user_id: i64,
    pub picnic_id: i64,
}

/// Something a user can bring, with the unit it is counted in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    /// Unit of measure, e.g. "kg" or "bottles".
    pub measure: String,
    /// Reference link for the item.
    pub url: String,
}

/// A quantity of one food item that a user brings to a picnic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contribution {
    #[serde(default)]
    pub id: i64,
    pub user_id: i64,
    pub picnic_id: i64,
    pub food_item_id: i64,
    /// Not range checked.
    pub quantity: i64,
}

/// A contribution joined with the user, picnic and food item it points at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContributionDetails {
    pub contribution: Contribution,
    pub user: User,
    pub picnic: Picnic,
    pub food_item: FoodItem,
}
