//! Food item and contribution commands.

use anyhow::{bail, Result};
use picnic::storage::{ContributionRepository, FoodItemRepository, RelationshipRepository};
use rusqlite::Connection;

use super::{print_list, print_one};
use crate::OutputFormat;

pub fn list_food_items(conn: &Connection, format: OutputFormat) -> Result<()> {
    let items = FoodItemRepository::new(conn).get_all()?;
    print_list(&items, format, "No food items found.", |items| {
        println!("{:>6}  {:<30} {:<12} {}", "ID", "NAME", "MEASURE", "URL");
        println!("{}", "-".repeat(70));
        for item in items {
            println!("{:>6}  {:<30} {:<12} {}", item.id, item.name, item.measure, item.url);
        }
    })
}

pub fn list_contributions(conn: &Connection, format: OutputFormat) -> Result<()> {
    let contributions = ContributionRepository::new(conn).get_all()?;
    print_list(&contributions, format, "No contributions found.", |contributions| {
        println!("{:>6}  {:>8} {:>8} {:>8} {:>8}", "ID", "USER", "PICNIC", "FOOD", "QTY");
        println!("{}", "-".repeat(44));
        for c in contributions {
            println!(
                "{:>6}  {:>8} {:>8} {:>8} {:>8}",
                c.id, c.user_id, c.picnic_id, c.food_item_id, c.quantity
            );
        }
    })
}

pub fn show_contribution(conn: &Connection, id: i64, format: OutputFormat) -> Result<()> {
    let Some(details) = RelationshipRepository::new(conn).contribution_details(id)? else {
        bail!("contribution {id} not found");
    };
    print_one(&details, format, |d| {
        println!("Contribution {}", d.contribution.id);
        println!("  User:      {} ({})", d.user.name, d.user.id);
        println!("  Picnic:    {} ({})", d.picnic.name, d.picnic.id);
        println!(
            "  Brings:    {} {} of {}",
            d.contribution.quantity, d.food_item.measure, d.food_item.name
        );
    })
}
