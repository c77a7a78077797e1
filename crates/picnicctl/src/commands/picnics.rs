//! Picnics command implementation.

use anyhow::{bail, Result};
use picnic::model::{ContributionDetails, Picnic};
use picnic::storage::{PicnicRepository, RelationshipRepository};
use rusqlite::Connection;

use super::{print_list, print_one};
use crate::OutputFormat;

fn print_table(picnics: &[Picnic]) {
    println!("{:>6}  {:<30} {:<24} {:<12}", "ID", "NAME", "LOCATION", "DATE");
    println!("{}", "-".repeat(76));
    for p in picnics {
        println!("{:>6}  {:<30} {:<24} {:<12}", p.id, p.name, p.location, p.date);
    }
}

pub fn list(conn: &Connection, format: OutputFormat) -> Result<()> {
    let picnics = PicnicRepository::new(conn).get_all()?;
    print_list(&picnics, format, "No picnics found.", print_table)
}

pub fn show(conn: &Connection, id: i64, format: OutputFormat) -> Result<()> {
    let Some(picnic) = PicnicRepository::new(conn).get_by_id(id)? else {
        bail!("picnic {id} not found");
    };
    print_one(&picnic, format, |p| {
        println!("Picnic {}", p.id);
        println!("  Name:      {}", p.name);
        println!("  Location:  {}", p.location);
        println!("  Date:      {}", p.date);
    })
}

pub fn roster(conn: &Connection, id: i64, format: OutputFormat) -> Result<()> {
    if PicnicRepository::new(conn).get_by_id(id)?.is_none() {
        bail!("picnic {id} not found");
    }
    let users = RelationshipRepository::new(conn).users_of_picnic(id)?;
    print_list(&users, format, "Nobody has joined this picnic.", |users| {
        super::users::print_table(users);
    })
}

pub fn contributions(conn: &Connection, id: i64, format: OutputFormat) -> Result<()> {
    if PicnicRepository::new(conn).get_by_id(id)?.is_none() {
        bail!("picnic {id} not found");
    }
    let details = RelationshipRepository::new(conn).contributions_to_picnic(id)?;
    print_list(&details, format, "Nothing is being brought yet.", print_details)
}

fn print_details(details: &[ContributionDetails]) {
    println!("{:>6}  {:<24} {:<24} {:>8} {:<10}", "ID", "USER", "FOOD", "QTY", "MEASURE");
    println!("{}", "-".repeat(76));
    for d in details {
        println!(
            "{:>6}  {:<24} {:<24} {:>8} {:<10}",
            d.contribution.id, d.user.name, d.food_item.name, d.contribution.quantity, d.food_item.measure
        );
    }
}
