//! Users command implementation.

use anyhow::{bail, Result};
use picnic::model::User;
use picnic::storage::{RelationshipRepository, UserRepository};
use rusqlite::Connection;

use super::{print_list, print_one};
use crate::OutputFormat;

pub(crate) fn print_table(users: &[User]) {
    println!("{:>6}  {:<40}", "ID", "NAME");
    println!("{}", "-".repeat(48));
    for u in users {
        println!("{:>6}  {:<40}", u.id, u.name);
    }
}

pub fn list(conn: &Connection, format: OutputFormat) -> Result<()> {
    let users = UserRepository::new(conn).get_all()?;
    print_list(&users, format, "No users found.", print_table)
}

pub fn show(conn: &Connection, id: i64, format: OutputFormat) -> Result<()> {
    let Some(user) = UserRepository::new(conn).get_by_id(id)? else {
        bail!("user {id} not found");
    };
    print_one(&user, format, |u| println!("User {}: {}", u.id, u.name))
}

pub fn picnics(conn: &Connection, id: i64, format: OutputFormat) -> Result<()> {
    if UserRepository::new(conn).get_by_id(id)?.is_none() {
        bail!("user {id} not found");
    }
    let picnics = RelationshipRepository::new(conn).picnics_of_user(id)?;
    print_list(&picnics, format, "This user has not joined any picnic.", |picnics| {
        for p in picnics {
            println!("{:>6}  {} ({}, {})", p.id, p.name, p.location, p.date);
        }
    })
}
