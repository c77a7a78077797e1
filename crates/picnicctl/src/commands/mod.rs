//! Command implementations.

pub mod catalog;
pub mod picnics;
pub mod users;

use anyhow::Result;
use serde::Serialize;
use std::path::Path;

use crate::OutputFormat;

#[derive(Serialize)]
struct InitOutput<'a> {
    database: &'a Path,
    ready: bool,
}

/// The database is opened (and the schema created) before any command runs,
/// so `init` only reports where it lives.
pub fn init(database: &Path, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => println!("Database ready at {}", database.display()),
        OutputFormat::Json => {
            let output = InitOutput {
                database,
                ready: true,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Print a list as JSON with a total, or hand it to `text` for a table.
pub(crate) fn print_list<T: Serialize>(
    items: &[T],
    format: OutputFormat,
    empty: &str,
    text: impl FnOnce(&[T]),
) -> Result<()> {
    #[derive(Serialize)]
    struct ListOutput<'a, T> {
        items: &'a [T],
        total: usize,
    }

    match format {
        OutputFormat::Text => {
            if items.is_empty() {
                println!("{empty}");
            } else {
                text(items);
                println!();
                println!("Total: {}", items.len());
            }
        }
        OutputFormat::Json => {
            let output = ListOutput {
                items,
                total: items.len(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }
    Ok(())
}

/// Print one record as JSON, or hand it to `text`.
pub(crate) fn print_one<T: Serialize>(
    item: &T,
    format: OutputFormat,
    text: impl FnOnce(&T),
) -> Result<()> {
    match format {
        OutputFormat::Text => text(item),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
    }
    Ok(())
}
