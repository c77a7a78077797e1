//! picnicctl: Command-line interface for a Picnic database.
//!
//! Opens the SQLite file directly, so no server needs to be running.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use picnic::storage::{Database, StorageConfig};
use std::path::PathBuf;

/// Command-line interface for a Picnic database.
#[derive(Parser)]
#[command(name = "picnicctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path of the SQLite database file
    #[arg(short, long, env = "PICNIC_DATABASE", default_value = "./data/picnic.db")]
    database: PathBuf,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create the database file and its tables
    Init,
    /// List picnics or show one picnic
    Picnics {
        #[command(subcommand)]
        action: PicnicsAction,
    },
    /// List users or show one user
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// List the food item catalog
    FoodItems {
        #[command(subcommand)]
        action: FoodItemsAction,
    },
    /// List contributions or show one contribution
    Contributions {
        #[command(subcommand)]
        action: ContributionsAction,
    },
}

#[derive(Subcommand)]
enum PicnicsAction {
    /// List all picnics
    List,
    /// Show one picnic
    Show { id: i64 },
    /// Users attending a picnic
    Roster { id: i64 },
    /// What is being brought to a picnic
    Contributions { id: i64 },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List all users
    List,
    /// Show one user
    Show { id: i64 },
    /// Picnics a user attends
    Picnics { id: i64 },
}

#[derive(Subcommand)]
enum FoodItemsAction {
    /// List all food items
    List,
}

#[derive(Subcommand)]
enum ContributionsAction {
    /// List all contributions
    List,
    /// Show one contribution with its user, picnic and food item
    Show { id: i64 },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Some(parent) = cli.database.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let db = Database::open(&cli.database, StorageConfig::default())
        .with_context(|| format!("failed to open {}", cli.database.display()))?;
    let conn = db.get().context("failed to get a database connection")?;

    match cli.command {
        Commands::Init => commands::init(&cli.database, cli.output)?,
        Commands::Picnics { action } => match action {
            PicnicsAction::List => commands::picnics::list(&conn, cli.output)?,
            PicnicsAction::Show { id } => commands::picnics::show(&conn, id, cli.output)?,
            PicnicsAction::Roster { id } => commands::picnics::roster(&conn, id, cli.output)?,
            PicnicsAction::Contributions { id } => {
                commands::picnics::contributions(&conn, id, cli.output)?;
            }
        },
        Commands::Users { action } => match action {
            UsersAction::List => commands::users::list(&conn, cli.output)?,
            UsersAction::Show { id } => commands::users::show(&conn, id, cli.output)?,
            UsersAction::Picnics { id } => commands::users::picnics(&conn, id, cli.output)?,
        },
        Commands::FoodItems { action } => match action {
            FoodItemsAction::List => commands::catalog::list_food_items(&conn, cli.output)?,
        },
        Commands::Contributions { action } => match action {
            ContributionsAction::List => {
                commands::catalog::list_contributions(&conn, cli.output)?;
            }
            ContributionsAction::Show { id } => {
                commands::catalog::show_contribution(&conn, id, cli.output)?;
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert_eq!("text".parse::<OutputFormat>(), Ok(OutputFormat::Text));
        assert_eq!("JSON".parse::<OutputFormat>(), Ok(OutputFormat::Json));
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_parse_nested_commands() {
        let cli = Cli::try_parse_from(["picnicctl", "-o", "json", "picnics", "roster", "3"]).unwrap();
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Commands::Picnics {
                action: PicnicsAction::Roster { id: 3 }
            }
        ));
    }
}
