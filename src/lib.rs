//! Picnic: a picnic organizing backend persisted in SQLite.
//!
//! Users, picnics, food items and contributions live in one SQLite file.
//! Users join picnics through an association table, and contributions record
//! who brings how much of which food item to which picnic.
//!
//! # Modules
//!
//! - [`config`]: CLI and environment configuration
//! - [`http`]: JSON routes over the repositories
//! - [`model`]: Entity records
//! - [`observability`]: Metrics and tracing setup
//! - [`server`]: HTTP server lifecycle
//! - [`storage`]: SQLite schema, connection pool and repositories

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions,    // storage::users::UserRepository is fine
    clippy::must_use_candidate,         // Not all functions need #[must_use]
    clippy::missing_errors_doc,         // Error docs can be verbose
    clippy::missing_panics_doc,         // Panic docs can be verbose
    clippy::needless_raw_string_hashes, // r#""# is fine for SQL
    clippy::similar_names               // user_id/users_id are fine
)]

pub mod config;
pub mod http;
pub mod model;
pub mod observability;
pub mod server;
pub mod storage;
