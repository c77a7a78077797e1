//! JSON HTTP adapter over the storage layer.
//!
//! Routes live under `/api/v1`. Storage calls are blocking, so each one runs
//! on tokio's blocking pool with its own pooled connection.

pub mod contributions;
pub mod error;
pub mod food_items;
pub mod picnics;
pub mod users;

pub use error::ApiError;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use rusqlite::Connection;
use serde::Serialize;
use std::time::Instant;
use tower_http::trace::TraceLayer;

use crate::observability::metrics::record_storage_operation;
use crate::storage::{Database, StorageError};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// `{"data": ...}` envelope for reads.
#[derive(Debug, Serialize)]
pub struct Data<T> {
    pub data: T,
}

impl<T> Data<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Body returned by create and link operations.
#[derive(Debug, Serialize)]
pub struct Created {
    pub message: &'static str,
    pub id: i64,
}

impl Created {
    pub fn new(id: i64) -> Self {
        Self {
            message: "Success",
            id,
        }
    }
}

/// Body returned by update and delete operations.
///
/// Unknown ids are still a success; `rows_affected` is 0 for them.
#[derive(Debug, Serialize)]
pub struct Changed {
    pub message: &'static str,
    pub rows_affected: usize,
}

impl Changed {
    pub fn new(rows_affected: usize) -> Self {
        Self {
            message: "Success",
            rows_affected,
        }
    }
}

/// Run a storage operation on the blocking pool and record its metrics.
pub(crate) async fn run_storage<T, F>(
    state: &AppState,
    entity: &'static str,
    operation: &'static str,
    op: F,
) -> Result<T, ApiError>
where
    F: FnOnce(&Connection) -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    let db = state.db.clone();
    let start = Instant::now();

    let result = tokio::task::spawn_blocking(move || {
        let conn = db.get()?;
        op(&*conn)
    })
    .await
    .map_err(|e| ApiError::Internal {
        message: format!("storage task failed: {e}"),
    })?;

    record_storage_operation(
        entity,
        operation,
        start.elapsed().as_secs_f64(),
        result.is_ok(),
    );
    result.map_err(ApiError::from)
}

/// Create the API router.
///
/// Collection routes answer both with and without a trailing slash.
pub fn create_router(state: AppState) -> Router {
    let picnics_root = get(picnics::list_picnics).post(picnics::create_picnic);
    let users_root = get(users::list_users).post(users::create_user);
    let food_items_root = get(food_items::list_food_items).post(food_items::create_food_item);
    let contributions_root =
        get(contributions::list_contributions).post(contributions::create_contribution);

    let api = Router::new()
        .route("/picnics", picnics_root.clone())
        .route("/picnics/", picnics_root)
        .route(
            "/picnics/{picnic_id}",
            get(picnics::get_picnic)
                .put(picnics::update_picnic)
                .delete(picnics::delete_picnic),
        )
        .route("/picnics/{picnic_id}/users", get(picnics::users_of_picnic))
        .route(
            "/picnics/{picnic_id}/users/{user_id}",
            post(picnics::link_user_to_picnic),
        )
        .route(
            "/picnics/{picnic_id}/contributions",
            get(picnics::contributions_to_picnic),
        )
        .route("/users", users_root.clone())
        .route("/users/", users_root)
        .route(
            "/users/{user_id}",
            get(users::get_user).put(users::update_user),
        )
        .route("/users/{user_id}/picnics", get(users::picnics_of_user))
        .route("/food-items", food_items_root.clone())
        .route("/food-items/", food_items_root)
        .route(
            "/food-items/{item_id}",
            get(food_items::get_food_item).put(food_items::update_food_item),
        )
        .route("/contributions", contributions_root.clone())
        .route("/contributions/", contributions_root)
        .route(
            "/contributions/{contribution_id}",
            get(contributions::get_contribution)
                .put(contributions::update_contribution)
                .delete(contributions::delete_contribution),
        )
        .route(
            "/contributions/{contribution_id}/details",
            get(contributions::contribution_details),
        );

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Handle GET /health - Basic health check.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
