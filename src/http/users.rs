//! User routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::{run_storage, ApiError, AppState, Changed, Created, Data};
use crate::model::{Picnic, User};
use crate::storage::{RelationshipRepository, UserRepository};

/// Create a user. A taken name is a 409.
#[tracing::instrument(skip(state, user), fields(name = %user.name))]
pub async fn create_user(
    State(state): State<AppState>,
    Json(user): Json<User>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let id = run_storage(&state, "user", "create", move |conn| {
        UserRepository::new(conn).create(&user)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(Created::new(id))))
}

#[tracing::instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Data<User>>, ApiError> {
    let user = run_storage(&state, "user", "get", move |conn| {
        UserRepository::new(conn).get_by_id(user_id)
    })
    .await?
    .ok_or(ApiError::NotFound {
        resource: "user",
        id: user_id,
    })?;

    Ok(Json(Data::new(user)))
}

#[tracing::instrument(skip(state))]
pub async fn list_users(State(state): State<AppState>) -> Result<Json<Data<Vec<User>>>, ApiError> {
    let users = run_storage(&state, "user", "list", |conn| {
        UserRepository::new(conn).get_all()
    })
    .await?;

    Ok(Json(Data::new(users)))
}

#[tracing::instrument(skip(state, user))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(user): Json<User>,
) -> Result<Json<Changed>, ApiError> {
    let changed = run_storage(&state, "user", "update", move |conn| {
        UserRepository::new(conn).update(&user, user_id)
    })
    .await?;

    Ok(Json(Changed::new(changed)))
}

/// Picnics of a user; 404 when the user does not exist.
#[tracing::instrument(skip(state))]
pub async fn picnics_of_user(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Data<Vec<Picnic>>>, ApiError> {
    let picnics = run_storage(&state, "user_picnic", "picnics_of_user", move |conn| {
        if UserRepository::new(conn).get_by_id(user_id)?.is_none() {
            return Ok(None);
        }
        RelationshipRepository::new(conn)
            .picnics_of_user(user_id)
            .map(Some)
    })
    .await?
    .ok_or(ApiError::NotFound {
        resource: "user",
        id: user_id,
    })?;

    Ok(Json(Data::new(picnics)))
}
