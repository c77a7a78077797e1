//! Picnic routes, including the picnic side of the user/picnic relation.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::{run_storage, ApiError, AppState, Changed, Created, Data};
use crate::model::{ContributionDetails, Picnic, User};
use crate::storage::{PicnicRepository, RelationshipRepository};

#[tracing::instrument(skip(state, picnic), fields(name = %picnic.name))]
pub async fn create_picnic(
    State(state): State<AppState>,
    Json(picnic): Json<Picnic>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let id = run_storage(&state, "picnic", "create", move |conn| {
        PicnicRepository::new(conn).create(&picnic)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(Created::new(id))))
}

#[tracing::instrument(skip(state))]
pub async fn get_picnic(
    State(state): State<AppState>,
    Path(picnic_id): Path<i64>,
) -> Result<Json<Data<Picnic>>, ApiError> {
    let picnic = run_storage(&state, "picnic", "get", move |conn| {
        PicnicRepository::new(conn).get_by_id(picnic_id)
    })
    .await?
    .ok_or(ApiError::NotFound {
        resource: "picnic",
        id: picnic_id,
    })?;

    Ok(Json(Data::new(picnic)))
}

#[tracing::instrument(skip(state))]
pub async fn list_picnics(State(state): State<AppState>) -> Result<Json<Data<Vec<Picnic>>>, ApiError> {
    let picnics = run_storage(&state, "picnic", "list", |conn| {
        PicnicRepository::new(conn).get_all()
    })
    .await?;

    Ok(Json(Data::new(picnics)))
}

#[tracing::instrument(skip(state, picnic))]
pub async fn update_picnic(
    State(state): State<AppState>,
    Path(picnic_id): Path<i64>,
    Json(picnic): Json<Picnic>,
) -> Result<Json<Changed>, ApiError> {
    let changed = run_storage(&state, "picnic", "update", move |conn| {
        PicnicRepository::new(conn).update(&picnic, picnic_id)
    })
    .await?;

    Ok(Json(Changed::new(changed)))
}

#[tracing::instrument(skip(state))]
pub async fn delete_picnic(
    State(state): State<AppState>,
    Path(picnic_id): Path<i64>,
) -> Result<Json<Changed>, ApiError> {
    let removed = run_storage(&state, "picnic", "delete", move |conn| {
        PicnicRepository::new(conn).delete(picnic_id)
    })
    .await?;

    Ok(Json(Changed::new(removed)))
}

#[tracing::instrument(skip(state))]
pub async fn link_user_to_picnic(
    State(state): State<AppState>,
    Path((picnic_id, user_id)): Path<(i64, i64)>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let policy = state.db.link_policy();
    let id = run_storage(&state, "user_picnic", "create", move |conn| {
        RelationshipRepository::new(conn)
            .with_link_policy(policy)
            .link_user_to_picnic(user_id, picnic_id)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(Created::new(id))))
}

/// Users of a picnic; 404 when the picnic itself does not exist.
#[tracing::instrument(skip(state))]
pub async fn users_of_picnic(
    State(state): State<AppState>,
    Path(picnic_id): Path<i64>,
) -> Result<Json<Data<Vec<User>>>, ApiError> {
    let users = run_storage(&state, "user_picnic", "users_of_picnic", move |conn| {
        if PicnicRepository::new(conn).get_by_id(picnic_id)?.is_none() {
            return Ok(None);
        }
        RelationshipRepository::new(conn)
            .users_of_picnic(picnic_id)
            .map(Some)
    })
    .await?
    .ok_or(ApiError::NotFound {
        resource: "picnic",
        id: picnic_id,
    })?;

    Ok(Json(Data::new(users)))
}

#[tracing::instrument(skip(state))]
pub async fn contributions_to_picnic(
    State(state): State<AppState>,
    Path(picnic_id): Path<i64>,
) -> Result<Json<Data<Vec<ContributionDetails>>>, ApiError> {
    let details = run_storage(&state, "contribution", "list_for_picnic", move |conn| {
        if PicnicRepository::new(conn).get_by_id(picnic_id)?.is_none() {
            return Ok(None);
        }
        RelationshipRepository::new(conn)
            .contributions_to_picnic(picnic_id)
            .map(Some)
    })
    .await?
    .ok_or(ApiError::NotFound {
        resource: "picnic",
        id: picnic_id,
    })?;

    Ok(Json(Data::new(details)))
}
