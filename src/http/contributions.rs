//! Contribution routes.
//!
//! `GET /contributions/{id}` reads by the contribution's own id.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::{run_storage, ApiError, AppState, Changed, Created, Data};
use crate::model::{Contribution, ContributionDetails};
use crate::storage::{ContributionRepository, RelationshipRepository};

#[tracing::instrument(
    skip(state, contribution),
    fields(user_id = contribution.user_id, picnic_id = contribution.picnic_id)
)]
pub async fn create_contribution(
    State(state): State<AppState>,
    Json(contribution): Json<Contribution>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let id = run_storage(&state, "contribution", "create", move |conn| {
        ContributionRepository::new(conn).create(&contribution)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(Created::new(id))))
}

#[tracing::instrument(skip(state))]
pub async fn get_contribution(
    State(state): State<AppState>,
    Path(contribution_id): Path<i64>,
) -> Result<Json<Data<Contribution>>, ApiError> {
    let contribution = run_storage(&state, "contribution", "get", move |conn| {
        ContributionRepository::new(conn).get_by_id(contribution_id)
    })
    .await?
    .ok_or(ApiError::NotFound {
        resource: "contribution",
        id: contribution_id,
    })?;

    Ok(Json(Data::new(contribution)))
}

#[tracing::instrument(skip(state))]
pub async fn contribution_details(
    State(state): State<AppState>,
    Path(contribution_id): Path<i64>,
) -> Result<Json<Data<ContributionDetails>>, ApiError> {
    let details = run_storage(&state, "contribution", "details", move |conn| {
        RelationshipRepository::new(conn).contribution_details(contribution_id)
    })
    .await?
    .ok_or(ApiError::NotFound {
        resource: "contribution",
        id: contribution_id,
    })?;

    Ok(Json(Data::new(details)))
}

#[tracing::instrument(skip(state))]
pub async fn list_contributions(
    State(state): State<AppState>,
) -> Result<Json<Data<Vec<Contribution>>>, ApiError> {
    let contributions = run_storage(&state, "contribution", "list", |conn| {
        ContributionRepository::new(conn).get_all()
    })
    .await?;

    Ok(Json(Data::new(contributions)))
}

#[tracing::instrument(skip(state, contribution))]
pub async fn update_contribution(
    State(state): State<AppState>,
    Path(contribution_id): Path<i64>,
    Json(contribution): Json<Contribution>,
) -> Result<Json<Changed>, ApiError> {
    let changed = run_storage(&state, "contribution", "update", move |conn| {
        ContributionRepository::new(conn).update(&contribution, contribution_id)
    })
    .await?;

    Ok(Json(Changed::new(changed)))
}

#[tracing::instrument(skip(state))]
pub async fn delete_contribution(
    State(state): State<AppState>,
    Path(contribution_id): Path<i64>,
) -> Result<Json<Changed>, ApiError> {
    let removed = run_storage(&state, "contribution", "delete", move |conn| {
        ContributionRepository::new(conn).delete(contribution_id)
    })
    .await?;

    Ok(Json(Changed::new(removed)))
}
