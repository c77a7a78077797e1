//! Food item routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use super::{run_storage, ApiError, AppState, Changed, Created, Data};
use crate::model::FoodItem;
use crate::storage::FoodItemRepository;

#[tracing::instrument(skip(state, item), fields(name = %item.name))]
pub async fn create_food_item(
    State(state): State<AppState>,
    Json(item): Json<FoodItem>,
) -> Result<(StatusCode, Json<Created>), ApiError> {
    let id = run_storage(&state, "food_item", "create", move |conn| {
        FoodItemRepository::new(conn).create(&item)
    })
    .await?;

    Ok((StatusCode::CREATED, Json(Created::new(id))))
}

#[tracing::instrument(skip(state))]
pub async fn get_food_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> Result<Json<Data<FoodItem>>, ApiError> {
    let item = run_storage(&state, "food_item", "get", move |conn| {
        FoodItemRepository::new(conn).get_by_id(item_id)
    })
    .await?
    .ok_or(ApiError::NotFound {
        resource: "food item",
        id: item_id,
    })?;

    Ok(Json(Data::new(item)))
}

/// All food items. An empty catalog is an empty list, not a 404.
#[tracing::instrument(skip(state))]
pub async fn list_food_items(
    State(state): State<AppState>,
) -> Result<Json<Data<Vec<FoodItem>>>, ApiError> {
    let items = run_storage(&state, "food_item", "list", |conn| {
        FoodItemRepository::new(conn).get_all()
    })
    .await?;

    Ok(Json(Data::new(items)))
}

#[tracing::instrument(skip(state, item))]
pub async fn update_food_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    Json(item): Json<FoodItem>,
) -> Result<Json<Changed>, ApiError> {
    let changed = run_storage(&state, "food_item", "update", move |conn| {
        FoodItemRepository::new(conn).update(&item, item_id)
    })
    .await?;

    Ok(Json(Changed::new(changed)))
}
