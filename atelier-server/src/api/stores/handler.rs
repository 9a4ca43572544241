//! Store API Handlers
//!
//! Deactivate and hard delete are distinct operations: deactivation is the
//! reversible soft delete, hard delete only succeeds for unreferenced stores.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::repository::store;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{LifecycleState, Store, StoreCreate, StoreUpdate};

#[derive(serde::Deserialize, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/stores
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Store>>> {
    let stores = if query.include_inactive {
        store::find_all_with_inactive(&state.pool).await?
    } else {
        store::find_all(&state.pool).await?
    };
    Ok(Json(stores))
}

/// GET /api/stores/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Store>> {
    let store = store::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Store {id}")))?;
    Ok(Json(store))
}

/// POST /api/stores
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<StoreCreate>,
) -> AppResult<Json<Store>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let store = store::create(&state.pool, payload).await?;
    Ok(Json(store))
}

/// PUT /api/stores/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StoreUpdate>,
) -> AppResult<Json<Store>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;

    let store = store::update(&state.pool, id, payload).await?;
    Ok(Json(store))
}

/// POST /api/stores/:id/deactivate
pub async fn deactivate(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Store>> {
    let store = store::set_state(&state.pool, id, LifecycleState::Inactive).await?;
    Ok(Json(store))
}

/// POST /api/stores/:id/reactivate
pub async fn reactivate(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Store>> {
    let store = store::set_state(&state.pool, id, LifecycleState::Active).await?;
    Ok(Json(store))
}

/// DELETE /api/stores/:id - hard delete (unreferenced stores only)
pub async fn delete_hard(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = store::delete_hard(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Store {id}")));
    }
    Ok(Json(true))
}
