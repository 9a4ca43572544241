//! Inventory API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::inventory;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_non_negative_amount, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{
    InventoryCreate, InventoryItem, InventoryOverview, InventoryUpdate, QuantityAdjust,
};

/// GET /api/inventory
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<InventoryOverview>>> {
    let items = inventory::find_all(&state.pool).await?;
    Ok(Json(items))
}

/// GET /api/inventory/low-stock - items below their minimum stock level
pub async fn low_stock(State(state): State<ServerState>) -> AppResult<Json<Vec<InventoryOverview>>> {
    let items = inventory::find_low_stock(&state.pool).await?;
    Ok(Json(items))
}

/// GET /api/inventory/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<InventoryItem>> {
    let item = inventory::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Inventory item {id}")))?;
    Ok(Json(item))
}

/// POST /api/inventory
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<InventoryCreate>,
) -> AppResult<Json<InventoryItem>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.sku, "sku", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    validate_non_negative_amount(payload.price, "price")?;
    if let Some(cost) = payload.cost {
        validate_non_negative_amount(cost, "cost")?;
    }
    if payload.quantity.is_some_and(|q| q < 0) {
        return Err(AppError::validation("quantity must not be negative"));
    }
    if payload.min_stock_level.is_some_and(|m| m < 0) {
        return Err(AppError::validation("min_stock_level must not be negative"));
    }

    let item = inventory::create(&state.pool, payload).await?;
    Ok(Json(item))
}

/// PUT /api/inventory/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<InventoryUpdate>,
) -> AppResult<Json<InventoryItem>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.sku, "sku", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.category, "category", MAX_SHORT_TEXT_LEN)?;
    if let Some(price) = payload.price {
        validate_non_negative_amount(price, "price")?;
    }
    if let Some(cost) = payload.cost {
        validate_non_negative_amount(cost, "cost")?;
    }
    if payload.min_stock_level.is_some_and(|m| m < 0) {
        return Err(AppError::validation("min_stock_level must not be negative"));
    }

    let item = inventory::update(&state.pool, id, payload).await?;
    Ok(Json(item))
}

/// POST /api/inventory/:id/adjust - signed stock adjustment
pub async fn adjust_quantity(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<QuantityAdjust>,
) -> AppResult<Json<InventoryItem>> {
    if payload.delta == 0 {
        return Err(AppError::validation("delta must not be zero"));
    }
    let item = inventory::adjust_quantity(&state.pool, id, payload.delta).await?;
    if let Some(reason) = &payload.reason {
        tracing::info!(item_id = id, delta = payload.delta, reason = %reason, "Stock adjusted");
    }
    Ok(Json(item))
}

/// DELETE /api/inventory/:id - deactivate (soft delete)
pub async fn deactivate(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deactivated = inventory::deactivate(&state.pool, id).await?;
    if !deactivated {
        return Err(AppError::not_found(format!("Inventory item {id}")));
    }
    Ok(Json(true))
}
