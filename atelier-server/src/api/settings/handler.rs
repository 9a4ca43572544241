//! Display Settings Handlers
//!
//! `code` path segments must parse into the corresponding enum; labels and
//! colors are freely reassignable display metadata.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::repository::settings;
use crate::utils::validation::{MAX_SHORT_TEXT_LEN, validate_percent, validate_required_text};
use crate::utils::{AppError, AppResult};
use shared::models::{
    OrderStatus, StatusSetting, StatusSettingUpsert, VipTier, VipTierSetting, VipTierSettingUpsert,
};

/// GET /api/settings/order-statuses
pub async fn list_status_settings(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<StatusSetting>>> {
    let settings = settings::list_status_settings(&state.pool).await?;
    Ok(Json(settings))
}

/// GET /api/settings/order-statuses/:code
pub async fn get_status_setting(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<StatusSetting>> {
    let code: OrderStatus = code.parse().map_err(AppError::validation)?;
    let setting = settings::get_status_setting(&state.pool, code)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Status setting {code}")))?;
    Ok(Json(setting))
}

/// PUT /api/settings/order-statuses/:code
pub async fn upsert_status_setting(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Json(payload): Json<StatusSettingUpsert>,
) -> AppResult<Json<StatusSetting>> {
    let code: OrderStatus = code.parse().map_err(AppError::validation)?;
    validate_required_text(&payload.label, "label", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.color, "color", MAX_SHORT_TEXT_LEN)?;

    let setting = settings::upsert_status_setting(&state.pool, code, payload).await?;
    Ok(Json(setting))
}

/// GET /api/settings/vip-tiers
pub async fn list_vip_settings(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<VipTierSetting>>> {
    let settings = settings::list_vip_settings(&state.pool).await?;
    Ok(Json(settings))
}

/// GET /api/settings/vip-tiers/:code
pub async fn get_vip_setting(
    State(state): State<ServerState>,
    Path(code): Path<String>,
) -> AppResult<Json<VipTierSetting>> {
    let code: VipTier = code.parse().map_err(AppError::validation)?;
    let setting = settings::get_vip_setting(&state.pool, code)
        .await?
        .ok_or_else(|| AppError::not_found(format!("VIP tier setting {code}")))?;
    Ok(Json(setting))
}

/// PUT /api/settings/vip-tiers/:code
pub async fn upsert_vip_setting(
    State(state): State<ServerState>,
    Path(code): Path<String>,
    Json(payload): Json<VipTierSettingUpsert>,
) -> AppResult<Json<VipTierSetting>> {
    let code: VipTier = code.parse().map_err(AppError::validation)?;
    validate_required_text(&payload.label, "label", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.color, "color", MAX_SHORT_TEXT_LEN)?;
    validate_percent(payload.discount_percent, "discount_percent")?;

    let setting = settings::upsert_vip_setting(&state.pool, code, payload).await?;
    Ok(Json(setting))
}
