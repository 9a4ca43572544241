//! Employee API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::repository::employee;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate, EmployeeWithStore, LifecycleState};

#[derive(serde::Deserialize, Default)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/employees
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<EmployeeWithStore>>> {
    let employees = if query.include_inactive {
        employee::find_all_with_inactive(&state.pool).await?
    } else {
        employee::find_all(&state.pool).await?
    };
    Ok(Json(employees))
}

/// GET /api/employees/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Employee>> {
    let employee = employee::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {id}")))?;
    Ok(Json(employee))
}

/// POST /api/employees
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<Json<Employee>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;

    let employee = employee::create(&state.pool, payload).await?;
    Ok(Json(employee))
}

/// PUT /api/employees/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(phone) = &payload.phone {
        validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;

    let employee = employee::update(&state.pool, id, payload).await?;
    Ok(Json(employee))
}

/// POST /api/employees/:id/deactivate
pub async fn deactivate(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Employee>> {
    let employee = employee::set_state(&state.pool, id, LifecycleState::Inactive).await?;
    Ok(Json(employee))
}

/// POST /api/employees/:id/reactivate
pub async fn reactivate(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Employee>> {
    let employee = employee::set_state(&state.pool, id, LifecycleState::Active).await?;
    Ok(Json(employee))
}

/// DELETE /api/employees/:id - hard delete (unreferenced employees only)
pub async fn delete_hard(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = employee::delete_hard(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Employee {id}")));
    }
    Ok(Json(true))
}
