//! Customer API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::repository::customer::{self, CascadeReport};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_NOTE_LEN, MAX_SHORT_TEXT_LEN,
    validate_optional_text, validate_percent, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{Customer, CustomerCreate, CustomerUpdate, CustomerWithStats};

#[derive(serde::Deserialize)]
pub struct SearchQuery {
    pub q: String,
}

/// GET /api/customers - list customers with order stats
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<CustomerWithStats>>> {
    let customers = customer::find_all(&state.pool).await?;
    Ok(Json(customers))
}

/// GET /api/customers/search?q=xxx - search by name or phone
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<CustomerWithStats>>> {
    let customers = customer::search(&state.pool, &query.q).await?;
    Ok(Json(customers))
}

/// GET /api/customers/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Customer>> {
    let customer = customer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Customer {id}")))?;
    Ok(Json(customer))
}

/// POST /api/customers
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CustomerCreate>,
) -> AppResult<Json<Customer>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    if let Some(d) = payload.discount_percent {
        validate_percent(d, "discount_percent")?;
    }

    let customer = customer::create(&state.pool, payload).await?;
    Ok(Json(customer))
}

/// PUT /api/customers/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CustomerUpdate>,
) -> AppResult<Json<Customer>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(phone) = &payload.phone {
        validate_required_text(phone, "phone", MAX_SHORT_TEXT_LEN)?;
    }
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    if let Some(d) = payload.discount_percent {
        validate_percent(d, "discount_percent")?;
    }

    let customer = customer::update(&state.pool, id, payload).await?;
    Ok(Json(customer))
}

/// DELETE /api/customers/:id - cascade delete the customer and every
/// dependent order, item, payment and measurement
pub async fn delete_cascade(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CascadeReport>> {
    let report = customer::delete_cascade(&state.pool, id).await?;
    tracing::info!(
        customer_id = id,
        orders = report.orders,
        measurements = report.measurements,
        "Customer cascade delete completed"
    );
    Ok(Json(report))
}
