//! Measurement API Handlers
//!
//! PUT runs the versioning engine: the pre-edit values are snapshotted into
//! an immutable version row before the update lands, atomically.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::core::ServerState;
use crate::db::repository::measurement;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::models::{
    Measurement, MeasurementCreate, MeasurementDetail, MeasurementUpdate, MeasurementVersion,
};

#[derive(serde::Deserialize, Default)]
pub struct ListQuery {
    pub customer_id: Option<i64>,
}

/// GET /api/measurements?customer_id=xxx
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<Measurement>>> {
    let measurements = match query.customer_id {
        Some(customer_id) => measurement::find_by_customer(&state.pool, customer_id).await?,
        None => measurement::find_all(&state.pool).await?,
    };
    Ok(Json(measurements))
}

/// GET /api/measurements/:id - profile with version history
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MeasurementDetail>> {
    let detail = measurement::find_detail(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Measurement {id}")))?;
    Ok(Json(detail))
}

/// GET /api/measurements/:id/versions
pub async fn list_versions(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Vec<MeasurementVersion>>> {
    measurement::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Measurement {id}")))?;
    let versions = measurement::list_versions(&state.pool, id).await?;
    Ok(Json(versions))
}

/// POST /api/measurements
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MeasurementCreate>,
) -> AppResult<Json<Measurement>> {
    validate_required_text(&payload.garment_type, "garment_type", MAX_NAME_LEN)?;
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    validate_metrics(&payload.metrics)?;
    for url in &payload.image_urls {
        validate_required_text(url, "image_urls entry", MAX_URL_LEN)?;
    }

    let measurement = measurement::create(&state.pool, payload).await?;
    Ok(Json(measurement))
}

/// PUT /api/measurements/:id - versioned update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MeasurementUpdate>,
) -> AppResult<Json<Measurement>> {
    if let Some(garment_type) = &payload.garment_type {
        validate_required_text(garment_type, "garment_type", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;
    validate_metrics(&payload.metrics)?;
    if let Some(urls) = &payload.image_urls {
        for url in urls {
            validate_required_text(url, "image_urls entry", MAX_URL_LEN)?;
        }
    }

    let cap = state.config.measurement_version_cap;
    let measurement = measurement::update(&state.pool, id, payload, cap).await?;
    Ok(Json(measurement))
}

/// DELETE /api/measurements/:id
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    let deleted = measurement::delete(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Measurement {id}")));
    }
    Ok(Json(true))
}

/// Every provided metric must be a finite, non-negative number of
/// centimeters within a sane garment range.
fn validate_metrics(metrics: &shared::models::BodyMetrics) -> AppResult<()> {
    const MAX_CM: f64 = 500.0;
    let fields = [
        ("chest", metrics.chest),
        ("waist", metrics.waist),
        ("hip", metrics.hip),
        ("shoulder_width", metrics.shoulder_width),
        ("sleeve_length", metrics.sleeve_length),
        ("full_length", metrics.full_length),
        ("neck", metrics.neck),
        ("armhole", metrics.armhole),
        ("bicep", metrics.bicep),
        ("wrist", metrics.wrist),
        ("front_length", metrics.front_length),
        ("back_length", metrics.back_length),
        ("cross_back", metrics.cross_back),
        ("trouser_waist", metrics.trouser_waist),
        ("trouser_length", metrics.trouser_length),
        ("inseam", metrics.inseam),
        ("thigh", metrics.thigh),
        ("knee", metrics.knee),
        ("calf", metrics.calf),
        ("bottom_width", metrics.bottom_width),
    ];
    for (name, value) in fields {
        if let Some(v) = value
            && (!v.is_finite() || !(0.0..=MAX_CM).contains(&v))
        {
            return Err(AppError::validation(format!(
                "{name} must be between 0 and {MAX_CM} cm, got {v}"
            )));
        }
    }
    Ok(())
}
