//! Measurement Model
//!
//! A measurement profile is mutable, but every edit first snapshots the
//! previous values into an immutable `MeasurementVersion` row. Order items
//! may pin a specific version id so later edits never change what an
//! already-placed order was cut against.

use serde::{Deserialize, Serialize};

/// Numeric body measurements, all in centimeters. Every field is optional;
/// a profile for a kurta fills different fields than one for trousers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct BodyMetrics {
    pub chest: Option<f64>,
    pub waist: Option<f64>,
    pub hip: Option<f64>,
    pub shoulder_width: Option<f64>,
    pub sleeve_length: Option<f64>,
    pub full_length: Option<f64>,
    pub neck: Option<f64>,
    pub armhole: Option<f64>,
    pub bicep: Option<f64>,
    pub wrist: Option<f64>,
    pub front_length: Option<f64>,
    pub back_length: Option<f64>,
    pub cross_back: Option<f64>,
    pub trouser_waist: Option<f64>,
    pub trouser_length: Option<f64>,
    pub inseam: Option<f64>,
    pub thigh: Option<f64>,
    pub knee: Option<f64>,
    pub calf: Option<f64>,
    pub bottom_width: Option<f64>,
}

/// Live measurement profile (always holds current values)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Measurement {
    pub id: i64,
    pub customer_id: i64,
    pub order_id: Option<i64>,
    pub garment_type: String,
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub metrics: BodyMetrics,
    pub notes: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub image_urls: Vec<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Immutable snapshot of a measurement at a point in time. Never mutated;
/// deleted only by retention pruning, and never while pinned by an order
/// item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MeasurementVersion {
    pub id: i64,
    pub measurement_id: i64,
    /// Strictly increasing per measurement, never reused
    pub version_number: i64,
    pub garment_type: String,
    #[serde(flatten)]
    #[cfg_attr(feature = "db", sqlx(flatten))]
    pub metrics: BodyMetrics,
    pub notes: Option<String>,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub image_urls: Vec<String>,
    pub created_at: i64,
}

/// Create measurement payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementCreate {
    pub customer_id: i64,
    pub order_id: Option<i64>,
    pub garment_type: String,
    #[serde(flatten)]
    pub metrics: BodyMetrics,
    pub notes: Option<String>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

/// Update measurement payload. The edit form posts the complete metric set,
/// so metrics are replaced wholesale; the remaining fields are partial.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementUpdate {
    pub order_id: Option<i64>,
    pub garment_type: Option<String>,
    #[serde(flatten)]
    pub metrics: BodyMetrics,
    pub notes: Option<String>,
    pub image_urls: Option<Vec<String>>,
}

/// Measurement with its version history (detail view)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeasurementDetail {
    #[serde(flatten)]
    pub measurement: Measurement,
    pub versions: Vec<MeasurementVersion>,
}
