//! Data Transfer handlers — CSV export/import
//!
//! Import is row-tolerant: invalid rows are reported with their 1-based row
//! number while valid rows still land.

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;
use serde::Serialize;
use validator::Validate;

use crate::core::ServerState;
use crate::db::repository::{employee, inventory};
use crate::utils::csv;
use crate::utils::{AppError, AppResult};
use shared::models::{EmployeeCreate, EmployeeRole};

// =============================================================================
// Export
// =============================================================================

/// GET /api/data-transfer/employees/export
pub async fn export_employees(State(state): State<ServerState>) -> AppResult<impl IntoResponse> {
    let employees = employee::find_all_with_inactive(&state.pool).await?;

    let mut rows = vec![vec![
        "name".to_string(),
        "phone".to_string(),
        "role".to_string(),
        "email".to_string(),
        "store".to_string(),
        "state".to_string(),
    ]];
    for e in employees {
        rows.push(vec![
            e.employee.name,
            e.employee.phone,
            e.employee.role.as_str().to_string(),
            e.employee.email.unwrap_or_default(),
            e.store_name.unwrap_or_default(),
            e.employee.state.as_str().to_string(),
        ]);
    }

    Ok(csv_attachment("employees.csv", csv::write(&rows)))
}

/// GET /api/data-transfer/inventory/export
pub async fn export_inventory(State(state): State<ServerState>) -> AppResult<impl IntoResponse> {
    let items = inventory::find_all(&state.pool).await?;

    let mut rows = vec![vec![
        "name".to_string(),
        "sku".to_string(),
        "category".to_string(),
        "price".to_string(),
        "cost".to_string(),
        "quantity".to_string(),
        "min_stock_level".to_string(),
    ]];
    for i in items {
        rows.push(vec![
            i.item.name,
            i.item.sku.unwrap_or_default(),
            i.item.category.unwrap_or_default(),
            format!("{:.2}", i.item.price),
            format!("{:.2}", i.item.cost),
            i.item.quantity.to_string(),
            i.item.min_stock_level.to_string(),
        ]);
    }

    Ok(csv_attachment("inventory.csv", csv::write(&rows)))
}

fn csv_attachment(filename: &str, body: String) -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        body,
    )
}

// =============================================================================
// Import
// =============================================================================

/// Expected columns: name, phone, role, email (optional)
#[derive(Debug, Validate)]
struct EmployeeImportRow {
    #[validate(length(min = 1, message = "name is required"))]
    name: String,
    #[validate(length(min = 1, message = "phone is required"))]
    phone: String,
    #[validate(email(message = "email is not valid"))]
    email: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImportRowError {
    /// 1-based row number in the uploaded file
    pub row: usize,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub imported: usize,
    pub errors: Vec<ImportRowError>,
}

/// POST /api/data-transfer/employees/import
///
/// Body is raw CSV. A header row (first cell "name") is skipped if present.
pub async fn import_employees(
    State(state): State<ServerState>,
    body: String,
) -> AppResult<Json<ImportReport>> {
    let rows = csv::parse(&body);
    if rows.is_empty() {
        return Err(AppError::validation("CSV payload is empty"));
    }

    let has_header = rows[0]
        .first()
        .is_some_and(|cell| cell.eq_ignore_ascii_case("name"));
    let skip = usize::from(has_header);

    let mut report = ImportReport {
        imported: 0,
        errors: Vec::new(),
    };

    for (idx, row) in rows.iter().enumerate().skip(skip) {
        let row_number = idx + 1;

        if row.len() < 3 {
            report.errors.push(ImportRowError {
                row: row_number,
                message: format!("expected at least 3 columns (name, phone, role), got {}", row.len()),
            });
            continue;
        }

        let parsed = EmployeeImportRow {
            name: row[0].clone(),
            phone: row[1].clone(),
            email: row.get(3).filter(|v| !v.is_empty()).cloned(),
        };
        if let Err(errors) = parsed.validate() {
            report.errors.push(ImportRowError {
                row: row_number,
                message: flatten_validation_errors(&errors),
            });
            continue;
        }

        let role: EmployeeRole = match row[2].parse() {
            Ok(role) => role,
            Err(e) => {
                report.errors.push(ImportRowError {
                    row: row_number,
                    message: e,
                });
                continue;
            }
        };

        let payload = EmployeeCreate {
            store_id: None,
            name: parsed.name,
            phone: parsed.phone,
            email: parsed.email,
            role,
        };
        match employee::create(&state.pool, payload).await {
            Ok(_) => report.imported += 1,
            Err(e) => report.errors.push(ImportRowError {
                row: row_number,
                message: e.to_string(),
            }),
        }
    }

    tracing::info!(
        imported = report.imported,
        failed = report.errors.len(),
        "Employee CSV import finished"
    );

    Ok(Json(report))
}

fn flatten_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            errs.iter()
                .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .next()
                .unwrap_or_else(|| format!("{field} is invalid"))
        })
        .collect::<Vec<_>>()
        .join("; ")
}
