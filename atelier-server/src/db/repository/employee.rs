//! Employee Repository

use sqlx::SqlitePool;

use super::{RepoError, RepoResult};
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate, EmployeeWithStore, LifecycleState};

const EMPLOYEE_WITH_STORE_SELECT: &str = "SELECT e.id, e.store_id, e.name, e.phone, e.email, e.role, e.state, e.created_at, e.updated_at, s.name AS store_name FROM employees e LEFT JOIN stores s ON e.store_id = s.id";

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<EmployeeWithStore>> {
    let sql = format!("{EMPLOYEE_WITH_STORE_SELECT} WHERE e.state = 'active' ORDER BY e.name");
    let rows = sqlx::query_as::<_, EmployeeWithStore>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_all_with_inactive(pool: &SqlitePool) -> RepoResult<Vec<EmployeeWithStore>> {
    let sql = format!("{EMPLOYEE_WITH_STORE_SELECT} ORDER BY e.name");
    let rows = sqlx::query_as::<_, EmployeeWithStore>(&sql)
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let row = sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn create(pool: &SqlitePool, data: EmployeeCreate) -> RepoResult<Employee> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO employees (id, store_id, name, phone, email, role, state, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'active', ?7, ?7)",
    )
    .bind(id)
    .bind(data.store_id)
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(data.role)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: EmployeeUpdate) -> RepoResult<Employee> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE employees SET store_id = COALESCE(?1, store_id), name = COALESCE(?2, name), phone = COALESCE(?3, phone), email = COALESCE(?4, email), role = COALESCE(?5, role), updated_at = ?6 WHERE id = ?7",
    )
    .bind(data.store_id)
    .bind(&data.name)
    .bind(&data.phone)
    .bind(&data.email)
    .bind(data.role)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
}

/// Move an employee between lifecycle states.
pub async fn set_state(pool: &SqlitePool, id: i64, next: LifecycleState) -> RepoResult<Employee> {
    let employee = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))?;
    if !employee.state.can_transition_to(next) {
        return Err(RepoError::BusinessRule(format!(
            "Employee {id} is already {next}"
        )));
    }
    let now = shared::util::now_millis();
    sqlx::query("UPDATE employees SET state = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(next)
        .bind(now)
        .bind(id)
        .execute(pool)
        .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {id} not found")))
}

/// Hard delete. Refused while orders still reference the employee.
pub async fn delete_hard(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let referenced = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE employee_id = ?")
        .bind(id)
        .fetch_one(pool)
        .await?;
    if referenced > 0 {
        return Err(RepoError::BusinessRule(format!(
            "Employee {id} is assigned to {referenced} orders; deactivate them instead"
        )));
    }
    let rows = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
