//! Department queries

use shared::models::{Department, DepartmentView};
use sqlx::SqliteExecutor;

const VIEW_SELECT: &str = "SELECT d.id, d.company_id, c.name AS company_name, d.name,
        (SELECT COUNT(*) FROM employees e WHERE e.department_id = d.id) AS number_of_employees,
        d.created_at, d.updated_at
     FROM departments d
     JOIN companies c ON c.id = d.company_id";

/// Departments ordered by company name, then department name
pub async fn list_views<'e>(
    ex: impl SqliteExecutor<'e>,
    company_id: Option<i64>,
) -> Result<Vec<DepartmentView>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{VIEW_SELECT} WHERE (?1 IS NULL OR d.company_id = ?1) ORDER BY c.name, d.name, d.id"
    ))
    .bind(company_id)
    .fetch_all(ex)
    .await
}

pub async fn find_view<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<DepartmentView>, sqlx::Error> {
    sqlx::query_as(&format!("{VIEW_SELECT} WHERE d.id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn find_by_id<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<Department>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, company_id, name, created_at, updated_at FROM departments WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(ex)
    .await
}

/// Is `name` used by another department of `company_id`?
pub async fn name_taken<'e>(
    ex: impl SqliteExecutor<'e>,
    company_id: i64,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM departments
             WHERE company_id = ?1 AND name = ?2 AND (?3 IS NULL OR id != ?3))",
    )
    .bind(company_id)
    .bind(name)
    .bind(exclude_id)
    .fetch_one(ex)
    .await
}

pub async fn employee_count<'e>(ex: impl SqliteExecutor<'e>, id: i64) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM employees WHERE department_id = ?")
        .bind(id)
        .fetch_one(ex)
        .await
}

pub async fn insert<'e>(
    ex: impl SqliteExecutor<'e>,
    company_id: i64,
    name: &str,
    now: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO departments (company_id, name, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?3) RETURNING id",
    )
    .bind(company_id)
    .bind(name)
    .bind(now)
    .fetch_one(ex)
    .await
}

pub async fn update<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
    company_id: i64,
    name: &str,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let rows = sqlx::query(
        "UPDATE departments SET company_id = ?1, name = ?2, updated_at = ?3 WHERE id = ?4",
    )
    .bind(company_id)
    .bind(name)
    .bind(now)
    .bind(id)
    .execute(ex)
    .await?;
    Ok(rows.rows_affected())
}

pub async fn delete<'e>(ex: impl SqliteExecutor<'e>, id: i64) -> Result<u64, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM departments WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn delete_by_company<'e>(
    ex: impl SqliteExecutor<'e>,
    company_id: i64,
) -> Result<u64, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM departments WHERE company_id = ?")
        .bind(company_id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}
