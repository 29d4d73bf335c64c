//! Company queries

use shared::models::{Company, CompanySummary};
use sqlx::SqliteExecutor;

const SUMMARY_SELECT: &str = "SELECT c.id, c.name,
        (SELECT COUNT(*) FROM departments d WHERE d.company_id = c.id) AS number_of_departments,
        (SELECT COUNT(*) FROM employees e WHERE e.company_id = c.id) AS number_of_employees,
        c.created_at, c.updated_at
     FROM companies c";

pub async fn list_summaries<'e>(
    ex: impl SqliteExecutor<'e>,
) -> Result<Vec<CompanySummary>, sqlx::Error> {
    sqlx::query_as(&format!("{SUMMARY_SELECT} ORDER BY c.name, c.id"))
        .fetch_all(ex)
        .await
}

pub async fn find_summary<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<CompanySummary>, sqlx::Error> {
    sqlx::query_as(&format!("{SUMMARY_SELECT} WHERE c.id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn find_by_id<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<Company>, sqlx::Error> {
    sqlx::query_as("SELECT id, name, created_at, updated_at FROM companies WHERE id = ?")
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn exists<'e>(ex: impl SqliteExecutor<'e>, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM companies WHERE id = ?)")
        .bind(id)
        .fetch_one(ex)
        .await
}

/// Is `name` used by a company other than `exclude_id`?
pub async fn name_taken<'e>(
    ex: impl SqliteExecutor<'e>,
    name: &str,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM companies WHERE name = ?1 AND (?2 IS NULL OR id != ?2))",
    )
    .bind(name)
    .bind(exclude_id)
    .fetch_one(ex)
    .await
}

pub async fn insert<'e>(
    ex: impl SqliteExecutor<'e>,
    name: &str,
    now: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO companies (name, created_at, updated_at) VALUES (?1, ?2, ?2) RETURNING id",
    )
    .bind(name)
    .bind(now)
    .fetch_one(ex)
    .await
}

pub async fn update<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
    name: &str,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let rows = sqlx::query("UPDATE companies SET name = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(name)
        .bind(now)
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn delete<'e>(ex: impl SqliteExecutor<'e>, id: i64) -> Result<u64, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM companies WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}
