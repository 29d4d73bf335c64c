//! Employee queries

use shared::models::{Employee, EmployeeFilter, EmployeeStatus};
use sqlx::SqliteExecutor;

use crate::domain::validation::EmployeeCandidate;

/// Employee row joined with its company and department names
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct EmployeeRecord {
    #[sqlx(flatten)]
    pub employee: Employee,
    pub company_name: String,
    pub department_name: Option<String>,
}

const RECORD_SELECT: &str = "SELECT e.id, e.company_id, e.department_id, e.status, e.name,
        e.email, e.phone, e.address, e.designation, e.hired_on, e.created_at, e.updated_at,
        c.name AS company_name, d.name AS department_name
     FROM employees e
     JOIN companies c ON c.id = e.company_id
     LEFT JOIN departments d ON d.id = e.department_id";

const NEWEST_FIRST: &str = "ORDER BY e.created_at DESC, e.id DESC";

/// Filtered listing, newest first; unset filters match everything
pub async fn list_records<'e>(
    ex: impl SqliteExecutor<'e>,
    filter: &EmployeeFilter,
) -> Result<Vec<EmployeeRecord>, sqlx::Error> {
    sqlx::query_as(&format!(
        "{RECORD_SELECT}
         WHERE (?1 IS NULL OR e.company_id = ?1)
           AND (?2 IS NULL OR e.department_id = ?2)
           AND (?3 IS NULL OR e.status = ?3)
         {NEWEST_FIRST}"
    ))
    .bind(filter.company)
    .bind(filter.department)
    .bind(filter.status.map(|s| s.as_db()))
    .fetch_all(ex)
    .await
}

pub async fn list_records_by_company<'e>(
    ex: impl SqliteExecutor<'e>,
    company_id: i64,
) -> Result<Vec<EmployeeRecord>, sqlx::Error> {
    list_records(
        ex,
        &EmployeeFilter {
            company: Some(company_id),
            ..Default::default()
        },
    )
    .await
}

pub async fn list_records_by_department<'e>(
    ex: impl SqliteExecutor<'e>,
    department_id: i64,
) -> Result<Vec<EmployeeRecord>, sqlx::Error> {
    list_records(
        ex,
        &EmployeeFilter {
            department: Some(department_id),
            ..Default::default()
        },
    )
    .await
}

/// Hired employees, newest first
pub async fn list_hired_records<'e>(
    ex: impl SqliteExecutor<'e>,
) -> Result<Vec<EmployeeRecord>, sqlx::Error> {
    list_records(
        ex,
        &EmployeeFilter {
            status: Some(EmployeeStatus::Hired),
            ..Default::default()
        },
    )
    .await
}

pub async fn find_record<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<EmployeeRecord>, sqlx::Error> {
    sqlx::query_as(&format!("{RECORD_SELECT} WHERE e.id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await
}

pub async fn find_by_id<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<Employee>, sqlx::Error> {
    sqlx::query_as(
        "SELECT id, company_id, department_id, status, name, email, phone, address,
                designation, hired_on, created_at, updated_at
         FROM employees WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(ex)
    .await
}

pub async fn insert<'e>(
    ex: impl SqliteExecutor<'e>,
    candidate: &EmployeeCandidate,
    now: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO employees (company_id, department_id, status, name, email, phone,
                                address, designation, hired_on, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10) RETURNING id",
    )
    .bind(candidate.company_id)
    .bind(candidate.department_id)
    .bind(candidate.status.as_db())
    .bind(&candidate.name)
    .bind(&candidate.email)
    .bind(&candidate.phone)
    .bind(&candidate.address)
    .bind(&candidate.designation)
    .bind(candidate.hired_on)
    .bind(now)
    .fetch_one(ex)
    .await
}

/// Overwrite every writable column with the validated candidate
pub async fn update<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
    candidate: &EmployeeCandidate,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let rows = sqlx::query(
        "UPDATE employees SET company_id = ?1, department_id = ?2, status = ?3, name = ?4,
                email = ?5, phone = ?6, address = ?7, designation = ?8, hired_on = ?9,
                updated_at = ?10
         WHERE id = ?11",
    )
    .bind(candidate.company_id)
    .bind(candidate.department_id)
    .bind(candidate.status.as_db())
    .bind(&candidate.name)
    .bind(&candidate.email)
    .bind(&candidate.phone)
    .bind(&candidate.address)
    .bind(&candidate.designation)
    .bind(candidate.hired_on)
    .bind(now)
    .bind(id)
    .execute(ex)
    .await?;
    Ok(rows.rows_affected())
}

pub async fn delete<'e>(ex: impl SqliteExecutor<'e>, id: i64) -> Result<u64, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}

pub async fn delete_by_company<'e>(
    ex: impl SqliteExecutor<'e>,
    company_id: i64,
) -> Result<u64, sqlx::Error> {
    let rows = sqlx::query("DELETE FROM employees WHERE company_id = ?")
        .bind(company_id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}
