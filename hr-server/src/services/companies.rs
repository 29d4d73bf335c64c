//! Company use cases

use shared::models::{CompanyDeleted, CompanyDetail, CompanyPayload, CompanySummary};
use sqlx::SqlitePool;

use super::company_not_found;
use crate::audit_log;
use crate::auth::CurrentUser;
use crate::db;
use crate::domain::reporting;
use crate::domain::validation::{self, CompanyFacts, WriteMode};
use crate::error::ServiceResult;
use crate::util;

pub async fn list(pool: &SqlitePool) -> ServiceResult<Vec<CompanySummary>> {
    Ok(db::companies::list_summaries(pool).await?)
}

/// Company with departments and their employees nested
pub async fn detail(pool: &SqlitePool, id: i64) -> ServiceResult<CompanyDetail> {
    let mut conn = pool.acquire().await?;
    let summary = db::companies::find_summary(&mut *conn, id)
        .await?
        .ok_or_else(|| company_not_found(id))?;
    let departments = db::departments::list_views(&mut *conn, Some(id)).await?;
    let employees = db::employees::list_records_by_company(&mut *conn, id).await?;

    Ok(reporting::company_detail(
        summary,
        departments,
        reporting::employee_views(employees, util::today()),
    ))
}

pub async fn create(
    pool: &SqlitePool,
    actor: &CurrentUser,
    payload: &CompanyPayload,
) -> ServiceResult<CompanySummary> {
    let mut tx = db::begin_write(pool).await?;

    let facts = company_facts(&mut tx, payload, None).await?;
    let candidate = validation::validate_company(payload, None, WriteMode::Create, &facts)?;

    let id = db::companies::insert(&mut *tx, &candidate.name, util::now_millis()).await?;
    let company = db::companies::find_summary(&mut *tx, id)
        .await?
        .ok_or_else(|| company_not_found(id))?;
    tx.commit().await?;

    audit_log!(actor, "company.create", format!("company:{id}"), company.name);
    Ok(company)
}

/// PUT (`Replace`) or PATCH (`Patch`)
pub async fn update(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    payload: &CompanyPayload,
    mode: WriteMode,
) -> ServiceResult<CompanySummary> {
    let mut tx = db::begin_write(pool).await?;

    let existing = db::companies::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| company_not_found(id))?;
    let facts = company_facts(&mut tx, payload, Some(id)).await?;
    let candidate = validation::validate_company(payload, Some(&existing), mode, &facts)?;

    db::companies::update(&mut *tx, id, &candidate.name, util::now_millis()).await?;
    let company = db::companies::find_summary(&mut *tx, id)
        .await?
        .ok_or_else(|| company_not_found(id))?;
    tx.commit().await?;

    audit_log!(actor, "company.update", format!("company:{id}"), company.name);
    Ok(company)
}

/// Delete a company with all of its departments and employees
pub async fn delete(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
) -> ServiceResult<CompanyDeleted> {
    let mut tx = db::begin_write(pool).await?;

    let company = db::companies::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| company_not_found(id))?;

    // Employees first: they hold RESTRICT references to departments
    let employees_deleted = db::employees::delete_by_company(&mut *tx, id).await?;
    let departments_deleted = db::departments::delete_by_company(&mut *tx, id).await?;
    db::companies::delete(&mut *tx, id).await?;
    tx.commit().await?;

    audit_log!(
        actor,
        "company.delete",
        format!("company:{id}"),
        format!("departments={departments_deleted} employees={employees_deleted}")
    );
    Ok(CompanyDeleted {
        id,
        name: company.name,
        departments_deleted,
        employees_deleted,
    })
}

async fn company_facts(
    conn: &mut sqlx::SqliteConnection,
    payload: &CompanyPayload,
    exclude_id: Option<i64>,
) -> Result<CompanyFacts, sqlx::Error> {
    let name_taken = match validation::trimmed(&payload.name).filter(|n| !n.is_empty()) {
        Some(name) => db::companies::name_taken(&mut *conn, name, exclude_id).await?,
        None => false,
    };
    Ok(CompanyFacts { name_taken })
}
