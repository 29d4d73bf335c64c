//! Employee use cases

use shared::models::{Employee, EmployeeFilter, EmployeePayload, EmployeeView};
use sqlx::SqlitePool;

use super::employee_not_found;
use crate::audit_log;
use crate::auth::CurrentUser;
use crate::db;
use crate::domain::reporting;
use crate::domain::validation::{self, EmployeeFacts, WriteMode};
use crate::error::ServiceResult;
use crate::util;

pub async fn list(pool: &SqlitePool, filter: &EmployeeFilter) -> ServiceResult<Vec<EmployeeView>> {
    let records = db::employees::list_records(pool, filter).await?;
    Ok(reporting::employee_views(records, util::today()))
}

pub async fn get(pool: &SqlitePool, id: i64) -> ServiceResult<EmployeeView> {
    let record = db::employees::find_record(pool, id)
        .await?
        .ok_or_else(|| employee_not_found(id))?;
    Ok(reporting::employee_view(record, util::today()))
}

pub async fn create(
    pool: &SqlitePool,
    actor: &CurrentUser,
    payload: &EmployeePayload,
) -> ServiceResult<EmployeeView> {
    let mut tx = db::begin_write(pool).await?;

    let facts = employee_facts(&mut tx, payload, None).await?;
    let candidate = validation::validate_employee(payload, None, WriteMode::Create, &facts)?;

    let id = db::employees::insert(&mut *tx, &candidate, util::now_millis()).await?;
    let record = db::employees::find_record(&mut *tx, id)
        .await?
        .ok_or_else(|| employee_not_found(id))?;
    tx.commit().await?;

    audit_log!(
        actor,
        "employee.create",
        format!("employee:{id}"),
        candidate.status
    );
    Ok(reporting::employee_view(record, util::today()))
}

/// PUT (`Replace`) or PATCH (`Patch`); every rule runs against the merged record
pub async fn update(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    payload: &EmployeePayload,
    mode: WriteMode,
) -> ServiceResult<EmployeeView> {
    let mut tx = db::begin_write(pool).await?;

    let existing = db::employees::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| employee_not_found(id))?;
    let facts = employee_facts(&mut tx, payload, Some(&existing)).await?;
    let candidate = validation::validate_employee(payload, Some(&existing), mode, &facts)?;

    db::employees::update(&mut *tx, id, &candidate, util::now_millis()).await?;
    let record = db::employees::find_record(&mut *tx, id)
        .await?
        .ok_or_else(|| employee_not_found(id))?;
    tx.commit().await?;

    if existing.status != candidate.status {
        audit_log!(
            actor,
            "employee.status",
            format!("employee:{id}"),
            format!("{} -> {}", existing.status, candidate.status)
        );
    } else {
        audit_log!(actor, "employee.update", format!("employee:{id}"));
    }
    Ok(reporting::employee_view(record, util::today()))
}

pub async fn delete(pool: &SqlitePool, actor: &CurrentUser, id: i64) -> ServiceResult<Employee> {
    let mut tx = db::begin_write(pool).await?;

    let employee = db::employees::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| employee_not_found(id))?;
    db::employees::delete(&mut *tx, id).await?;
    tx.commit().await?;

    audit_log!(actor, "employee.delete", format!("employee:{id}"), employee.name);
    Ok(employee)
}

async fn employee_facts(
    conn: &mut sqlx::SqliteConnection,
    payload: &EmployeePayload,
    existing: Option<&Employee>,
) -> Result<EmployeeFacts, sqlx::Error> {
    let (company_id, department_id) = validation::employee_refs(payload, existing);

    let company_exists = match company_id {
        Some(id) => db::companies::exists(&mut *conn, id).await?,
        None => false,
    };
    let department_company = match department_id {
        Some(id) => db::departments::find_by_id(&mut *conn, id)
            .await?
            .map(|d| d.company_id),
        None => None,
    };

    Ok(EmployeeFacts {
        company_exists,
        department_company,
    })
}
