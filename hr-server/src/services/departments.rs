//! Department use cases

use shared::error::{AppError, ErrorCode};
use shared::models::{
    Department, DepartmentDetail, DepartmentFilter, DepartmentPayload, DepartmentView,
};
use sqlx::SqlitePool;

use super::department_not_found;
use crate::audit_log;
use crate::auth::CurrentUser;
use crate::db;
use crate::domain::reporting;
use crate::domain::validation::{self, DepartmentFacts, WriteMode};
use crate::error::ServiceResult;
use crate::util;

pub async fn list(
    pool: &SqlitePool,
    filter: &DepartmentFilter,
) -> ServiceResult<Vec<DepartmentView>> {
    Ok(db::departments::list_views(pool, filter.company).await?)
}

/// Department with its employees
pub async fn detail(pool: &SqlitePool, id: i64) -> ServiceResult<DepartmentDetail> {
    let mut conn = pool.acquire().await?;
    let view = db::departments::find_view(&mut *conn, id)
        .await?
        .ok_or_else(|| department_not_found(id))?;
    let employees = db::employees::list_records_by_department(&mut *conn, id).await?;

    Ok(reporting::department_detail(
        view,
        reporting::employee_views(employees, util::today()),
    ))
}

pub async fn create(
    pool: &SqlitePool,
    actor: &CurrentUser,
    payload: &DepartmentPayload,
) -> ServiceResult<DepartmentView> {
    let mut tx = db::begin_write(pool).await?;

    let facts = department_facts(&mut tx, payload, None).await?;
    let candidate = validation::validate_department(payload, None, WriteMode::Create, &facts)?;

    let id = db::departments::insert(
        &mut *tx,
        candidate.company_id,
        &candidate.name,
        util::now_millis(),
    )
    .await?;
    let department = db::departments::find_view(&mut *tx, id)
        .await?
        .ok_or_else(|| department_not_found(id))?;
    tx.commit().await?;

    audit_log!(actor, "department.create", format!("department:{id}"), department.name);
    Ok(department)
}

pub async fn update(
    pool: &SqlitePool,
    actor: &CurrentUser,
    id: i64,
    payload: &DepartmentPayload,
    mode: WriteMode,
) -> ServiceResult<DepartmentView> {
    let mut tx = db::begin_write(pool).await?;

    let existing = db::departments::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| department_not_found(id))?;
    let facts = department_facts(&mut tx, payload, Some(&existing)).await?;
    let candidate = validation::validate_department(payload, Some(&existing), mode, &facts)?;

    db::departments::update(
        &mut *tx,
        id,
        candidate.company_id,
        &candidate.name,
        util::now_millis(),
    )
    .await?;
    let department = db::departments::find_view(&mut *tx, id)
        .await?
        .ok_or_else(|| department_not_found(id))?;
    tx.commit().await?;

    audit_log!(actor, "department.update", format!("department:{id}"), department.name);
    Ok(department)
}

/// Delete a department; refused while any employee is assigned to it
pub async fn delete(pool: &SqlitePool, actor: &CurrentUser, id: i64) -> ServiceResult<Department> {
    let mut tx = db::begin_write(pool).await?;

    let department = db::departments::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| department_not_found(id))?;

    let employee_count = db::departments::employee_count(&mut *tx, id).await?;
    if employee_count > 0 {
        return Err(AppError::with_message(
            ErrorCode::DepartmentHasEmployees,
            format!(
                "Cannot delete department '{}' because it has {employee_count} employee(s).",
                department.name
            ),
        )
        .with_detail("employee_count", employee_count)
        .into());
    }

    db::departments::delete(&mut *tx, id).await?;
    tx.commit().await?;

    audit_log!(actor, "department.delete", format!("department:{id}"), department.name);
    Ok(department)
}

async fn department_facts(
    conn: &mut sqlx::SqliteConnection,
    payload: &DepartmentPayload,
    existing: Option<&Department>,
) -> Result<DepartmentFacts, sqlx::Error> {
    let company_id = validation::department_company_ref(payload, existing);
    let company_exists = match company_id {
        Some(company_id) => db::companies::exists(&mut *conn, company_id).await?,
        None => false,
    };

    let name = validation::trimmed(&payload.name)
        .or(existing.map(|d| d.name.as_str()))
        .filter(|n| !n.is_empty());
    let name_taken = match (company_id, name) {
        (Some(company_id), Some(name)) => {
            db::departments::name_taken(&mut *conn, company_id, name, existing.map(|d| d.id))
                .await?
        }
        _ => false,
    };

    let employee_count = match existing {
        Some(d) => db::departments::employee_count(&mut *conn, d.id).await?,
        None => 0,
    };

    Ok(DepartmentFacts {
        company_exists,
        name_taken,
        employee_count,
    })
}
