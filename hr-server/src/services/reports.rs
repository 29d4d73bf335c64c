//! Read-only aggregates

use shared::models::{DashboardSummary, HiredEmployeeReport};
use sqlx::SqlitePool;

use crate::db;
use crate::domain::reporting;
use crate::error::ServiceResult;
use crate::util;

/// Hired employees, newest first, with `days_employed` as of today
pub async fn hired_employees(pool: &SqlitePool) -> ServiceResult<Vec<HiredEmployeeReport>> {
    let records = db::employees::list_hired_records(pool).await?;
    Ok(reporting::hired_report(records, util::today()))
}

pub async fn dashboard(pool: &SqlitePool) -> ServiceResult<DashboardSummary> {
    Ok(db::stats::dashboard_summary(pool).await?)
}
