//! Dashboard aggregate queries

use shared::models::DashboardSummary;
use sqlx::SqliteExecutor;

/// All dashboard counters in one statement (one consistent snapshot)
pub async fn dashboard_summary<'e>(
    ex: impl SqliteExecutor<'e>,
) -> Result<DashboardSummary, sqlx::Error> {
    sqlx::query_as(
        "SELECT
            (SELECT COUNT(*) FROM companies) AS total_companies,
            (SELECT COUNT(*) FROM departments) AS total_departments,
            (SELECT COUNT(*) FROM employees) AS total_employees,
            (SELECT COUNT(*) FROM employees WHERE status = 'hired') AS hired_employees,
            (SELECT COUNT(*) FROM employees WHERE status = 'application_received')
                AS pending_applications,
            (SELECT COUNT(*) FROM employees WHERE status = 'interview_scheduled')
                AS scheduled_interviews,
            (SELECT COUNT(*) FROM employees WHERE status = 'not_accepted')
                AS not_selected_employees",
    )
    .fetch_one(ex)
    .await
}
