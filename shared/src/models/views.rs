//! Read-model projections
//!
//! Denormalized shapes returned by list/detail/report endpoints. None of these
//! are persisted; counts and `days_employed` are recomputed on every read.

use super::employee::EmployeeStatus;
use serde::{Deserialize, Serialize};

/// Company row with live relationship counts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct CompanySummary {
    pub id: i64,
    pub name: String,
    pub number_of_departments: i64,
    pub number_of_employees: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Company with its departments, each carrying its employees
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: CompanySummary,
    pub departments: Vec<DepartmentDetail>,
    /// Employees of the company not assigned to any department
    pub unassigned_employees: Vec<EmployeeView>,
}

/// Department row with owning company name and live employee count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DepartmentView {
    pub id: i64,
    #[serde(rename = "company")]
    pub company_id: i64,
    pub company_name: String,
    pub name: String,
    pub number_of_employees: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentDetail {
    #[serde(flatten)]
    pub department: DepartmentView,
    pub employees: Vec<EmployeeView>,
}

/// Employee with company/department names inlined
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeView {
    pub id: i64,
    pub company: i64,
    pub company_name: String,
    pub department: Option<i64>,
    pub department_name: Option<String>,
    pub status: EmployeeStatus,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub designation: String,
    pub hired_on: Option<chrono::NaiveDate>,
    pub days_employed: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One row of the hired-employee report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HiredEmployeeReport {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub position: String,
    pub hired_on: chrono::NaiveDate,
    pub days_employed: i64,
    pub company_name: String,
    pub department_name: Option<String>,
}

/// Dashboard counters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct DashboardSummary {
    pub total_companies: i64,
    pub total_departments: i64,
    pub total_employees: i64,
    pub hired_employees: i64,
    pub pending_applications: i64,
    pub scheduled_interviews: i64,
    pub not_selected_employees: i64,
}

/// Result of a cascading company delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyDeleted {
    pub id: i64,
    pub name: String,
    pub departments_deleted: u64,
    pub employees_deleted: u64,
}
