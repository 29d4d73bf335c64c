//! Read-model assembly
//!
//! Turns stored rows into the projections the API returns. Nothing here
//! touches the store; `today` is passed in so results are reproducible.

use chrono::NaiveDate;
use shared::models::{
    CompanyDetail, CompanySummary, DepartmentDetail, DepartmentView, EmployeeStatus, EmployeeView,
    HiredEmployeeReport,
};

use crate::db::employees::EmployeeRecord;

/// Whole days since `hired_on`, only for hired employees
pub fn days_employed(
    status: EmployeeStatus,
    hired_on: Option<NaiveDate>,
    today: NaiveDate,
) -> Option<i64> {
    match (status, hired_on) {
        (EmployeeStatus::Hired, Some(date)) => Some((today - date).num_days()),
        _ => None,
    }
}

pub fn employee_view(record: EmployeeRecord, today: NaiveDate) -> EmployeeView {
    let e = record.employee;
    EmployeeView {
        days_employed: days_employed(e.status, e.hired_on, today),
        id: e.id,
        company: e.company_id,
        company_name: record.company_name,
        department: e.department_id,
        department_name: record.department_name,
        status: e.status,
        name: e.name,
        email: e.email,
        phone: e.phone,
        address: e.address,
        designation: e.designation,
        hired_on: e.hired_on,
        created_at: e.created_at,
        updated_at: e.updated_at,
    }
}

pub fn employee_views(records: Vec<EmployeeRecord>, today: NaiveDate) -> Vec<EmployeeView> {
    records
        .into_iter()
        .map(|r| employee_view(r, today))
        .collect()
}

/// Report row for a hired employee; `None` for anyone else
pub fn hired_report_row(record: EmployeeRecord, today: NaiveDate) -> Option<HiredEmployeeReport> {
    let e = record.employee;
    let hired_on = e.hired_on.filter(|_| e.status == EmployeeStatus::Hired)?;
    Some(HiredEmployeeReport {
        id: e.id,
        name: e.name,
        email: e.email,
        phone: e.phone,
        position: e.designation,
        hired_on,
        days_employed: (today - hired_on).num_days(),
        company_name: record.company_name,
        department_name: record.department_name,
    })
}

pub fn hired_report(records: Vec<EmployeeRecord>, today: NaiveDate) -> Vec<HiredEmployeeReport> {
    records
        .into_iter()
        .filter_map(|r| hired_report_row(r, today))
        .collect()
}

pub fn department_detail(
    department: DepartmentView,
    employees: Vec<EmployeeView>,
) -> DepartmentDetail {
    DepartmentDetail {
        department,
        employees,
    }
}

/// Nest employees under their departments
///
/// Departments keep their given order; each employee list keeps the order of
/// `employees`. Employees without a department (or whose department is not
/// in `departments`) end up in `unassigned_employees`.
pub fn company_detail(
    company: CompanySummary,
    departments: Vec<DepartmentView>,
    employees: Vec<EmployeeView>,
) -> CompanyDetail {
    let mut details: Vec<DepartmentDetail> = departments
        .into_iter()
        .map(|d| department_detail(d, Vec::new()))
        .collect();
    let mut unassigned = Vec::new();

    for employee in employees {
        let slot = employee
            .department
            .and_then(|id| details.iter_mut().find(|d| d.department.id == id));
        match slot {
            Some(detail) => detail.employees.push(employee),
            None => unassigned.push(employee),
        }
    }

    CompanyDetail {
        company,
        departments: details,
        unassigned_employees: unassigned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Employee;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(id: i64, department: Option<i64>, status: EmployeeStatus) -> EmployeeRecord {
        let hired_on = (status == EmployeeStatus::Hired).then(|| date(2024, 1, 1));
        EmployeeRecord {
            employee: Employee {
                id,
                company_id: 1,
                department_id: department,
                status,
                name: format!("Employee {id}"),
                email: format!("e{id}@acme.test"),
                phone: "+123456789".into(),
                address: "1 Main St".into(),
                designation: "Engineer".into(),
                hired_on,
                created_at: id,
                updated_at: id,
            },
            company_name: "Acme".into(),
            department_name: department.map(|d| format!("Dept {d}")),
        }
    }

    fn department(id: i64) -> DepartmentView {
        DepartmentView {
            id,
            company_id: 1,
            company_name: "Acme".into(),
            name: format!("Dept {id}"),
            number_of_employees: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_days_employed_only_for_hired() {
        let today = date(2024, 3, 1);
        assert_eq!(
            days_employed(EmployeeStatus::Hired, Some(date(2024, 1, 1)), today),
            Some(60)
        );
        assert_eq!(days_employed(EmployeeStatus::Hired, None, today), None);
        assert_eq!(
            days_employed(EmployeeStatus::InterviewScheduled, Some(date(2024, 1, 1)), today),
            None
        );
    }

    #[test]
    fn test_hired_report_skips_non_hired() {
        let rows = hired_report(
            vec![
                record(1, Some(10), EmployeeStatus::Hired),
                record(2, Some(10), EmployeeStatus::ApplicationReceived),
                record(3, None, EmployeeStatus::Hired),
            ],
            date(2024, 1, 11),
        );
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[0].position, "Engineer");
        assert_eq!(rows[0].days_employed, 10);
        assert_eq!(rows[0].department_name.as_deref(), Some("Dept 10"));
        assert_eq!(rows[1].department_name, None);
    }

    #[test]
    fn test_company_detail_groups_by_department() {
        let today = date(2024, 1, 1);
        let summary = CompanySummary {
            id: 1,
            name: "Acme".into(),
            number_of_departments: 2,
            number_of_employees: 4,
            created_at: 0,
            updated_at: 0,
        };
        let employees = employee_views(
            vec![
                record(4, Some(20), EmployeeStatus::ApplicationReceived),
                record(3, None, EmployeeStatus::ApplicationReceived),
                record(2, Some(10), EmployeeStatus::Hired),
                record(1, Some(10), EmployeeStatus::NotAccepted),
            ],
            today,
        );

        let detail = company_detail(summary, vec![department(10), department(20)], employees);

        assert_eq!(detail.departments.len(), 2);
        let ids = |d: &DepartmentDetail| d.employees.iter().map(|e| e.id).collect::<Vec<_>>();
        assert_eq!(ids(&detail.departments[0]), vec![2, 1]);
        assert_eq!(ids(&detail.departments[1]), vec![4]);
        assert_eq!(detail.unassigned_employees.len(), 1);
        assert_eq!(detail.unassigned_employees[0].id, 3);
        assert_eq!(detail.departments[0].employees[0].days_employed, Some(0));
    }

    #[test]
    fn test_company_detail_serializes_flat() {
        let summary = CompanySummary {
            id: 1,
            name: "Acme".into(),
            number_of_departments: 0,
            number_of_employees: 0,
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_value(company_detail(summary, vec![], vec![])).unwrap();
        assert_eq!(json["name"], "Acme");
        assert_eq!(json["number_of_departments"], 0);
        assert!(json["departments"].as_array().unwrap().is_empty());
    }
}
