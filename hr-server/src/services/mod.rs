//! Use cases
//!
//! Every mutation runs in one transaction: load the stored row, gather the
//! reference facts validation needs, run the pure validation, write, commit.
//! A failed validation drops the transaction, which rolls it back.

pub mod accounts;
pub mod companies;
pub mod departments;
pub mod employees;
pub mod reports;

use shared::error::{AppError, ErrorCode};

pub(crate) fn company_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::CompanyNotFound, format!("Company {id} not found"))
}

pub(crate) fn department_not_found(id: i64) -> AppError {
    AppError::with_message(
        ErrorCode::DepartmentNotFound,
        format!("Department {id} not found"),
    )
}

pub(crate) fn employee_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::EmployeeNotFound, format!("Employee {id} not found"))
}

pub(crate) fn user_not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::UserNotFound, format!("User {id} not found"))
}
