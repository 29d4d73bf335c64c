//! Validation engine
//!
//! Pure checks that turn a write payload (plus the stored record, on update)
//! into a fully-populated candidate, or a set of field errors. Anything that
//! needs the store (reference existence, uniqueness, dependent counts) is
//! looked up by the caller first and handed in as a `*Facts` value, so every
//! rule here runs without a database.
//!
//! Rules run in a fixed order and all of them run, so one call can report
//! several fields at once:
//! 1. field-level (required, blank, length, format, existence, uniqueness)
//! 2. cross-entity (department belongs to the employee's company)
//! 3. status-dependent (`hired` iff `hired_on` is set)
//! 4. workflow transition (update only, only when the status changes)

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use shared::error::FieldErrors;
use shared::models::{
    Company, CompanyPayload, Department, DepartmentPayload, Employee, EmployeePayload,
    EmployeeStatus,
};
use validator::ValidateEmail;

use super::workflow;

// ── Text length limits ──────────────────────────────────────────────

/// Company, department and employee names, designation
pub const MAX_NAME_LEN: usize = 255;

/// Phone numbers, as stored (optional `+` and up to 15 digits, with room for a prefix)
pub const MAX_PHONE_LEN: usize = 17;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Minimum password length for accounts
pub const MIN_PASSWORD_LEN: usize = 8;

// ── Messages ────────────────────────────────────────────────────────

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const INVALID_EMAIL: &str = "Enter a valid email address.";
pub const INVALID_PHONE: &str =
    "Phone number must be entered in the format: '+999999999'. Up to 15 digits allowed.";
pub const INVALID_DATE: &str = "Date has wrong format. Use one of these formats instead: YYYY-MM-DD.";
pub const DEPARTMENT_COMPANY_MISMATCH: &str = "Department must belong to the selected company.";
pub const HIRED_ON_REQUIRED: &str = "Hired date is required for hired employees.";
pub const HIRED_ON_NOT_HIRED: &str = "Hired date can only be set for hired employees.";
pub const COMPANY_NAME_TAKEN: &str = "A company with this name already exists.";
pub const DEPARTMENT_NAME_TAKEN: &str = "A department with this name already exists in this company.";
pub const EMAIL_TAKEN: &str = "A user with this email already exists.";
pub const DEPARTMENT_HAS_EMPLOYEES: &str =
    "Cannot move a department to another company while it has employees.";

static PHONE_RE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^\+?\d{9,15}$").ok());

fn too_long(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

fn does_not_exist(id: i64) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}

/// How absent payload fields are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// POST: required fields must be present
    Create,
    /// PUT: required fields must be present; optional fields keep stored values
    Replace,
    /// PATCH: any subset; absent fields keep stored values
    Patch,
}

impl WriteMode {
    fn requires_all(self) -> bool {
        matches!(self, Self::Create | Self::Replace)
    }
}

/// Trimmed view of an optional text field
pub fn trimmed(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim)
}

/// Resolve a required text field against the stored value
///
/// Records at most one error for `field` and returns the value to persist
/// (empty when invalid, the record is never written in that case).
fn required_text(
    errors: &mut FieldErrors,
    field: &str,
    submitted: &Option<String>,
    stored: Option<&str>,
    mode: WriteMode,
    max_len: usize,
) -> String {
    let value = match (trimmed(submitted), stored) {
        (Some(v), _) => v,
        (None, Some(stored)) if !mode.requires_all() => return stored.to_string(),
        (None, _) => {
            errors.add(field, REQUIRED);
            return String::new();
        }
    };

    if value.is_empty() {
        errors.add(field, BLANK);
    } else if value.chars().count() > max_len {
        errors.add(field, too_long(max_len));
    }
    value.to_string()
}

// ==================== Company ====================

/// Store-derived facts for a company write
#[derive(Debug, Clone, Copy, Default)]
pub struct CompanyFacts {
    /// Another company already uses the submitted (trimmed) name
    pub name_taken: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyCandidate {
    pub name: String,
}

pub fn validate_company(
    payload: &CompanyPayload,
    existing: Option<&Company>,
    mode: WriteMode,
    facts: &CompanyFacts,
) -> Result<CompanyCandidate, FieldErrors> {
    let mut errors = FieldErrors::new();

    let name = required_text(
        &mut errors,
        "name",
        &payload.name,
        existing.map(|c| c.name.as_str()),
        mode,
        MAX_NAME_LEN,
    );
    if facts.name_taken {
        errors.add("name", COMPANY_NAME_TAKEN);
    }

    errors.into_result().map(|()| CompanyCandidate { name })
}

// ==================== Department ====================

/// Store-derived facts for a department write
#[derive(Debug, Clone, Copy, Default)]
pub struct DepartmentFacts {
    /// The resolved company reference exists
    pub company_exists: bool,
    /// Another department of the resolved company uses the submitted name
    pub name_taken: bool,
    /// Employees currently assigned to the department (update only)
    pub employee_count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentCandidate {
    pub company_id: i64,
    pub name: String,
}

/// Company id a department write will end up with, if any
pub fn department_company_ref(
    payload: &DepartmentPayload,
    existing: Option<&Department>,
) -> Option<i64> {
    payload.company.or(existing.map(|d| d.company_id))
}

pub fn validate_department(
    payload: &DepartmentPayload,
    existing: Option<&Department>,
    mode: WriteMode,
    facts: &DepartmentFacts,
) -> Result<DepartmentCandidate, FieldErrors> {
    let mut errors = FieldErrors::new();

    let company_id = match (payload.company, existing) {
        (Some(id), _) => Some(id),
        (None, Some(d)) if !mode.requires_all() => Some(d.company_id),
        (None, _) => {
            errors.add("company", REQUIRED);
            None
        }
    };
    if let Some(id) = company_id
        && !facts.company_exists
    {
        errors.add("company", does_not_exist(id));
    }

    let name = required_text(
        &mut errors,
        "name",
        &payload.name,
        existing.map(|d| d.name.as_str()),
        mode,
        MAX_NAME_LEN,
    );
    if facts.name_taken {
        errors.add("name", DEPARTMENT_NAME_TAKEN);
    }

    // Moving a staffed department would leave its employees pointing across companies
    if let (Some(existing), Some(new_company)) = (existing, company_id)
        && existing.company_id != new_company
        && facts.employee_count > 0
    {
        errors.add("company", DEPARTMENT_HAS_EMPLOYEES);
    }

    errors.into_result()?;
    Ok(DepartmentCandidate {
        company_id: company_id.unwrap_or_default(),
        name,
    })
}

// ==================== Employee ====================

/// Store-derived facts for an employee write
#[derive(Debug, Clone, Copy, Default)]
pub struct EmployeeFacts {
    /// The resolved company reference exists
    pub company_exists: bool,
    /// Owning company of the resolved department, `None` if it does not exist
    pub department_company: Option<i64>,
}

/// Fully-resolved employee record, ready to persist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmployeeCandidate {
    pub company_id: i64,
    pub department_id: Option<i64>,
    pub status: EmployeeStatus,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub designation: String,
    pub hired_on: Option<NaiveDate>,
}

/// Company and department ids an employee write will end up with
///
/// The caller uses these to gather [`EmployeeFacts`].
pub fn employee_refs(
    payload: &EmployeePayload,
    existing: Option<&Employee>,
) -> (Option<i64>, Option<i64>) {
    let company = payload.company.or(existing.map(|e| e.company_id));
    let department = match payload.department {
        Some(submitted) => submitted,
        None => existing.and_then(|e| e.department_id),
    };
    (company, department)
}

pub fn validate_employee(
    payload: &EmployeePayload,
    existing: Option<&Employee>,
    mode: WriteMode,
    facts: &EmployeeFacts,
) -> Result<EmployeeCandidate, FieldErrors> {
    let mut errors = FieldErrors::new();

    // 1. Field-level rules
    let company_id = match (payload.company, existing) {
        (Some(id), _) => Some(id),
        (None, Some(e)) if !mode.requires_all() => Some(e.company_id),
        (None, _) => {
            errors.add("company", REQUIRED);
            None
        }
    };
    if let Some(id) = company_id
        && !facts.company_exists
    {
        errors.add("company", does_not_exist(id));
    }

    let (_, department_id) = employee_refs(payload, existing);
    if let Some(id) = department_id
        && facts.department_company.is_none()
    {
        errors.add("department", does_not_exist(id));
    }

    let stored_status = existing.map(|e| e.status).unwrap_or_default();
    let mut status_valid = true;
    let status = match trimmed(&payload.status) {
        Some(raw) => raw.parse().unwrap_or_else(|e: shared::models::UnknownStatus| {
            errors.add("status", e.to_string());
            status_valid = false;
            stored_status
        }),
        None => stored_status,
    };

    let name = required_text(
        &mut errors,
        "name",
        &payload.name,
        existing.map(|e| e.name.as_str()),
        mode,
        MAX_NAME_LEN,
    );

    let email = required_text(
        &mut errors,
        "email",
        &payload.email,
        existing.map(|e| e.email.as_str()),
        mode,
        MAX_EMAIL_LEN,
    );
    if !errors.contains("email") && !email.validate_email() {
        errors.add("email", INVALID_EMAIL);
    }

    let phone = required_text(
        &mut errors,
        "phone",
        &payload.phone,
        existing.map(|e| e.phone.as_str()),
        mode,
        MAX_PHONE_LEN,
    );
    if !errors.contains("phone") && !is_valid_phone(&phone) {
        errors.add("phone", INVALID_PHONE);
    }

    let address = required_text(
        &mut errors,
        "address",
        &payload.address,
        existing.map(|e| e.address.as_str()),
        mode,
        usize::MAX,
    );

    let designation = required_text(
        &mut errors,
        "designation",
        &payload.designation,
        existing.map(|e| e.designation.as_str()),
        mode,
        MAX_NAME_LEN,
    );

    let hired_on = match &payload.hired_on {
        Some(Some(raw)) => match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.add("hired_on", INVALID_DATE);
                None
            }
        },
        Some(None) => None,
        None => existing.and_then(|e| e.hired_on),
    };

    // 2. Cross-entity rule
    if let (Some(company), Some(department_company)) = (company_id, facts.department_company)
        && department_id.is_some()
        && company != department_company
    {
        errors.add("department", DEPARTMENT_COMPANY_MISMATCH);
    }

    let transition = match existing {
        Some(existing) if status_valid => workflow::check_transition(existing.status, status),
        _ => Ok(()),
    };

    // 3. Status-dependent rule. A stored hired_on only conflicts with the new
    // status if that status is reachable at all.
    let hired_on_inherited = payload.hired_on.is_none();
    match (status, hired_on) {
        (EmployeeStatus::Hired, None) => errors.add("hired_on", HIRED_ON_REQUIRED),
        (s, Some(_))
            if s != EmployeeStatus::Hired && !(hired_on_inherited && transition.is_err()) =>
        {
            errors.add("hired_on", HIRED_ON_NOT_HIRED)
        }
        _ => {}
    }

    // 4. Transition rule
    if let Err(e) = transition {
        errors.add("status", e.to_string());
    }

    errors.into_result()?;
    Ok(EmployeeCandidate {
        company_id: company_id.unwrap_or_default(),
        department_id,
        status,
        name,
        email,
        phone,
        address,
        designation,
        hired_on,
    })
}

/// Optional leading `+`, then 9 to 15 digits
pub fn is_valid_phone(phone: &str) -> bool {
    match PHONE_RE.as_ref() {
        Some(re) => re.is_match(phone),
        None => false,
    }
}
