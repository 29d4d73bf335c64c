//! Employee Model

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Hiring workflow status
///
/// `ApplicationReceived` is the initial state; `Hired` and `NotAccepted` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    #[default]
    ApplicationReceived,
    InterviewScheduled,
    Hired,
    NotAccepted,
}

/// Raised when a stored or submitted status string is not a known value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("\"{0}\" is not a valid choice.")]
pub struct UnknownStatus(pub String);

impl EmployeeStatus {
    pub const ALL: [EmployeeStatus; 4] = [
        Self::ApplicationReceived,
        Self::InterviewScheduled,
        Self::Hired,
        Self::NotAccepted,
    ];

    /// Parse from database string value
    pub fn from_db(s: &str) -> Option<Self> {
        match s {
            "application_received" => Some(Self::ApplicationReceived),
            "interview_scheduled" => Some(Self::InterviewScheduled),
            "hired" => Some(Self::Hired),
            "not_accepted" => Some(Self::NotAccepted),
            _ => None,
        }
    }

    /// Database string representation
    pub fn as_db(&self) -> &'static str {
        match self {
            Self::ApplicationReceived => "application_received",
            Self::InterviewScheduled => "interview_scheduled",
            Self::Hired => "hired",
            Self::NotAccepted => "not_accepted",
        }
    }
}

impl fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_db())
    }
}

impl std::str::FromStr for EmployeeStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_db(s).ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl TryFrom<String> for EmployeeStatus {
    type Error = UnknownStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Employee entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    #[serde(rename = "company")]
    pub company_id: i64,
    #[serde(rename = "department")]
    pub department_id: Option<i64>,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: EmployeeStatus,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub designation: String,
    pub hired_on: Option<chrono::NaiveDate>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create / replace / patch employee payload
///
/// Every field is optional at the wire level; which ones are required depends
/// on the operation. `status` and `hired_on` stay raw so bad values surface as
/// field errors instead of parse failures. `department` and `hired_on` use a
/// double option so an explicit `null` can clear them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::util::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub department: Option<Option<i64>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(
        default,
        deserialize_with = "crate::util::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub hired_on: Option<Option<String>>,
}

/// Employee list filters (`?company=&department=&status=`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeFilter {
    #[serde(default, deserialize_with = "crate::util::empty_as_none")]
    pub company: Option<i64>,
    #[serde(default, deserialize_with = "crate::util::empty_as_none")]
    pub department: Option<i64>,
    #[serde(default, deserialize_with = "crate::util::empty_as_none")]
    pub status: Option<EmployeeStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_db_names() {
        for status in EmployeeStatus::ALL {
            assert_eq!(EmployeeStatus::from_db(status.as_db()), Some(status));
        }
        assert_eq!(EmployeeStatus::from_db("fired"), None);
    }

    #[test]
    fn test_status_serde_matches_db_names() {
        let json = serde_json::to_string(&EmployeeStatus::InterviewScheduled).unwrap();
        assert_eq!(json, "\"interview_scheduled\"");
    }

    #[test]
    fn test_unknown_status_message() {
        let err = "fired".parse::<EmployeeStatus>().unwrap_err();
        assert_eq!(err.to_string(), "\"fired\" is not a valid choice.");
    }

    #[test]
    fn test_default_status() {
        assert_eq!(EmployeeStatus::default(), EmployeeStatus::ApplicationReceived);
    }

    #[test]
    fn test_payload_distinguishes_null_from_missing() {
        let payload: EmployeePayload =
            serde_json::from_str(r#"{"department": null, "status": "hired"}"#).unwrap();
        assert_eq!(payload.department, Some(None));
        assert_eq!(payload.hired_on, None);
        assert_eq!(payload.status.as_deref(), Some("hired"));
    }

    #[test]
    fn test_employee_serializes_reference_names() {
        let employee = Employee {
            id: 1,
            company_id: 2,
            department_id: None,
            status: EmployeeStatus::Hired,
            name: "Ada".into(),
            email: "ada@acme.test".into(),
            phone: "+123456789".into(),
            address: "1 Main St".into(),
            designation: "Engineer".into(),
            hired_on: chrono::NaiveDate::from_ymd_opt(2024, 1, 15),
            created_at: 0,
            updated_at: 0,
        };
        let json = serde_json::to_value(&employee).unwrap();
        assert_eq!(json["company"], 2);
        assert!(json["department"].is_null());
        assert_eq!(json["status"], "hired");
        assert_eq!(json["hired_on"], "2024-01-15");
    }
}
