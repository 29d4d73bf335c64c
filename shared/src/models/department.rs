//! Department Model

use serde::{Deserialize, Serialize};

/// Department entity, always owned by exactly one company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Department {
    pub id: i64,
    #[serde(rename = "company")]
    pub company_id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create / replace / patch department payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentPayload {
    #[serde(default)]
    pub company: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Department list filters (`?company=`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DepartmentFilter {
    #[serde(default, deserialize_with = "crate::util::empty_as_none")]
    pub company: Option<i64>,
}
