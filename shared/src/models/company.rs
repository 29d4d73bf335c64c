//! Company Model

use serde::{Deserialize, Serialize};

/// Company entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Company {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create / replace / patch company payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CompanyPayload {
    #[serde(default)]
    pub name: Option<String>,
}
