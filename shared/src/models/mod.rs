//! Data models
//!
//! Shared between hr-server and its API clients.
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY).

pub mod company;
pub mod department;
pub mod employee;
pub mod role;
pub mod user;
pub mod views;

// Re-exports
pub use company::*;
pub use department::*;
pub use employee::*;
pub use role::*;
pub use user::*;
pub use views::*;
