//! Shared types for the HR service
//!
//! Wire types used by hr-server and its clients: the error system and
//! response envelope, entity models, read-model projections, and request
//! payloads.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCode, FieldErrors};
