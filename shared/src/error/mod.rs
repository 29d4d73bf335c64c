//! Unified error system for the HR service
//!
//! This module provides:
//! - [`ErrorCode`]: Standardized error codes for all error types
//! - [`ErrorCategory`]: Classification of errors by domain
//! - [`AppError`]: Rich error type with codes, messages, field errors and details
//! - [`FieldErrors`]: Ordered field -> message map produced by validation
//! - [`ApiResponse`]: Unified API response envelope
//!
//! # Error Code Ranges
//!
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Company errors
//! - 4xxx: Department errors
//! - 5xxx: Employee errors
//! - 6xxx: Account errors
//! - 9xxx: System errors
//!
//! # Example
//!
//! ```
//! use shared::error::{ApiResponse, AppError, ErrorCode, FieldErrors};
//!
//! let err = AppError::new(ErrorCode::CompanyNotFound);
//!
//! let mut errors = FieldErrors::new();
//! errors.add("hired_on", "Hired date is required for hired employees.");
//! let err: AppError = errors.into();
//! assert_eq!(err.code, ErrorCode::ValidationFailed);
//!
//! let response = ApiResponse::error(&err);
//! assert_eq!(response.status_code, 400);
//! ```

mod category;
mod codes;
mod field;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use field::FieldErrors;
pub use types::{ApiResponse, AppError, AppResult};
