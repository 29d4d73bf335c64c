//! Unified service-layer error type
//!
//! `ServiceError` bridges DB-layer errors (`sqlx::Error`, `BoxError`) and the
//! API-layer error (`AppError`), so services can use `?` on both.

use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};

use crate::domain::validation::{COMPANY_NAME_TAKEN, DEPARTMENT_NAME_TAKEN, EMAIL_TAKEN};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Service-layer error
///
/// - `Db`: Database/infrastructure errors (logged, mapped to InternalError)
/// - `App`: Business-rule errors (passed through to the client)
#[derive(Debug)]
pub enum ServiceError {
    Db(BoxError),
    App(AppError),
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        // A unique index lost a race against the pre-insert check
        if let sqlx::Error::Database(db) = &e
            && db.is_unique_violation()
        {
            return ServiceError::App(unique_violation(db.message()));
        }
        ServiceError::Db(e.into())
    }
}

/// Field error for a SQLite `UNIQUE constraint failed: <table>.<column>` message
fn unique_violation(message: &str) -> AppError {
    let columns = message.rsplit(": ").next().unwrap_or_default();
    if columns.starts_with("companies.") {
        AppError::field("name", COMPANY_NAME_TAKEN)
    } else if columns.starts_with("departments.") {
        AppError::field("name", DEPARTMENT_NAME_TAKEN)
    } else if columns.starts_with("users.") {
        AppError::field("email", EMAIL_TAKEN)
    } else {
        AppError::field("non_field_errors", "A record with these values already exists.")
    }
}

impl From<BoxError> for ServiceError {
    fn from(e: BoxError) -> Self {
        ServiceError::Db(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<shared::error::FieldErrors> for ServiceError {
    fn from(e: shared::error::FieldErrors) -> Self {
        ServiceError::App(e.into())
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Db(db_err) => {
                tracing::error!(error = %db_err, "Service database error");
                AppError::new(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::FieldErrors;

    #[test]
    fn test_db_error_maps_to_internal() {
        let err = ServiceError::from(sqlx::Error::RowNotFound);
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::InternalError);
    }

    #[test]
    fn test_unique_violation_names_the_field() {
        let err = unique_violation("UNIQUE constraint failed: companies.name");
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, COMPANY_NAME_TAKEN);
        assert_eq!(err.errors.as_ref().unwrap().get("name"), Some(COMPANY_NAME_TAKEN));

        let err =
            unique_violation("UNIQUE constraint failed: departments.company_id, departments.name");
        assert_eq!(
            err.errors.as_ref().unwrap().get("name"),
            Some(DEPARTMENT_NAME_TAKEN)
        );

        let err = unique_violation("UNIQUE constraint failed: users.email");
        assert_eq!(err.errors.as_ref().unwrap().get("email"), Some(EMAIL_TAKEN));

        let err = unique_violation("UNIQUE constraint failed: audit.key");
        assert!(err.errors.as_ref().unwrap().contains("non_field_errors"));
    }

    #[test]
    fn test_field_errors_pass_through() {
        let err = ServiceError::from(FieldErrors::single("name", "This field is required."));
        let app: AppError = err.into();
        assert_eq!(app.code, ErrorCode::ValidationFailed);
        assert_eq!(app.message, "This field is required.");
    }
}
