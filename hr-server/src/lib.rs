//! HR Server - company, department and employee records
//!
//! # Module layout
//!
//! ```text
//! hr-server/src/
//! ├── config.rs    # environment configuration
//! ├── logger.rs    # tracing setup, rolling files, cleanup
//! ├── state.rs     # shared application state
//! ├── error.rs     # service-layer error bridge
//! ├── auth/        # JWT, middleware, role policy
//! ├── db/          # SQLite pool, migrations, queries
//! ├── domain/      # workflow, validation, reporting
//! ├── services/    # transactional use cases
//! └── api/         # axum routers and handlers
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod logger;
pub mod services;
pub mod state;
pub mod util;

pub use auth::{CurrentUser, JwtService};
pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;

pub use shared::error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Audit logging macro: one record per successful mutation
#[macro_export]
macro_rules! audit_log {
    ($actor:expr, $action:expr, $resource:expr) => {
        tracing::info!(
            target: "audit",
            actor_id = $actor.id,
            actor_email = %$actor.email,
            action = $action,
            resource = %$resource,
        );
    };
    ($actor:expr, $action:expr, $resource:expr, $details:expr) => {
        tracing::info!(
            target: "audit",
            actor_id = $actor.id,
            actor_email = %$actor.email,
            action = $action,
            resource = %$resource,
            details = %$details,
        );
    };
}

// Security logging macro: authentication failures and permission denials
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
