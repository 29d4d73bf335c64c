//! HTTP API
//!
//! Every route lives under `/api` except `/health`. Handlers answer with the
//! [`ApiResponse`] envelope; errors are rendered by [`AppError`].

pub mod accounts;
pub mod companies;
pub mod dashboard;
pub mod departments;
pub mod employees;
pub mod extract;
pub mod health;

use axum::extract::Request;
use axum::routing::get;
use axum::{Router, middleware};
use http::{HeaderValue, Method, StatusCode};
use shared::error::{ApiResponse, AppError, ErrorCode};
use tower::Layer;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::config::Config;
use crate::state::AppState;

pub type ApiResult<T> = Result<ApiResponse<T>, AppError>;

/// `/api` routes: public account endpoints plus everything behind `require_auth`
pub fn build_router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .merge(companies::router())
        .merge(departments::router())
        .merge(employees::router())
        .merge(dashboard::router())
        .merge(accounts::router())
        .route_layer(middleware::from_fn_with_state(state.clone(), require_auth));

    Router::new()
        .merge(accounts::public_router())
        .merge(protected)
}

/// Fully configured application: routes, middleware and state
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", build_router(&state))
        .fallback(not_found)
        .layer(cors_layer(&state.config))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            state.config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// [`build_app`] wrapped so `/api/companies/` and `/api/companies` route alike
///
/// The trailing slash is trimmed before routing, so this layer has to sit
/// outside the router.
pub fn build_service(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(build_app(state))
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.cors_allowed_origins.is_empty() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

async fn not_found(req: Request) -> AppError {
    AppError::with_message(
        ErrorCode::NotFound,
        format!("No route for {} {}", req.method(), req.uri().path()),
    )
}
