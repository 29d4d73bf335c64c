//! Account API Module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::{Resource, authorize};
use crate::state::AppState;

/// Registration, login and refresh - no token required
pub fn public_router() -> Router<AppState> {
    Router::new()
        .route("/accounts/register", post(handler::register))
        .route("/accounts/login", post(handler::login))
        .route("/accounts/token/refresh", post(handler::refresh))
}

/// Own-account endpoints - behind `require_auth`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/accounts/user", get(handler::current).patch(handler::update))
        .route("/accounts/change-password", post(handler::change_password))
        .route_layer(middleware::from_fn(authorize(Resource::Account)))
}
