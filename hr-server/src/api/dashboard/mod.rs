//! Dashboard API Module

use axum::extract::State;
use axum::{Router, middleware, routing::get};
use shared::error::ApiResponse;
use shared::models::DashboardSummary;

use crate::api::ApiResult;
use crate::auth::{Resource, authorize};
use crate::services::reports;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(summary))
        .route_layer(middleware::from_fn(authorize(Resource::Dashboard)))
}

/// GET /api/dashboard
async fn summary(State(state): State<AppState>) -> ApiResult<DashboardSummary> {
    let summary = reports::dashboard(&state.db.pool).await?;
    Ok(ApiResponse::success(summary))
}
