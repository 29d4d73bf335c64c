//! Employee API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{Resource, authorize};
use crate::state::AppState;

/// Employee router - reads for any role, writes for admins and managers
pub fn router() -> Router<AppState> {
    Router::new().nest("/employees", routes())
}

fn routes() -> Router<AppState> {
    let report = Router::new()
        .route("/report", get(handler::report))
        .route_layer(middleware::from_fn(authorize(Resource::Report)));

    let records = Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::replace)
                .patch(handler::patch)
                .delete(handler::delete),
        )
        .route_layer(middleware::from_fn(authorize(Resource::Employees)));

    report.merge(records)
}
