//! Department API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{Resource, authorize};
use crate::state::AppState;

/// Department router - reads for any role, writes for admins and managers
pub fn router() -> Router<AppState> {
    Router::new().nest("/departments", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{id}",
            get(handler::get_by_id)
                .put(handler::replace)
                .patch(handler::patch)
                .delete(handler::delete),
        )
        .route_layer(middleware::from_fn(authorize(Resource::Departments)))
}
