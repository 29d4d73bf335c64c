//! Company API Module

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::{Resource, authorize};
use crate::state::AppState;

/// Company router - reads for any role, writes for admins
pub fn router() -> Router<AppState> {
    Router::new().nest("/companies", routes())
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
        .route_layer(middleware::from_fn(authorize(Resource::Companies)))
}
