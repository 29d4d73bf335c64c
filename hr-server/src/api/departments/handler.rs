//! Department API Handlers

use axum::extract::State;
use shared::error::ApiResponse;
use shared::models::{
    Department, DepartmentDetail, DepartmentFilter, DepartmentPayload, DepartmentView,
};

use crate::api::ApiResult;
use crate::api::extract::{Json, Path, Query};
use crate::auth::CurrentUser;
use crate::domain::WriteMode;
use crate::services::departments;
use crate::state::AppState;

/// GET /api/departments?company=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<DepartmentFilter>,
) -> ApiResult<Vec<DepartmentView>> {
    let departments = departments::list(&state.db.pool, &filter).await?;
    Ok(ApiResponse::success(departments))
}

/// GET /api/departments/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<DepartmentDetail> {
    let department = departments::detail(&state.db.pool, id).await?;
    Ok(ApiResponse::success(department))
}

/// POST /api/departments
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<DepartmentPayload>,
) -> ApiResult<DepartmentView> {
    let department = departments::create(&state.db.pool, &user, &payload).await?;
    Ok(ApiResponse::created(department))
}

/// PUT /api/departments/{id}
pub async fn replace(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<DepartmentPayload>,
) -> ApiResult<DepartmentView> {
    let department =
        departments::update(&state.db.pool, &user, id, &payload, WriteMode::Replace).await?;
    Ok(ApiResponse::success(department))
}

/// PATCH /api/departments/{id}
pub async fn patch(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<DepartmentPayload>,
) -> ApiResult<DepartmentView> {
    let department =
        departments::update(&state.db.pool, &user, id, &payload, WriteMode::Patch).await?;
    Ok(ApiResponse::success(department))
}

/// DELETE /api/departments/{id} - refused while employees are assigned
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Department> {
    let department = departments::delete(&state.db.pool, &user, id).await?;
    let message = format!("Department '{}' deleted.", department.name);
    Ok(ApiResponse::success_with_message(message, department))
}
