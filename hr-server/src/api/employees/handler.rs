//! Employee API Handlers

use axum::extract::State;
use shared::error::ApiResponse;
use shared::models::{
    Employee, EmployeeFilter, EmployeePayload, EmployeeView, HiredEmployeeReport,
};

use crate::api::ApiResult;
use crate::api::extract::{Json, Path, Query};
use crate::auth::CurrentUser;
use crate::domain::WriteMode;
use crate::services::{employees, reports};
use crate::state::AppState;

/// GET /api/employees?company=&department=&status=
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<EmployeeFilter>,
) -> ApiResult<Vec<EmployeeView>> {
    let employees = employees::list(&state.db.pool, &filter).await?;
    Ok(ApiResponse::success(employees))
}

/// GET /api/employees/report
pub async fn report(State(state): State<AppState>) -> ApiResult<Vec<HiredEmployeeReport>> {
    let rows = reports::hired_employees(&state.db.pool).await?;
    Ok(ApiResponse::success(rows))
}

/// GET /api/employees/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<EmployeeView> {
    let employee = employees::get(&state.db.pool, id).await?;
    Ok(ApiResponse::success(employee))
}

/// POST /api/employees
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<EmployeePayload>,
) -> ApiResult<EmployeeView> {
    let employee = employees::create(&state.db.pool, &user, &payload).await?;
    Ok(ApiResponse::created(employee))
}

/// PUT /api/employees/{id}
pub async fn replace(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeePayload>,
) -> ApiResult<EmployeeView> {
    let employee =
        employees::update(&state.db.pool, &user, id, &payload, WriteMode::Replace).await?;
    Ok(ApiResponse::success(employee))
}

/// PATCH /api/employees/{id}
pub async fn patch(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<EmployeePayload>,
) -> ApiResult<EmployeeView> {
    let employee =
        employees::update(&state.db.pool, &user, id, &payload, WriteMode::Patch).await?;
    Ok(ApiResponse::success(employee))
}

/// DELETE /api/employees/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<Employee> {
    let employee = employees::delete(&state.db.pool, &user, id).await?;
    let message = format!("Employee '{}' deleted.", employee.name);
    Ok(ApiResponse::success_with_message(message, employee))
}
