//! Company API Handlers

use axum::extract::State;
use shared::models::{CompanyDeleted, CompanyDetail, CompanyPayload, CompanySummary};

use crate::api::ApiResult;
use crate::api::extract::{Json, Path};
use crate::auth::CurrentUser;
use crate::domain::WriteMode;
use crate::services::companies;
use crate::state::AppState;
use shared::error::ApiResponse;

/// GET /api/companies
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<CompanySummary>> {
    let companies = companies::list(&state.db.pool).await?;
    Ok(ApiResponse::success(companies))
}

/// GET /api/companies/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<CompanyDetail> {
    let company = companies::detail(&state.db.pool, id).await?;
    Ok(ApiResponse::success(company))
}

/// POST /api/companies
pub async fn create(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(payload): Json<CompanyPayload>,
) -> ApiResult<CompanySummary> {
    let company = companies::create(&state.db.pool, &user, &payload).await?;
    Ok(ApiResponse::created(company))
}

/// PUT /api/companies/{id}
pub async fn replace(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CompanyPayload>,
) -> ApiResult<CompanySummary> {
    let company = companies::update(&state.db.pool, &user, id, &payload, WriteMode::Replace).await?;
    Ok(ApiResponse::success(company))
}

/// PATCH /api/companies/{id}
pub async fn patch(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(payload): Json<CompanyPayload>,
) -> ApiResult<CompanySummary> {
    let company = companies::update(&state.db.pool, &user, id, &payload, WriteMode::Patch).await?;
    Ok(ApiResponse::success(company))
}

/// DELETE /api/companies/{id} - cascades to departments and employees
pub async fn delete(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> ApiResult<CompanyDeleted> {
    let deleted = companies::delete(&state.db.pool, &user, id).await?;
    let message = format!(
        "Company '{}' deleted along with {} department(s) and {} employee(s).",
        deleted.name, deleted.departments_deleted, deleted.employees_deleted
    );
    Ok(ApiResponse::success_with_message(message, deleted))
}
