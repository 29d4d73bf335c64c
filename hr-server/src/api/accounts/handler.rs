//! Account API Handlers

use axum::extract::State;
use axum::http::HeaderMap;
use shared::error::ApiResponse;
use shared::models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse,
    RegisterRequest, User, UserUpdate,
};

use crate::api::ApiResult;
use crate::api::extract::Json;
use crate::auth::{self, CurrentUser};
use crate::services::accounts;
use crate::state::AppState;

/// POST /api/accounts/register
///
/// Public, but a bearer token (if sent) is checked so admins can create
/// manager and admin accounts.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<User> {
    let caller = if headers.contains_key(http::header::AUTHORIZATION) {
        Some(auth::authenticate(&state, &headers).await?)
    } else {
        None
    };

    let user = accounts::register(&state.db.pool, caller.as_ref(), &req).await?;
    Ok(ApiResponse::created(user))
}

/// POST /api/accounts/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let response = accounts::login(&state.db.pool, &state.jwt, &req).await?;
    Ok(ApiResponse::success_with_message("Login successful", response))
}

/// POST /api/accounts/token/refresh
pub async fn refresh(
    State(state): State<AppState>,
    Json(req): Json<RefreshRequest>,
) -> ApiResult<RefreshResponse> {
    let response = accounts::refresh(&state.db.pool, &state.jwt, &req).await?;
    Ok(ApiResponse::success(response))
}

/// GET /api/accounts/user
pub async fn current(State(state): State<AppState>, user: CurrentUser) -> ApiResult<User> {
    let user = accounts::current(&state.db.pool, &user).await?;
    Ok(ApiResponse::success(user))
}

/// PATCH /api/accounts/user
pub async fn update(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(update): Json<UserUpdate>,
) -> ApiResult<User> {
    let user = accounts::update_profile(&state.db.pool, &user, &update).await?;
    Ok(ApiResponse::success(user))
}

/// POST /api/accounts/change-password
pub async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> ApiResult<()> {
    accounts::change_password(&state.db.pool, &user, &req).await?;
    Ok(ApiResponse::success_with_message("Password changed", ()))
}
