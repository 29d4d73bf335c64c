//! Authentication middleware
//!
//! `require_auth` validates the bearer token and injects [`CurrentUser`];
//! `authorize` then consults the role policy for the route's resource.

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use shared::error::{AppError, ErrorCode};

use super::jwt::{CurrentUser, JwtError, JwtService, TokenType};
use super::policy::{self, Resource};
use crate::db;
use crate::security_log;
use crate::state::AppState;

/// Resolve the caller from an `Authorization: Bearer <access token>` header
///
/// The user is re-loaded so deleted or deactivated accounts lose access
/// before their token expires.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<CurrentUser, AppError> {
    let header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::not_authenticated)?;
    let token = JwtService::extract_from_header(header)
        .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?;

    let claims = state
        .jwt
        .validate_token(token, TokenType::Access)
        .map_err(|e| {
            security_log!("WARN", "auth_failed", error = e.to_string());
            match e {
                JwtError::ExpiredToken => AppError::token_expired(),
                _ => AppError::invalid_token("Invalid token"),
            }
        })?;
    let user_id = claims
        .user_id()
        .map_err(|_| AppError::invalid_token("Invalid token"))?;

    let user = db::users::find_by_id(&state.db.pool, user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, user_id, "Failed to load token subject");
            AppError::new(ErrorCode::InternalError)
        })?
        .ok_or_else(|| {
            security_log!("WARN", "auth_unknown_user", user_id = user_id);
            AppError::invalid_token("User no longer exists")
        })?;

    if !user.is_active {
        security_log!("WARN", "auth_inactive_user", user_id = user_id);
        return Err(AppError::new(ErrorCode::AccountDisabled));
    }

    Ok(CurrentUser::from(&user))
}

/// Require an authenticated caller
///
/// CORS preflight requests pass through untouched.
///
/// | Failure                  | Response            |
/// |--------------------------|---------------------|
/// | no Authorization header  | 401 NotAuthenticated |
/// | expired token            | 401 TokenExpired    |
/// | bad or refresh token     | 401 TokenInvalid    |
/// | inactive account         | 401 AccountDisabled |
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let user = authenticate(&state, req.headers()).await.inspect_err(|_| {
        security_log!("WARN", "auth_rejected", uri = req.uri().to_string());
    })?;
    req.extensions_mut().insert(user);
    Ok(next.run(req).await)
}

/// Role check for one resource; must run after `require_auth`
///
/// ```ignore
/// Router::new()
///     .route("/api/companies", get(list).post(create))
///     .layer(middleware::from_fn(authorize(Resource::Companies)));
/// ```
pub fn authorize(
    resource: Resource,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or_else(AppError::not_authenticated)?;

            if !policy::can(user.role, req.method(), resource) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id,
                    role = user.role.as_db(),
                    method = req.method().as_str(),
                    resource = resource.as_str()
                );
                let err = if resource == Resource::Companies {
                    AppError::new(ErrorCode::AdminRequired)
                } else {
                    AppError::permission_denied(
                        "You do not have permission to perform this action.",
                    )
                };
                return Err(err);
            }

            Ok(next.run(req).await)
        })
    }
}

/// Handlers take `CurrentUser` as an argument once `require_auth` has run
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(AppError::not_authenticated)
    }
}
