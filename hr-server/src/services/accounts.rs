//! Account use cases: registration, login, token refresh, profile

use shared::error::{AppError, ErrorCode, FieldErrors};
use shared::models::{
    ChangePasswordRequest, LoginRequest, LoginResponse, RefreshRequest, RefreshResponse,
    RegisterRequest, Role, User, UserUpdate,
};
use sqlx::SqlitePool;
use validator::ValidateEmail;

use super::user_not_found;
use crate::auth::{CurrentUser, JwtError, JwtService, TokenType};
use crate::db;
use crate::domain::validation::{
    BLANK, EMAIL_TAKEN, INVALID_EMAIL, MAX_EMAIL_LEN, MAX_NAME_LEN, MIN_PASSWORD_LEN, REQUIRED,
};
use crate::error::ServiceResult;
use crate::security_log;
use crate::util;

const MAX_USERNAME_LEN: usize = 150;

/// Create an account
///
/// Anyone may register an `employee` account; any other role needs an
/// authenticated admin as `caller`.
pub async fn register(
    pool: &SqlitePool,
    caller: Option<&CurrentUser>,
    req: &RegisterRequest,
) -> ServiceResult<User> {
    let role = req.role.unwrap_or_default();
    if role != Role::Employee && !caller.is_some_and(CurrentUser::is_admin) {
        security_log!(
            "WARN",
            "privileged_register_denied",
            role = role.as_db(),
            caller_id = caller.map(|c| c.id).unwrap_or_default()
        );
        return Err(AppError::new(ErrorCode::AdminRequired).into());
    }

    let mut errors = FieldErrors::new();
    let username = check_text(&mut errors, "username", &req.username, MAX_USERNAME_LEN);
    let email = check_email(&mut errors, &req.email);
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        errors.add("password", password_too_short());
    }
    let first_name = req.first_name.as_deref().unwrap_or_default().trim();
    let last_name = req.last_name.as_deref().unwrap_or_default().trim();
    for (field, value) in [("first_name", first_name), ("last_name", last_name)] {
        if value.chars().count() > MAX_NAME_LEN {
            errors.add(field, too_long(MAX_NAME_LEN));
        }
    }

    let mut tx = db::begin_write(pool).await?;
    if !errors.contains("email") && db::users::email_taken(&mut *tx, &email, None).await? {
        errors.add("email", EMAIL_TAKEN);
    }
    errors.into_result()?;

    let password_hash = hash(&req.password)?;
    let id = db::users::insert(
        &mut *tx,
        &db::users::NewUser {
            username,
            email: &email,
            password_hash: &password_hash,
            role,
            first_name,
            last_name,
        },
        util::now_millis(),
    )
    .await?;
    let user = db::users::find_by_id(&mut *tx, id)
        .await?
        .ok_or_else(|| user_not_found(id))?;
    tx.commit().await?;

    tracing::info!(target: "audit", user_id = id, role = %role, "Account registered");
    Ok(user)
}

pub async fn login(
    pool: &SqlitePool,
    jwt: &JwtService,
    req: &LoginRequest,
) -> ServiceResult<LoginResponse> {
    let email = req.email.trim().to_lowercase();
    let record = db::users::find_by_email(pool, &email).await?;

    let Some(record) = record.filter(|r| util::verify_password(&req.password, &r.password_hash))
    else {
        security_log!("WARN", "login_failed", email = email);
        return Err(AppError::invalid_credentials().into());
    };
    if !record.user.is_active {
        security_log!("WARN", "login_inactive", user_id = record.user.id);
        return Err(AppError::new(ErrorCode::AccountDisabled).into());
    }

    let tokens = jwt.generate_pair(&record.user).map_err(token_error)?;
    security_log!("INFO", "login_success", user_id = record.user.id);
    Ok(LoginResponse {
        user: record.user,
        tokens,
    })
}

/// Exchange a refresh token for a new access token
pub async fn refresh(
    pool: &SqlitePool,
    jwt: &JwtService,
    req: &RefreshRequest,
) -> ServiceResult<RefreshResponse> {
    let claims = jwt
        .validate_token(req.refresh.trim(), TokenType::Refresh)
        .map_err(|e| {
            security_log!("WARN", "refresh_failed", error = e.to_string());
            token_error(e)
        })?;
    let user_id = claims.user_id().map_err(token_error)?;

    let user = db::users::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| AppError::invalid_token("User no longer exists"))?;
    if !user.is_active {
        return Err(AppError::new(ErrorCode::AccountDisabled).into());
    }

    let access = jwt
        .generate_token(&user, TokenType::Access)
        .map_err(token_error)?;
    Ok(RefreshResponse { access })
}

pub async fn current(pool: &SqlitePool, actor: &CurrentUser) -> ServiceResult<User> {
    Ok(db::users::find_by_id(pool, actor.id)
        .await?
        .ok_or_else(|| user_not_found(actor.id))?)
}

pub async fn update_profile(
    pool: &SqlitePool,
    actor: &CurrentUser,
    update: &UserUpdate,
) -> ServiceResult<User> {
    let mut tx = db::begin_write(pool).await?;
    let mut user = db::users::find_by_id(&mut *tx, actor.id)
        .await?
        .ok_or_else(|| user_not_found(actor.id))?;

    let mut errors = FieldErrors::new();
    if let Some(username) = &update.username {
        user.username = check_text(&mut errors, "username", username, MAX_USERNAME_LEN).to_string();
    }
    if let Some(email) = &update.email {
        user.email = check_email(&mut errors, email);
        if !errors.contains("email")
            && db::users::email_taken(&mut *tx, &user.email, Some(user.id)).await?
        {
            errors.add("email", EMAIL_TAKEN);
        }
    }
    if let Some(first_name) = &update.first_name {
        user.first_name = optional_text(&mut errors, "first_name", first_name);
    }
    if let Some(last_name) = &update.last_name {
        user.last_name = optional_text(&mut errors, "last_name", last_name);
    }
    errors.into_result()?;

    db::users::update_profile(&mut *tx, &user, util::now_millis()).await?;
    let user = db::users::find_by_id(&mut *tx, actor.id)
        .await?
        .ok_or_else(|| user_not_found(actor.id))?;
    tx.commit().await?;

    tracing::info!(target: "audit", user_id = actor.id, "Profile updated");
    Ok(user)
}

pub async fn change_password(
    pool: &SqlitePool,
    actor: &CurrentUser,
    req: &ChangePasswordRequest,
) -> ServiceResult<()> {
    let record = db::users::find_record_by_id(pool, actor.id)
        .await?
        .ok_or_else(|| user_not_found(actor.id))?;

    if !util::verify_password(&req.old_password, &record.password_hash) {
        security_log!("WARN", "password_change_failed", user_id = actor.id);
        return Err(AppError::new(ErrorCode::OldPasswordIncorrect).into());
    }
    if req.new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::new(ErrorCode::PasswordTooShort).into());
    }

    let password_hash = hash(&req.new_password)?;
    db::users::update_password(pool, actor.id, &password_hash, util::now_millis()).await?;

    security_log!("INFO", "password_changed", user_id = actor.id);
    Ok(())
}

fn check_text<'a>(errors: &mut FieldErrors, field: &str, value: &'a str, max: usize) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        errors.add(field, BLANK);
    } else if value.chars().count() > max {
        errors.add(field, too_long(max));
    }
    value
}

fn optional_text(errors: &mut FieldErrors, field: &str, value: &str) -> String {
    let value = value.trim();
    if value.chars().count() > MAX_NAME_LEN {
        errors.add(field, too_long(MAX_NAME_LEN));
    }
    value.to_string()
}

/// Emails are stored lowercased; login compares case-insensitively
fn check_email(errors: &mut FieldErrors, value: &str) -> String {
    let email = value.trim().to_lowercase();
    if email.is_empty() {
        errors.add("email", REQUIRED);
    } else if email.chars().count() > MAX_EMAIL_LEN {
        errors.add("email", too_long(MAX_EMAIL_LEN));
    } else if !email.validate_email() {
        errors.add("email", INVALID_EMAIL);
    }
    email
}

fn too_long(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

fn password_too_short() -> String {
    format!("Ensure this field has at least {MIN_PASSWORD_LEN} characters.")
}

fn hash(password: &str) -> Result<String, AppError> {
    util::hash_password(password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))
}

fn token_error(e: JwtError) -> AppError {
    match e {
        JwtError::ExpiredToken => AppError::token_expired(),
        JwtError::GenerationFailed(msg) => {
            AppError::internal(format!("Token generation failed: {msg}"))
        }
        _ => AppError::invalid_token("Invalid token"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_email_normalizes() {
        let mut errors = FieldErrors::new();
        assert_eq!(check_email(&mut errors, "  Jane@Acme.Test "), "jane@acme.test");
        assert!(errors.is_empty());

        check_email(&mut errors, "nope");
        assert_eq!(errors.get("email"), Some(INVALID_EMAIL));
    }

    #[test]
    fn test_check_text_blank_and_long() {
        let mut errors = FieldErrors::new();
        check_text(&mut errors, "username", "  ", 10);
        check_text(&mut errors, "other", "abcdefghijk", 10);
        assert_eq!(errors.get("username"), Some(BLANK));
        assert_eq!(
            errors.get("other"),
            Some("Ensure this field has no more than 10 characters.")
        );
    }

    #[test]
    fn test_token_error_mapping() {
        assert_eq!(token_error(JwtError::ExpiredToken).code, ErrorCode::TokenExpired);
        assert_eq!(
            token_error(JwtError::WrongTokenType {
                expected: TokenType::Refresh
            })
            .code,
            ErrorCode::TokenInvalid
        );
    }
}
