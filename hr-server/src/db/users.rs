//! User account queries

use shared::models::{Role, User};
use sqlx::SqliteExecutor;

/// User row including the password hash (never serialized)
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    #[sqlx(flatten)]
    pub user: User,
    pub password_hash: String,
}

const USER_COLUMNS: &str =
    "id, username, email, role, first_name, last_name, is_active, created_at, updated_at";

/// New account fields
pub struct NewUser<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: Role,
    pub first_name: &'a str,
    pub last_name: &'a str,
}

pub async fn find_by_id<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
        .bind(id)
        .fetch_optional(ex)
        .await
}

/// Case-insensitive lookup by login email
pub async fn find_by_email<'e>(
    ex: impl SqliteExecutor<'e>,
    email: &str,
) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {USER_COLUMNS}, password_hash FROM users WHERE email = ? COLLATE NOCASE"
    ))
    .bind(email)
    .fetch_optional(ex)
    .await
}

pub async fn find_record_by_id<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<UserRecord>, sqlx::Error> {
    sqlx::query_as(&format!(
        "SELECT {USER_COLUMNS}, password_hash FROM users WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(ex)
    .await
}

/// Is `email` registered to an account other than `exclude_id`?
pub async fn email_taken<'e>(
    ex: impl SqliteExecutor<'e>,
    email: &str,
    exclude_id: Option<i64>,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM users
             WHERE email = ?1 COLLATE NOCASE AND (?2 IS NULL OR id != ?2))",
    )
    .bind(email)
    .bind(exclude_id)
    .fetch_one(ex)
    .await
}

pub async fn count<'e>(ex: impl SqliteExecutor<'e>) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(ex)
        .await
}

pub async fn insert<'e>(
    ex: impl SqliteExecutor<'e>,
    user: &NewUser<'_>,
    now: i64,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(
        "INSERT INTO users (username, email, password_hash, role, first_name, last_name,
                            is_active, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, 1, ?7, ?7) RETURNING id",
    )
    .bind(user.username)
    .bind(user.email)
    .bind(user.password_hash)
    .bind(user.role.as_db())
    .bind(user.first_name)
    .bind(user.last_name)
    .bind(now)
    .fetch_one(ex)
    .await
}

pub async fn update_profile<'e>(
    ex: impl SqliteExecutor<'e>,
    user: &User,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let rows = sqlx::query(
        "UPDATE users SET username = ?1, email = ?2, first_name = ?3, last_name = ?4,
                updated_at = ?5
         WHERE id = ?6",
    )
    .bind(&user.username)
    .bind(&user.email)
    .bind(&user.first_name)
    .bind(&user.last_name)
    .bind(now)
    .bind(user.id)
    .execute(ex)
    .await?;
    Ok(rows.rows_affected())
}

pub async fn update_password<'e>(
    ex: impl SqliteExecutor<'e>,
    id: i64,
    password_hash: &str,
    now: i64,
) -> Result<u64, sqlx::Error> {
    let rows = sqlx::query("UPDATE users SET password_hash = ?1, updated_at = ?2 WHERE id = ?3")
        .bind(password_hash)
        .bind(now)
        .bind(id)
        .execute(ex)
        .await?;
    Ok(rows.rows_affected())
}
