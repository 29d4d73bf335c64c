//! Application state

use std::sync::Arc;

use shared::models::Role;

use crate::auth::{JwtConfig, JwtService};
use crate::config::Config;
use crate::db::{self, DbService};
use crate::util;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state, cloned into every handler
#[derive(Clone, Debug)]
pub struct AppState {
    /// SQLite pool
    pub db: DbService,
    /// Token issue/validation
    pub jwt: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Open the database, apply migrations and create the bootstrap admin
    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let db = DbService::new(&config.database_url, config.db_max_connections).await?;
        let jwt = JwtService::with_config(JwtConfig::from_config(config));

        let state = Self {
            db,
            jwt: Arc::new(jwt),
            config: Arc::new(config.clone()),
        };
        state.bootstrap_admin().await?;
        Ok(state)
    }

    /// Create the configured admin account when no users exist yet
    async fn bootstrap_admin(&self) -> Result<(), BoxError> {
        let (Some(email), Some(password)) = (&self.config.admin_email, &self.config.admin_password)
        else {
            return Ok(());
        };
        if db::users::count(&self.db.pool).await? > 0 {
            return Ok(());
        }

        let password_hash = util::hash_password(password).map_err(|e| e.to_string())?;
        let email = email.trim().to_lowercase();
        let id = db::users::insert(
            &self.db.pool,
            &db::users::NewUser {
                username: "admin",
                email: &email,
                password_hash: &password_hash,
                role: Role::Admin,
                first_name: "",
                last_name: "",
            },
            util::now_millis(),
        )
        .await?;

        tracing::info!(user_id = id, email = %email, "Bootstrap admin account created");
        Ok(())
    }
}
