//! JWT token service
//!
//! Issues and validates HS256 access and refresh tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use rand::distributions::Alphanumeric;
use serde::{Deserialize, Serialize};
use shared::models::{Role, TokenPair, User};
use thiserror::Error;

use crate::config::Config;

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes outside development)
    pub secret: String,
    /// Access token lifetime (minutes)
    pub access_minutes: i64,
    /// Refresh token lifetime (minutes)
    pub refresh_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl JwtConfig {
    /// Build from server config; generates a throwaway secret when none is set
    /// (only possible in development, `Config::from_env` refuses otherwise)
    pub fn from_config(config: &Config) -> Self {
        let secret = config.jwt_secret.clone().unwrap_or_else(|| {
            tracing::warn!("JWT_SECRET not set, generating a temporary development key");
            generate_printable_secret()
        });

        Self {
            secret,
            access_minutes: config.access_token_minutes,
            refresh_minutes: config.refresh_token_minutes,
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
        }
    }
}

/// Random 64-character alphanumeric secret
pub fn generate_printable_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub token_type: TokenType,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64, JwtError> {
        self.sub
            .parse()
            .map_err(|_| JwtError::InvalidToken("subject is not a user id".into()))
    }
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Expected a {expected:?} token")]
    WrongTokenType { expected: TokenType },

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("issuer", &self.config.issuer)
            .field("audience", &self.config.audience)
            .finish_non_exhaustive()
    }
}

impl JwtService {
    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    pub fn generate_token(&self, user: &User, token_type: TokenType) -> Result<String, JwtError> {
        let lifetime = match token_type {
            TokenType::Access => self.config.access_minutes,
            TokenType::Refresh => self.config.refresh_minutes,
        };
        let now = Utc::now();
        let expiration = now + Duration::minutes(lifetime);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            token_type,
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Access + refresh pair issued at login
    pub fn generate_pair(&self, user: &User) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access: self.generate_token(user, TokenType::Access)?,
            refresh: self.generate_token(user, TokenType::Refresh)?,
        })
    }

    /// Validate signature, expiry, issuer, audience and token type
    pub fn validate_token(&self, token: &str, expected: TokenType) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        if token_data.claims.token_type != expected {
            return Err(JwtError::WrongTokenType { expected });
        }
        Ok(token_data.claims)
    }

    /// Extract the token from an `Authorization` header value
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ").map(str::trim)
    }
}

/// Authenticated caller, injected into request extensions by `require_auth`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(access_minutes: i64) -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "unit-test-secret-unit-test-secret-0123".into(),
            access_minutes,
            refresh_minutes: 60,
            issuer: "hr-server".into(),
            audience: "hr-clients".into(),
        })
    }

    fn user() -> User {
        User {
            id: 42,
            username: "jane".into(),
            email: "jane@acme.test".into(),
            role: Role::Manager,
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            is_active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let service = service(60);
        let token = service.generate_token(&user(), TokenType::Access).unwrap();
        let claims = service.validate_token(&token, TokenType::Access).unwrap();

        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.email, "jane@acme.test");
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.iss, "hr-server");
    }

    #[test]
    fn test_token_types_are_not_interchangeable() {
        let service = service(60);
        let pair = service.generate_pair(&user()).unwrap();

        assert!(matches!(
            service.validate_token(&pair.access, TokenType::Refresh),
            Err(JwtError::WrongTokenType { .. })
        ));
        assert!(matches!(
            service.validate_token(&pair.refresh, TokenType::Access),
            Err(JwtError::WrongTokenType { .. })
        ));
        assert!(service.validate_token(&pair.refresh, TokenType::Refresh).is_ok());
    }

    #[test]
    fn test_expired_token_rejected() {
        // Past the default 60s leeway
        let service = service(-5);
        let token = service.generate_token(&user(), TokenType::Access).unwrap();
        assert!(matches!(
            service.validate_token(&token, TokenType::Access),
            Err(JwtError::ExpiredToken)
        ));
    }

    #[test]
    fn test_foreign_signature_rejected() {
        let token = service(60).generate_token(&user(), TokenType::Access).unwrap();
        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-another-secret-another".into(),
            ..service(60).config
        });
        assert!(other.validate_token(&token, TokenType::Access).is_err());
    }

    #[test]
    fn test_extract_from_header() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }

    #[test]
    fn test_generated_secret() {
        let a = generate_printable_secret();
        assert_eq!(a.len(), 64);
        assert_ne!(a, generate_printable_secret());
    }
}
